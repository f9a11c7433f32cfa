//! Flatten a product read from the API into declared-state attributes
//!
//! Produces the same attribute shape the host declares, so the result can be
//! compared directly against declared state. Fields the API leaves out are
//! omitted rather than defaulted.

use std::collections::HashMap;

use xconnect_core::Value;

use crate::api::{AwsVirtualInterface, Product, ProductEnd};
use crate::declared::ConnectionKind;

pub fn flatten(kind: ConnectionKind, product: &Product) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();
    attributes.insert(
        "name".to_string(),
        Value::String(product.product_name.clone()),
    );
    attributes.insert("rate_limit".to_string(), int(product.rate_limit));
    if let Some(cost_centre) = &product.cost_centre {
        attributes.insert(
            "invoice_reference".to_string(),
            Value::String(cost_centre.clone()),
        );
    }
    if !product.provisioning_status.is_empty() {
        attributes.insert(
            "provisioning_status".to_string(),
            Value::String(product.provisioning_status.clone()),
        );
    }

    attributes.insert("a_end".to_string(), Value::Map(flatten_end(&product.a_end)));
    let b_end = match kind {
        ConnectionKind::Private => flatten_end(&product.b_end),
        ConnectionKind::AwsCloud => flatten_aws_end(
            kind,
            &product.b_end,
            product.resources.aws_virtual_interface.as_ref(),
        ),
    };
    attributes.insert("b_end".to_string(), Value::Map(b_end));

    attributes
}

fn flatten_end(end: &ProductEnd) -> HashMap<String, Value> {
    let mut attrs = HashMap::new();
    attrs.insert(
        "product_uid".to_string(),
        Value::String(end.product_uid.clone()),
    );
    // Untagged ends must not read back as VLAN 0
    if let Some(vlan) = end.vlan.filter(|v| *v > 0) {
        attrs.insert("vlan".to_string(), Value::Int(vlan));
    }
    attrs
}

fn flatten_aws_end(
    kind: ConnectionKind,
    end: &ProductEnd,
    vif: Option<&AwsVirtualInterface>,
) -> HashMap<String, Value> {
    let mut attrs = HashMap::new();
    attrs.insert(
        "product_uid".to_string(),
        Value::String(end.product_uid.clone()),
    );
    // The API does not echo the partner type; the kind implies it
    if let Some(connect_type) = kind.default_connect_type() {
        attrs.insert("connect_type".to_string(), Value::from(connect_type));
    }
    let Some(vif) = vif else {
        return attrs;
    };

    let strings = [
        ("aws_connection_name", &vif.name),
        ("aws_account_id", &vif.owner_account),
        ("aws_ip_address", &vif.amazon_ip_address),
        ("bgp_auth_key", &vif.auth_key),
        ("customer_ip_address", &vif.customer_ip_address),
    ];
    for (key, value) in strings {
        if let Some(v) = value {
            attrs.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    if let Some(asn) = vif.asn {
        attrs.insert("customer_asn".to_string(), Value::Int(i64::from(asn)));
    }
    if let Some(visibility) = &vif.visibility {
        attrs.insert(
            "type".to_string(),
            Value::String(visibility.to_ascii_lowercase()),
        );
    }
    attrs
}

fn int(n: u64) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partner::PartnerConfig;
    use serde_json::json;

    fn aws_product(vif: serde_json::Value) -> Product {
        serde_json::from_value(json!({
            "productUid": "vxc-1",
            "productName": "vxc-1",
            "rateLimit": 100,
            "costCentre": "",
            "provisioningStatus": "LIVE",
            "aEnd": {"productUid": "port-a", "vlan": 0},
            "bEnd": {"productUid": "aws-port", "vlan": 512},
            "resources": {"aws_virtual_interface": vif}
        }))
        .unwrap()
    }

    fn b_end(attrs: &HashMap<String, Value>) -> &HashMap<String, Value> {
        attrs["b_end"].as_map().unwrap()
    }

    #[test]
    fn flattens_private_vxc() {
        let product: Product = serde_json::from_value(json!({
            "productName": "core",
            "rateLimit": 1000,
            "provisioningStatus": "CONFIGURED",
            "aEnd": {"productUid": "a", "vlan": 10},
            "bEnd": {"productUid": "b", "vlan": -1}
        }))
        .unwrap();

        let attrs = flatten(ConnectionKind::Private, &product);
        assert_eq!(attrs["name"], Value::String("core".into()));
        assert_eq!(attrs["rate_limit"], Value::Int(1000));
        assert_eq!(attrs["provisioning_status"], Value::String("CONFIGURED".into()));
        assert!(!attrs.contains_key("invoice_reference"));

        let a_end = attrs["a_end"].as_map().unwrap();
        assert_eq!(a_end["vlan"], Value::Int(10));
        assert!(!b_end(&attrs).contains_key("vlan"));
    }

    #[test]
    fn untagged_a_end_has_no_vlan() {
        let attrs = flatten(ConnectionKind::AwsCloud, &aws_product(json!({})));
        let a_end = attrs["a_end"].as_map().unwrap();
        assert_eq!(a_end["product_uid"], Value::String("port-a".into()));
        assert!(!a_end.contains_key("vlan"));
    }

    #[test]
    fn aws_end_tolerates_partial_interface() {
        let attrs = flatten(
            ConnectionKind::AwsCloud,
            &aws_product(json!({"ownerAccount": "123456789012", "type": "PRIVATE"})),
        );
        let end = b_end(&attrs);
        assert_eq!(end["aws_account_id"], Value::String("123456789012".into()));
        assert_eq!(end["type"], Value::String("private".into()));
        assert!(!end.contains_key("bgp_auth_key"));
        assert!(!end.contains_key("customer_asn"));
        assert!(!end.contains_key("vlan"));
    }

    #[test]
    fn aws_end_without_resources() {
        let product: Product = serde_json::from_value(json!({
            "productName": "x",
            "bEnd": {"productUid": "aws-port"}
        }))
        .unwrap();
        let attrs = flatten(ConnectionKind::AwsCloud, &product);
        let end = b_end(&attrs);
        assert_eq!(end.len(), 2);
        assert_eq!(end["connect_type"], Value::String("AWS".into()));
    }

    #[test]
    fn flatten_restores_built_partner_config() {
        let declared: HashMap<String, Value> = [
            ("product_uid", Value::from("aws-port")),
            ("aws_account_id", "123456789012".into()),
            ("customer_asn", Value::Int(65000)),
            ("type", "PRIVATE".into()),
            ("bgp_auth_key", "key-1".into()),
            ("aws_connection_name", "uplink".into()),
            ("customer_ip_address", "169.254.0.2/30".into()),
            ("aws_ip_address", "169.254.0.1/30".into()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let config = PartnerConfig::from_attributes("AWS", &declared).unwrap();
        let mut wire = serde_json::to_value(config.build()).unwrap();
        wire.as_object_mut().unwrap().remove("connectType");

        let attrs = flatten(ConnectionKind::AwsCloud, &aws_product(wire));
        let end = b_end(&attrs);
        for (key, value) in &declared {
            let expected = match key.as_str() {
                "type" => Value::String("private".into()),
                _ => value.clone(),
            };
            assert_eq!(end.get(key), Some(&expected), "mismatch for {}", key);
        }
    }
}

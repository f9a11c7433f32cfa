//! Declared state of a VXC
//!
//! Parses the host's attribute map into typed values and turns them into the
//! order and update payloads the API expects. Unset optional attributes stay
//! `None` all the way to the wire.

use std::collections::HashMap;
use std::fmt;

use xconnect_core::{Resource, Value};

use crate::api::{AssociatedVxcOrder, OrderEnd, VxcOrder, VxcUpdate};
use crate::error::{MegaportError, MegaportResult};
use crate::partner::PartnerConfig;

/// Highest value a 12-bit VLAN tag can take
pub const MAX_VLAN: u16 = 4095;

/// Kind of connection, selected by the resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// VXC from a port to an AWS partner port, with a partner config on the B-end
    AwsCloud,
    /// VXC between two of the customer's own products
    Private,
}

impl ConnectionKind {
    pub const ALL: [ConnectionKind; 2] = [ConnectionKind::AwsCloud, ConnectionKind::Private];

    pub fn from_resource_type(resource_type: &str) -> MegaportResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.resource_type() == resource_type)
            .ok_or_else(|| MegaportError::UnsupportedResourceType(resource_type.to_string()))
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            ConnectionKind::AwsCloud => "aws_vxc",
            ConnectionKind::Private => "private_vxc",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::AwsCloud => "aws-cloud",
            ConnectionKind::Private => "private",
        }
    }

    /// Partner connection type used when the B-end does not name one
    pub fn default_connect_type(&self) -> Option<&'static str> {
        match self {
            ConnectionKind::AwsCloud => Some("AWS"),
            ConnectionKind::Private => None,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attachment point
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredEnd {
    pub product_uid: String,
    /// `None` lets the API pick a tag
    pub vlan: Option<u16>,
}

/// Declared state of one VXC
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredVxc {
    pub kind: ConnectionKind,
    pub name: String,
    pub rate_limit: u64,
    pub invoice_reference: Option<String>,
    pub a_end: DeclaredEnd,
    pub b_end: DeclaredEnd,
    /// Present exactly when the kind has a partner-facing end
    pub partner: Option<PartnerConfig>,
}

impl DeclaredVxc {
    pub fn from_resource(resource: &Resource) -> MegaportResult<Self> {
        let kind = ConnectionKind::from_resource_type(&resource.id.resource_type)?;
        Self::from_attributes(kind, &resource.attributes)
    }

    pub fn from_attributes(
        kind: ConnectionKind,
        attributes: &HashMap<String, Value>,
    ) -> MegaportResult<Self> {
        let attrs = Attributes::root(attributes);
        let a = attrs.block("a_end")?;
        let b = attrs.block("b_end")?;

        let a_end = DeclaredEnd {
            product_uid: a.required_str("product_uid")?,
            vlan: a.vlan("vlan")?,
        };

        let (b_end, partner) = match kind.default_connect_type() {
            Some(default_type) => {
                let connect_type = b
                    .optional_str("connect_type")?
                    .unwrap_or_else(|| default_type.to_string());
                let partner = PartnerConfig::from_block(&connect_type, &b)?;
                let end = DeclaredEnd {
                    product_uid: b.required_str("product_uid")?,
                    vlan: None,
                };
                (end, Some(partner))
            }
            None => {
                let end = DeclaredEnd {
                    product_uid: b.required_str("product_uid")?,
                    vlan: b.vlan("vlan")?,
                };
                (end, None)
            }
        };

        Ok(Self {
            kind,
            name: attrs.required_str("name")?,
            rate_limit: attrs.required_u64("rate_limit")?,
            invoice_reference: attrs.optional_str("invoice_reference")?,
            a_end,
            b_end,
            partner,
        })
    }

    /// Order payload shared by validate and buy. Each call builds a fresh value.
    pub fn order(&self) -> Vec<VxcOrder> {
        let a_end = self.a_end.vlan.map(|vlan| OrderEnd {
            vlan: Some(vlan),
            ..Default::default()
        });
        let b_end = OrderEnd {
            product_uid: Some(self.b_end.product_uid.clone()),
            vlan: self.b_end.vlan,
            partner_config: self.partner.as_ref().map(PartnerConfig::build),
        };

        vec![VxcOrder {
            product_uid: self.a_end.product_uid.clone(),
            associated_vxcs: vec![AssociatedVxcOrder {
                product_name: self.name.clone(),
                rate_limit: self.rate_limit,
                cost_centre: self.invoice_reference.clone(),
                a_end,
                b_end,
            }],
        }]
    }

    /// Update payload carrying only the mutable attributes. Product UIDs and
    /// partner settings are never sent.
    pub fn update_request(&self) -> VxcUpdate {
        VxcUpdate {
            name: self.name.clone(),
            rate_limit: self.rate_limit,
            cost_centre: self.invoice_reference.clone().unwrap_or_default(),
            a_end_vlan: self.a_end.vlan,
            b_end_vlan: match self.kind {
                ConnectionKind::Private => self.b_end.vlan,
                ConnectionKind::AwsCloud => None,
            },
        }
    }
}

// =============================================================================
// Attribute access
// =============================================================================

/// View over an attribute map that reports errors with the full attribute path
pub(crate) struct Attributes<'a> {
    prefix: Option<&'static str>,
    map: &'a HashMap<String, Value>,
}

impl<'a> Attributes<'a> {
    pub(crate) fn root(map: &'a HashMap<String, Value>) -> Self {
        Self { prefix: None, map }
    }

    pub(crate) fn nested(prefix: &'static str, map: &'a HashMap<String, Value>) -> Self {
        Self {
            prefix: Some(prefix),
            map,
        }
    }

    fn path(&self, key: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Nested block, given either as a map or as a single-element list of maps
    pub(crate) fn block(&self, key: &'static str) -> MegaportResult<Attributes<'a>> {
        let map = match self.map.get(key) {
            Some(Value::Map(m)) => m,
            Some(Value::List(items)) => match items.as_slice() {
                [Value::Map(m)] => m,
                _ => {
                    return Err(MegaportError::invalid(
                        self.path(key),
                        "expected exactly one block",
                    ));
                }
            },
            Some(_) => return Err(MegaportError::invalid(self.path(key), "expected a block")),
            None => return Err(MegaportError::MissingAttribute(self.path(key))),
        };
        Ok(Attributes::nested(key, map))
    }

    /// String attribute; an empty string counts as unset
    pub(crate) fn optional_str(&self, key: &str) -> MegaportResult<Option<String>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(MegaportError::invalid(self.path(key), "expected a string")),
        }
    }

    pub(crate) fn required_str(&self, key: &str) -> MegaportResult<String> {
        self.optional_str(key)?
            .ok_or_else(|| MegaportError::MissingAttribute(self.path(key)))
    }

    pub(crate) fn optional_int(&self, key: &str) -> MegaportResult<Option<i64>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(_) => Err(MegaportError::invalid(self.path(key), "expected an integer")),
        }
    }

    pub(crate) fn required_u64(&self, key: &str) -> MegaportResult<u64> {
        let value = self
            .optional_int(key)?
            .ok_or_else(|| MegaportError::MissingAttribute(self.path(key)))?;
        u64::try_from(value)
            .map_err(|_| MegaportError::invalid(self.path(key), "must not be negative"))
    }

    pub(crate) fn required_u32(&self, key: &str) -> MegaportResult<u32> {
        let value = self
            .optional_int(key)?
            .ok_or_else(|| MegaportError::MissingAttribute(self.path(key)))?;
        u32::try_from(value).map_err(|_| {
            MegaportError::invalid(self.path(key), format!("{} is out of range", value))
        })
    }

    /// VLAN tag; absent or 0 means unset
    pub(crate) fn vlan(&self, key: &str) -> MegaportResult<Option<u16>> {
        match self.optional_int(key)? {
            None | Some(0) => Ok(None),
            Some(v) => u16::try_from(v)
                .ok()
                .filter(|tag| *tag <= MAX_VLAN)
                .map(Some)
                .ok_or_else(|| {
                    MegaportError::invalid(
                        self.path(key),
                        format!("{} is outside 0..={}", v, MAX_VLAN),
                    )
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(pairs: &[(&str, Value)]) -> Value {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn private_resource() -> Resource {
        Resource::new("private_vxc", "core")
            .with_attribute("name", "core-link".into())
            .with_attribute("rate_limit", Value::Int(500))
            .with_attribute(
                "a_end",
                block(&[("product_uid", "port-a".into()), ("vlan", Value::Int(0))]),
            )
            .with_attribute(
                "b_end",
                Value::List(vec![block(&[
                    ("product_uid", "port-b".into()),
                    ("vlan", Value::Int(120)),
                ])]),
            )
    }

    #[test]
    fn parses_private_vxc() {
        let declared = DeclaredVxc::from_resource(&private_resource()).unwrap();
        assert_eq!(declared.kind, ConnectionKind::Private);
        assert_eq!(declared.a_end.vlan, None);
        assert_eq!(declared.b_end.vlan, Some(120));
        assert!(declared.partner.is_none());
        assert_eq!(declared.invoice_reference, None);
    }

    #[test]
    fn private_order_omits_unset_vlan_and_cost_centre() {
        let declared = DeclaredVxc::from_resource(&private_resource()).unwrap();
        assert_eq!(
            serde_json::to_value(declared.order()).unwrap(),
            json!([{
                "productUid": "port-a",
                "associatedVxcs": [{
                    "productName": "core-link",
                    "rateLimit": 500,
                    "bEnd": {"productUid": "port-b", "vlan": 120}
                }]
            }])
        );
    }

    #[test]
    fn update_request_has_only_mutable_fields() {
        let resource = private_resource()
            .with_attribute("invoice_reference", "cc-42".into())
            .with_attribute(
                "a_end",
                block(&[("product_uid", "port-a".into()), ("vlan", Value::Int(7))]),
            );
        let declared = DeclaredVxc::from_resource(&resource).unwrap();
        assert_eq!(
            serde_json::to_value(declared.update_request()).unwrap(),
            json!({
                "name": "core-link",
                "rateLimit": 500,
                "costCentre": "cc-42",
                "aEndVlan": 7,
                "bEndVlan": 120
            })
        );
    }

    #[test]
    fn rejects_out_of_range_vlan() {
        let resource = private_resource().with_attribute(
            "a_end",
            block(&[("product_uid", "port-a".into()), ("vlan", Value::Int(4096))]),
        );
        match DeclaredVxc::from_resource(&resource) {
            Err(MegaportError::InvalidAttribute { attribute, .. }) => {
                assert_eq!(attribute, "a_end.vlan")
            }
            other => panic!("expected invalid attribute, got {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_rate_limit() {
        let resource = private_resource().with_attribute("rate_limit", Value::Int(-1));
        assert!(matches!(
            DeclaredVxc::from_resource(&resource),
            Err(MegaportError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn reports_missing_nested_attribute_path() {
        let resource =
            private_resource().with_attribute("b_end", block(&[("vlan", Value::Int(3))]));
        match DeclaredVxc::from_resource(&resource) {
            Err(MegaportError::MissingAttribute(path)) => assert_eq!(path, "b_end.product_uid"),
            other => panic!("expected missing attribute, got {:?}", other),
        }
    }

    #[test]
    fn unknown_resource_type() {
        let resource = Resource::new("gcp_vxc", "x");
        assert!(matches!(
            DeclaredVxc::from_resource(&resource),
            Err(MegaportError::UnsupportedResourceType(t)) if t == "gcp_vxc"
        ));
    }

    #[test]
    fn connection_kind_names() {
        assert_eq!(
            ConnectionKind::from_resource_type("aws_vxc").unwrap(),
            ConnectionKind::AwsCloud
        );
        assert_eq!(ConnectionKind::AwsCloud.to_string(), "aws-cloud");
        assert_eq!(ConnectionKind::Private.as_str(), "private");
    }
}

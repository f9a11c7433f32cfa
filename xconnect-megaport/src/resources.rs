//! Resource type definitions
//!
//! This module defines:
//! - Resource types handled by the Megaport provider
//! - Attribute schemas marking computed and force-new attributes

use xconnect_core::provider::ResourceType;
use xconnect_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use crate::declared::ConnectionKind;

// =============================================================================
// Resource Type Definitions
// =============================================================================

macro_rules! define_resource_type {
    ($name:ident, $kind:expr, $schema:ident) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $kind.resource_type()
            }
            fn schema(&self) -> ResourceSchema {
                $schema()
            }
        }
    };
}

define_resource_type!(AwsVxcType, ConnectionKind::AwsCloud, aws_vxc_schema);
define_resource_type!(PrivateVxcType, ConnectionKind::Private, private_vxc_schema);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(AwsVxcType), Box::new(PrivateVxcType)]
}

/// Schema for a resource type, if this provider handles it
pub fn schema_for(resource_type: &str) -> Option<ResourceSchema> {
    match ConnectionKind::from_resource_type(resource_type).ok()? {
        ConnectionKind::AwsCloud => Some(aws_vxc_schema()),
        ConnectionKind::Private => Some(private_vxc_schema()),
    }
}

// =============================================================================
// Schemas
// =============================================================================

fn common_attributes(resource_type: &str) -> ResourceSchema {
    ResourceSchema::new(resource_type)
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("rate_limit", AttributeType::Int).required())
        .attribute(AttributeSchema::new("invoice_reference", AttributeType::String))
        .attribute(
            AttributeSchema::new("provisioning_status", AttributeType::String)
                .computed()
                .with_description("Lifecycle status reported by Megaport"),
        )
}

/// A-end (and private B-end): a customer product plus an optional VLAN
fn plain_end(name: &str) -> AttributeSchema {
    AttributeSchema::new(
        name,
        AttributeType::Block(vec![
            AttributeSchema::new("product_uid", AttributeType::String)
                .required()
                .force_new(),
            AttributeSchema::new("vlan", AttributeType::Int).computed(),
        ]),
    )
    .required()
}

fn aws_end() -> AttributeSchema {
    AttributeSchema::new(
        "b_end",
        AttributeType::Block(vec![
            AttributeSchema::new("product_uid", AttributeType::String)
                .required()
                .force_new(),
            AttributeSchema::new("connect_type", AttributeType::Enum(vec!["AWS".into()]))
                .force_new(),
            AttributeSchema::new("aws_connection_name", AttributeType::String).computed(),
            AttributeSchema::new("aws_account_id", AttributeType::String)
                .required()
                .force_new(),
            AttributeSchema::new("aws_ip_address", AttributeType::String).computed(),
            AttributeSchema::new("bgp_auth_key", AttributeType::String).computed(),
            AttributeSchema::new("customer_asn", AttributeType::Int)
                .required()
                .force_new(),
            AttributeSchema::new("customer_ip_address", AttributeType::String).computed(),
            AttributeSchema::new(
                "type",
                AttributeType::Enum(vec!["private".into(), "public".into()]),
            ),
        ]),
    )
    .required()
}

pub fn aws_vxc_schema() -> ResourceSchema {
    common_attributes(ConnectionKind::AwsCloud.resource_type())
        .attribute(plain_end("a_end"))
        .attribute(aws_end())
        .with_description("VXC from a port to an AWS hosted virtual interface")
}

pub fn private_vxc_schema() -> ResourceSchema {
    common_attributes(ConnectionKind::Private.resource_type())
        .attribute(plain_end("a_end"))
        .attribute(plain_end("b_end"))
        .with_description("VXC between two customer products")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_names() {
        let names: Vec<_> = resource_types().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["aws_vxc", "private_vxc"]);
    }

    #[test]
    fn product_uids_force_replacement() {
        let schema = aws_vxc_schema();
        assert!(schema.is_force_new("a_end.product_uid"));
        assert!(schema.is_force_new("b_end.product_uid"));
        assert!(schema.is_force_new("b_end.customer_asn"));
        assert!(!schema.is_force_new("a_end.vlan"));
        assert!(!schema.is_force_new("rate_limit"));
    }

    #[test]
    fn server_assigned_attributes_are_computed() {
        let schema = aws_vxc_schema();
        assert!(schema.lookup("b_end.bgp_auth_key").unwrap().computed);
        assert!(schema.lookup("a_end.vlan").unwrap().computed);
        assert!(private_vxc_schema().lookup("b_end.vlan").unwrap().computed);
    }

    #[test]
    fn schema_for_unknown_type() {
        assert!(schema_for("aws_vxc").is_some());
        assert!(schema_for("s3_bucket").is_none());
    }
}

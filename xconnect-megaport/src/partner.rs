//! Partner configuration
//!
//! Builds the connection-type specific attachment payload placed on the
//! partner-facing end of a VXC. Each optional field is sent only when it is
//! set; omitting it lets the API generate a value (e.g. the BGP auth key),
//! which is not the same as sending an empty string.

use std::collections::HashMap;
use std::fmt;

use ipnet::IpNet;
use xconnect_core::Value;

use crate::api::{AwsPartnerPayload, PartnerConfigPayload};
use crate::declared::Attributes;
use crate::error::{MegaportError, MegaportResult};

/// Partner attachment parameters, one variant per supported connection type
#[derive(Debug, Clone, PartialEq)]
pub enum PartnerConfig {
    Aws(AwsPartnerConfig),
}

impl PartnerConfig {
    /// Parse the partner-facing end's attributes for `connect_type`
    /// (case-insensitive, e.g. "AWS")
    pub fn from_attributes(
        connect_type: &str,
        attributes: &HashMap<String, Value>,
    ) -> MegaportResult<Self> {
        Self::from_block(connect_type, &Attributes::nested("b_end", attributes))
    }

    pub(crate) fn from_block(connect_type: &str, attrs: &Attributes<'_>) -> MegaportResult<Self> {
        match connect_type.to_ascii_uppercase().as_str() {
            "AWS" => AwsPartnerConfig::from_block(attrs).map(PartnerConfig::Aws),
            _ => Err(MegaportError::UnsupportedConnectionType(
                connect_type.to_string(),
            )),
        }
    }

    /// Discriminator sent as `connectType`
    pub fn connect_type(&self) -> &'static str {
        match self {
            PartnerConfig::Aws(_) => "AWS",
        }
    }

    pub fn build(&self) -> PartnerConfigPayload {
        match self {
            PartnerConfig::Aws(aws) => PartnerConfigPayload::Aws(aws.build()),
        }
    }
}

/// Whether a virtual interface is reachable privately or over public peering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Some(Self::Private),
            "public" => Some(Self::Public),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AWS hosted virtual interface parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AwsPartnerConfig {
    /// AWS account that will own the virtual interface
    pub owner_account: String,
    /// Customer-side BGP ASN
    pub asn: u32,
    pub visibility: Visibility,
    pub connection_name: Option<String>,
    /// Generated by AWS when unset
    pub bgp_auth_key: Option<String>,
    pub customer_ip_address: Option<String>,
    pub amazon_ip_address: Option<String>,
}

impl AwsPartnerConfig {
    fn from_block(attrs: &Attributes<'_>) -> MegaportResult<Self> {
        let visibility = match attrs.optional_str("type")? {
            None => Visibility::default(),
            Some(v) => Visibility::parse(&v).ok_or_else(|| {
                MegaportError::invalid(
                    "b_end.type",
                    format!("must be either 'public' or 'private', got {}", v),
                )
            })?,
        };

        Ok(Self {
            owner_account: attrs.required_str("aws_account_id")?,
            asn: attrs.required_u32("customer_asn")?,
            visibility,
            connection_name: attrs.optional_str("aws_connection_name")?,
            bgp_auth_key: attrs.optional_str("bgp_auth_key")?,
            customer_ip_address: cidr(attrs, "customer_ip_address")?,
            amazon_ip_address: cidr(attrs, "aws_ip_address")?,
        })
    }

    pub fn build(&self) -> AwsPartnerPayload {
        AwsPartnerPayload {
            visibility: self.visibility.as_str().to_string(),
            owner_account: self.owner_account.clone(),
            asn: self.asn,
            name: non_empty(&self.connection_name),
            auth_key: non_empty(&self.bgp_auth_key),
            customer_ip_address: non_empty(&self.customer_ip_address),
            amazon_ip_address: non_empty(&self.amazon_ip_address),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Optional address in canonical CIDR notation (e.g. "169.254.10.1/30")
fn cidr(attrs: &Attributes<'_>, key: &str) -> MegaportResult<Option<String>> {
    let Some(value) = attrs.optional_str(key)? else {
        return Ok(None);
    };
    match value.parse::<IpNet>() {
        Ok(net) if net.to_string() == value => Ok(Some(value)),
        Ok(net) => Err(MegaportError::invalid(
            format!("b_end.{}", key),
            format!("'{}' is not in canonical form (expected {})", value, net),
        )),
        Err(e) => Err(MegaportError::invalid(
            format!("b_end.{}", key),
            format!("'{}' is not a valid CIDR: {}", value, e),
        )),
    }
}

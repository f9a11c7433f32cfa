//! Wire types for the Megaport v2 API

use serde::{Deserialize, Serialize};

/// Envelope wrapped around every API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

// =============================================================================
// Orders (validate / buy)
// =============================================================================

/// One element of the array posted to `networkdesign/validate` and
/// `networkdesign/buy`. `product_uid` is the A-end product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VxcOrder {
    pub product_uid: String,
    pub associated_vxcs: Vec<AssociatedVxcOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedVxcOrder {
    pub product_name: String,
    pub rate_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<String>,
    /// Only sent when the A-end carries a VLAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_end: Option<OrderEnd>,
    pub b_end: OrderEnd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEnd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_config: Option<PartnerConfigPayload>,
}

/// Partner attachment parameters, discriminated by `connectType`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "connectType")]
pub enum PartnerConfigPayload {
    #[serde(rename = "AWS")]
    Aws(AwsPartnerPayload),
}

/// Optional fields are omitted when unset so the API can generate them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsPartnerPayload {
    /// "private" or "public"
    #[serde(rename = "type")]
    pub visibility: String,
    pub owner_account: String,
    pub asn: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amazon_ip_address: Option<String>,
}

/// Descriptor of an object created by `networkdesign/buy`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    #[serde(rename = "vxcJTechnicalServiceUid", default)]
    pub technical_service_uid: Option<String>,
}

// =============================================================================
// Product (read)
// =============================================================================

/// A VXC as returned by `GET /v2/product/{uid}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub product_uid: String,
    pub product_name: String,
    pub rate_limit: u64,
    pub cost_centre: Option<String>,
    pub provisioning_status: String,
    pub a_end: ProductEnd,
    pub b_end: ProductEnd,
    pub resources: ProductResources,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductEnd {
    pub product_uid: String,
    /// Untagged ends come back as null, 0 or -1 depending on the product
    pub vlan: Option<i64>,
}

/// Type-specific attachment details
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductResources {
    pub aws_virtual_interface: Option<AwsVirtualInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsVirtualInterface {
    pub name: Option<String>,
    pub owner_account: Option<String>,
    pub asn: Option<u32>,
    pub auth_key: Option<String>,
    pub customer_ip_address: Option<String>,
    pub amazon_ip_address: Option<String>,
    #[serde(rename = "type")]
    pub visibility: Option<String>,
}

// =============================================================================
// Update
// =============================================================================

/// Body of `PUT /v2/product/vxc/{uid}`. Only mutable fields exist here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VxcUpdate {
    pub name: String,
    pub rate_limit: u64,
    pub cost_centre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_end_vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_end_vlan: Option<u16>,
}

//! Provisioning status classification

use std::fmt;

/// Lifecycle status reported by the API for a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningStatus {
    New,
    Design,
    Deployable,
    Configured,
    Live,
    Active,
    Cancelled,
    CancelledParent,
    Decommissioned,
    /// A status this provider does not know about yet
    Other(String),
}

impl ProvisioningStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "NEW" => Self::New,
            "DESIGN" => Self::Design,
            "DEPLOYABLE" => Self::Deployable,
            "CONFIGURED" => Self::Configured,
            "LIVE" => Self::Live,
            "ACTIVE" => Self::Active,
            "CANCELLED" => Self::Cancelled,
            "CANCELLED_PARENT" => Self::CancelledParent,
            "DECOMMISSIONED" => Self::Decommissioned,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "NEW",
            Self::Design => "DESIGN",
            Self::Deployable => "DEPLOYABLE",
            Self::Configured => "CONFIGURED",
            Self::Live => "LIVE",
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::CancelledParent => "CANCELLED_PARENT",
            Self::Decommissioned => "DECOMMISSIONED",
            Self::Other(s) => s,
        }
    }

    /// Whether a product in this status should be treated as deleted, even
    /// though the API still returns a record for it. Unknown statuses are
    /// never treated as deleted.
    pub fn is_gone(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::CancelledParent | Self::Decommissioned
        )
    }
}

impl fmt::Display for ProvisioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the raw status string marks the product as deleted
pub fn is_gone(status: &str) -> bool {
    ProvisioningStatus::parse(status).is_gone()
}

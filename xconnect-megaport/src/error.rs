//! Error types for the Megaport provider

use thiserror::Error;
use xconnect_core::{ProviderError, ResourceId};

/// Errors raised while reconciling a connection against the Megaport API
#[derive(Debug, Error)]
pub enum MegaportError {
    /// Provider configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// A required declared attribute is missing
    #[error("missing required attribute '{0}'")]
    MissingAttribute(String),

    /// A declared attribute has the wrong type or an out-of-range value
    #[error("invalid attribute '{attribute}': {message}")]
    InvalidAttribute { attribute: String, message: String },

    /// The partner connection type has no config builder
    #[error("unsupported connection type '{0}'")]
    UnsupportedConnectionType(String),

    /// The resource type is not handled by this provider
    #[error("unsupported resource type '{0}'")]
    UnsupportedResourceType(String),

    /// The remote API rejected the order during the dry-run validation
    #[error("order rejected by validation (HTTP {status}): {body}")]
    Validation { status: u16, body: String },

    /// Non-success response from the remote API
    #[error("remote API error (HTTP {status}): {body}")]
    Remote { status: u16, body: String },

    /// The remote object does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The order response did not carry the identifier of the new connection
    #[error("order response did not contain a service identifier")]
    MissingIdentifier,

    /// The order was placed but the connection could not be read back.
    /// A remote object exists under `identifier` that the caller may not
    /// have recorded.
    #[error("connection {identifier} was ordered but could not be read back: {source}")]
    PartialFailure {
        identifier: String,
        #[source]
        source: Box<MegaportError>,
    },

    /// Request could not be sent or the response could not be received
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MegaportError {
    pub fn invalid(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Wrap into the host-facing error, keeping this error as the cause
    pub fn into_provider_error(self, id: &ResourceId) -> ProviderError {
        ProviderError::new(self.to_string())
            .for_resource(id.clone())
            .with_cause(self)
    }
}

/// Result type for Megaport operations
pub type MegaportResult<T> = Result<T, MegaportError>;

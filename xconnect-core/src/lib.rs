//! xconnect Core
//!
//! Declared-state model shared by xconnect providers: resources, read-back
//! state, the provider traits and drift detection between the two.

pub mod differ;
pub mod provider;
pub mod resource;
pub mod schema;

pub use provider::{Provider, ProviderError, ProviderResult};
pub use resource::{Resource, ResourceId, State, Value};

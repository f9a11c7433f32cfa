//! xconnect Megaport Provider
//!
//! Reconciles declared virtual cross-connects (VXCs) against the Megaport API.
//!
//! ## Module Structure
//!
//! - `config` - Endpoint, token and timeout settings
//! - `client` - Request/response wrapper around the Megaport v2 API
//! - `api` - Wire types
//! - `status` - Provisioning status classification
//! - `partner` - Partner config builder (per connection type)
//! - `declared` - Declared-state parsing and payload construction
//! - `flatten` - Remote product to declared-state attributes
//! - `provider` - MegaportProvider (create/read/update/delete)
//! - `resources` - Resource type definitions and schemas

pub mod api;
pub mod client;
pub mod config;
pub mod declared;
pub mod error;
pub mod flatten;
pub mod partner;
pub mod provider;
pub mod resources;
pub mod status;

// Re-export main types
pub use client::MegaportClient;
pub use config::MegaportConfig;
pub use declared::{ConnectionKind, DeclaredVxc};
pub use error::{MegaportError, MegaportResult};
pub use provider::MegaportProvider;
pub use status::{ProvisioningStatus, is_gone};

use xconnect_core::provider::{BoxFuture, Provider, ProviderResult};
use xconnect_core::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for MegaportProvider {
    fn name(&self) -> &'static str {
        "megaport"
    }

    fn resource_types(&self) -> Vec<Box<dyn xconnect_core::provider::ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            let Some(identifier) = identifier else {
                return Ok(State::not_found(id));
            };
            self.read_connection(&id, &identifier)
                .await
                .map_err(|e| e.into_provider_error(&id))
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move {
            self.create_connection(&resource)
                .await
                .map_err(|e| e.into_provider_error(&resource.id))
        })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        _from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let to = to.clone();
        Box::pin(async move {
            self.update_connection(&id, &identifier, &to)
                .await
                .map_err(|e| e.into_provider_error(&id))
        })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move {
            self.delete_connection(&id, &identifier)
                .await
                .map_err(|e| e.into_provider_error(&id))
        })
    }
}

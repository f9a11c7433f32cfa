//! Megaport Provider implementation
//!
//! Reconciles declared VXCs against the Megaport API. Every operation issues
//! its calls one after another and ends with a read-back, so the state handed
//! to the host is always what the API reports.
//!
//! Create places an order without an idempotency key: calling it again after
//! an ambiguous failure can order a second VXC.

use log::{debug, info, warn};
use xconnect_core::{Resource, ResourceId, State};

use crate::client::{MegaportClient, to_wire};
use crate::config::MegaportConfig;
use crate::declared::{ConnectionKind, DeclaredVxc};
use crate::error::{MegaportError, MegaportResult};
use crate::flatten::flatten;
use crate::status::ProvisioningStatus;

/// Megaport Provider
pub struct MegaportProvider {
    client: MegaportClient,
}

impl MegaportProvider {
    pub fn new(config: &MegaportConfig) -> MegaportResult<Self> {
        let client = MegaportClient::new(config)?;
        info!("initialised megaport api client at {}", client.base_url());
        Ok(Self { client })
    }

    /// Create with a specific client (for testing)
    pub fn with_client(client: MegaportClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &MegaportClient {
        &self.client
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate, order, then read back the new VXC
    pub async fn create_connection(&self, resource: &Resource) -> MegaportResult<State> {
        let declared = DeclaredVxc::from_resource(resource)?;

        let validate = declared.order();
        debug!("validating order for {}: {}", resource.id, to_wire(&validate));
        self.client.validate_order(&validate).await?;

        let order = declared.order();
        let created = self.client.buy_order(&order).await?;
        if created.len() > 1 {
            warn!(
                "order for {} returned {} objects, using the first",
                resource.id,
                created.len()
            );
        }
        let identifier = created
            .into_iter()
            .next()
            .and_then(|c| c.technical_service_uid)
            .filter(|uid| !uid.is_empty())
            .ok_or(MegaportError::MissingIdentifier)?;
        info!("ordered {} as {}", resource.id, identifier);

        match self.read_connection(&resource.id, &identifier).await {
            Ok(state) if state.exists => Ok(state),
            Ok(_) => Err(partial_failure(
                &resource.id,
                identifier.clone(),
                MegaportError::NotFound(format!("product {}", identifier)),
            )),
            Err(e) => Err(partial_failure(&resource.id, identifier, e)),
        }
    }

    /// Fetch the VXC. Missing and terminated products read as not found.
    pub async fn read_connection(
        &self,
        id: &ResourceId,
        identifier: &str,
    ) -> MegaportResult<State> {
        let kind = ConnectionKind::from_resource_type(&id.resource_type)?;

        let product = match self.client.get_product(identifier).await {
            Ok(product) => product,
            Err(e) if e.is_not_found() => {
                info!("{} ({}) no longer exists", id, identifier);
                return Ok(State::not_found(id.clone()));
            }
            Err(e) => return Err(e),
        };

        let status = ProvisioningStatus::parse(&product.provisioning_status);
        if status.is_gone() {
            info!("{} ({}) is {}, treating as deleted", id, identifier, status);
            return Ok(State::not_found(id.clone()));
        }

        Ok(State::existing(id.clone(), flatten(kind, &product)).with_identifier(identifier))
    }

    /// Send the mutable attributes, then read back
    pub async fn update_connection(
        &self,
        id: &ResourceId,
        identifier: &str,
        to: &Resource,
    ) -> MegaportResult<State> {
        let declared = DeclaredVxc::from_resource(to)?;
        let update = declared.update_request();
        debug!("updating {} ({}): {}", id, identifier, to_wire(&update));
        self.client.update_vxc(identifier, &update).await?;

        let state = self.read_connection(id, identifier).await?;
        if !state.exists {
            return Err(MegaportError::NotFound(format!("product {}", identifier)));
        }
        info!("updated {} ({})", id, identifier);
        Ok(state)
    }

    /// Cancel the VXC. A product that is already gone counts as deleted.
    pub async fn delete_connection(&self, id: &ResourceId, identifier: &str) -> MegaportResult<()> {
        match self.client.cancel_product(identifier).await {
            Ok(()) => {
                info!("cancelled {} ({})", id, identifier);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                info!("{} ({}) not found, delete is a no-op", id, identifier);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn partial_failure(id: &ResourceId, identifier: String, source: MegaportError) -> MegaportError {
    warn!(
        "{} was ordered as {} but could not be read back: {}",
        id, identifier, source
    );
    MegaportError::PartialFailure {
        identifier,
        source: Box::new(source),
    }
}

//! Megaport API client
//!
//! Thin request/response wrapper around the v2 API. It keeps no state
//! between calls and never retries; every failure is returned to the caller.
//! The client is cheap to clone and safe to share between tasks.

use log::debug;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{ApiResponse, CreatedProduct, Product, VxcOrder, VxcUpdate};
use crate::config::MegaportConfig;
use crate::error::{MegaportError, MegaportResult};

#[derive(Debug, Clone)]
pub struct MegaportClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl MegaportClient {
    pub fn new(config: &MegaportConfig) -> MegaportResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MegaportError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.api_endpoint.clone(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dry-run an order. Every non-success answer, including "could not
    /// find" for an unreachable partner port, comes back as `Validation`.
    pub async fn validate_order(&self, order: &[VxcOrder]) -> MegaportResult<()> {
        let request = self
            .request(Method::POST, "/v2/networkdesign/validate")
            .json(order);
        let (status, body) = self.execute(request, "order validation").await?;
        if status.is_success() {
            return Ok(());
        }
        Err(MegaportError::Validation {
            status: status.as_u16(),
            body,
        })
    }

    /// Place an order and return the descriptors of the created objects
    pub async fn buy_order(&self, order: &[VxcOrder]) -> MegaportResult<Vec<CreatedProduct>> {
        let request = self.request(Method::POST, "/v2/networkdesign/buy").json(order);
        self.fetch(request, "order").await
    }

    pub async fn get_product(&self, uid: &str) -> MegaportResult<Product> {
        let request = self.request(Method::GET, &format!("/v2/product/{}", uid));
        self.fetch(request, &format!("product {}", uid)).await
    }

    pub async fn update_vxc(&self, uid: &str, update: &VxcUpdate) -> MegaportResult<()> {
        let request = self
            .request(Method::PUT, &format!("/v2/product/vxc/{}", uid))
            .json(update);
        self.send(request, &format!("product {}", uid)).await?;
        Ok(())
    }

    /// Cancel a product immediately. Removal completes asynchronously.
    pub async fn cancel_product(&self, uid: &str) -> MegaportResult<()> {
        let request = self.request(
            Method::POST,
            &format!("/v2/product/{}/action/CANCEL_NOW", uid),
        );
        self.send(request, &format!("product {}", uid)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode the `data` member of the response envelope
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> MegaportResult<T> {
        let body = self.send(request, what).await?;
        decode_envelope(&body, what)
    }

    /// Send and return the raw body of a successful response
    async fn send(&self, request: RequestBuilder, what: &str) -> MegaportResult<String> {
        let (status, body) = self.execute(request, what).await?;
        if status.is_success() {
            return Ok(body);
        }
        if is_not_found(status, &body) {
            return Err(MegaportError::NotFound(what.to_string()));
        }
        Err(MegaportError::Remote {
            status: status.as_u16(),
            body,
        })
    }

    /// Send without classifying the status
    async fn execute(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> MegaportResult<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> HTTP {}", what, status.as_u16());
        Ok((status, body))
    }
}

/// The API answers 404 for unknown paths, but 400 with a "could not find"
/// message for unknown product UIDs.
fn is_not_found(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NOT_FOUND
        || (status == StatusCode::BAD_REQUEST
            && body.to_ascii_lowercase().contains("could not find"))
}

fn decode_envelope<T: DeserializeOwned>(body: &str, what: &str) -> MegaportResult<T> {
    serde_json::from_str::<ApiResponse<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|source| MegaportError::Decode {
            context: what.to_string(),
            source,
        })
}

/// Serialize a payload the same way the client would send it (for logging)
pub fn to_wire<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_default()
}

//! Provider configuration
//!
//! Values come from the provider block handed over by the host, falling back
//! to the `MEGAPORT_*` environment variables.

use std::collections::HashMap;
use std::time::Duration;

use xconnect_core::Value;

use crate::error::{MegaportError, MegaportResult};

pub const ENDPOINT_PRODUCTION: &str = "https://api.megaport.com";
pub const ENDPOINT_STAGING: &str = "https://api-staging.megaport.com";

pub const ENV_TOKEN: &str = "MEGAPORT_TOKEN";
pub const ENV_API_ENDPOINT: &str = "MEGAPORT_API_ENDPOINT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Megaport API
#[derive(Debug, Clone, PartialEq)]
pub struct MegaportConfig {
    /// Base URL without trailing slash (e.g., "https://api.megaport.com")
    pub api_endpoint: String,
    /// Bearer token; requests go out unauthenticated when unset
    pub token: Option<String>,
    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl Default for MegaportConfig {
    fn default() -> Self {
        Self {
            api_endpoint: ENDPOINT_PRODUCTION.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MegaportConfig {
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: normalize_endpoint(&api_endpoint.into()),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from the environment only
    pub fn from_env() -> MegaportResult<Self> {
        Self::resolve(&HashMap::new(), |key| std::env::var(key).ok())
    }

    /// Build from a provider block, e.g.
    /// `{ api_endpoint = "...", token = "...", timeout_secs = 30 }`
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> MegaportResult<Self> {
        Self::resolve(attributes, |key| std::env::var(key).ok())
    }

    fn resolve(
        attributes: &HashMap<String, Value>,
        env: impl Fn(&str) -> Option<String>,
    ) -> MegaportResult<Self> {
        let api_endpoint = match attributes.get("api_endpoint") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(MegaportError::Config("api_endpoint must be a string".into())),
            None => env(ENV_API_ENDPOINT).unwrap_or_else(|| ENDPOINT_PRODUCTION.to_string()),
        };
        if !api_endpoint.starts_with("http://") && !api_endpoint.starts_with("https://") {
            return Err(MegaportError::Config(format!(
                "api_endpoint '{}' is not an http(s) URL",
                api_endpoint
            )));
        }

        let token = match attributes.get("token") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(MegaportError::Config("token must be a string".into())),
            None => env(ENV_TOKEN),
        }
        .filter(|t| !t.is_empty());

        let timeout = match attributes.get("timeout_secs") {
            Some(Value::Int(secs)) if *secs > 0 => Duration::from_secs(*secs as u64),
            Some(_) => {
                return Err(MegaportError::Config(
                    "timeout_secs must be a positive integer".into(),
                ));
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_endpoint: normalize_endpoint(&api_endpoint),
            token,
            timeout,
        })
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_production() {
        let config = MegaportConfig::resolve(&HashMap::new(), no_env).unwrap();
        assert_eq!(config.api_endpoint, ENDPOINT_PRODUCTION);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn falls_back_to_environment() {
        let env = |key: &str| match key {
            ENV_API_ENDPOINT => Some(format!("{}/", ENDPOINT_STAGING)),
            ENV_TOKEN => Some("env-token".to_string()),
            _ => None,
        };
        let config = MegaportConfig::resolve(&HashMap::new(), env).unwrap();
        assert_eq!(config.api_endpoint, ENDPOINT_STAGING);
        assert_eq!(config.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn attributes_take_precedence() {
        let mut attrs = HashMap::new();
        attrs.insert("token".to_string(), Value::String("block-token".into()));
        attrs.insert("timeout_secs".to_string(), Value::Int(5));
        attrs.insert(
            "api_endpoint".to_string(),
            Value::String("http://localhost:8080".into()),
        );
        let env = |_: &str| Some("https://env.example".to_string());

        let config = MegaportConfig::resolve(&attrs, env).unwrap();
        assert_eq!(config.api_endpoint, "http://localhost:8080");
        assert_eq!(config.token.as_deref(), Some("block-token"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let mut attrs = HashMap::new();
        attrs.insert("api_endpoint".to_string(), Value::String("ftp://x".into()));
        assert!(MegaportConfig::resolve(&attrs, no_env).is_err());

        let mut attrs = HashMap::new();
        attrs.insert("timeout_secs".to_string(), Value::Int(0));
        assert!(MegaportConfig::resolve(&attrs, no_env).is_err());
    }

    #[test]
    fn empty_token_is_unset() {
        let mut attrs = HashMap::new();
        attrs.insert("token".to_string(), Value::String(String::new()));
        let config = MegaportConfig::resolve(&attrs, no_env).unwrap();
        assert_eq!(config.token, None);
    }
}

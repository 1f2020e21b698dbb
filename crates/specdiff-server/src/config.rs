use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use specdiff_sdk::CompareConfig;

use crate::error::{ServerError, ServerResult};

/// Server settings, loadable from TOML.
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// max_document_bytes = 1048576
///
/// [compare]
/// resolve_refs = true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted `previous` or `current` document, in bytes.
    pub max_document_bytes: usize,
    /// Send permissive CORS headers so browser front ends can call the API.
    pub allow_cors: bool,
    /// Defaults for every comparison; a request may override `resolve_refs`.
    pub compare: CompareConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_document_bytes: 10 * 1024 * 1024,
            allow_cors: true,
            compare: CompareConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Request body limit: both documents at full size plus envelope.
    pub fn body_limit(&self) -> usize {
        self.max_document_bytes
            .saturating_mul(2)
            .saturating_add(64 * 1024)
    }
}

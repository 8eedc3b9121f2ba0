//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"0.0.0.0"`).
    pub host: String,
    /// Port to bind (default `8001`).
    pub port: u16,
    /// Hard cap on user input size in bytes; larger requests are
    /// rejected with 400.
    pub max_input_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8001,
            max_input_bytes: 4096,
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

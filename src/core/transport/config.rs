//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    pub host: String,

    /// Path for the JSON-RPC endpoint.
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_*` overrides on top of the defaults.
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("MCP_HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            host: std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            rpc_path: std::env::var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path),
            enable_cors: std::env::var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

impl TransportConfig {
    /// Load transport config from `MCP_TRANSPORT` (`stdio` or `http`).
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(matches!(TransportConfig::default(), TransportConfig::Stdio));
        assert_eq!(
            TransportConfig::default().description(),
            "STDIO (standard MCP mode)"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_description() {
        let config = TransportConfig::Http(HttpConfig::default());
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8080/mcp");
    }
}

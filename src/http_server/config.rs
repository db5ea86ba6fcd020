//! HTTP Server Configuration
//!
//! Host, port and CORS settings.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty, or containing "*", allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    /// Every CORS origin must be `*` or `http(s)://host[:port]`
    pub fn validate(&self) -> Result<(), String> {
        for origin in &self.cors_origins {
            if origin != "*" && !is_valid_origin(origin) {
                return Err(format!("invalid CORS origin {:?}", origin));
            }
        }
        Ok(())
    }
}

fn is_valid_origin(origin: &str) -> bool {
    let authority = match origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    !authority.is_empty()
        && !authority.contains('/')
        && !authority.chars().any(char::is_whitespace)
        && origin.parse::<HeaderValue>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_explicit_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["https://dashboard.example.org".into()],
            ..Default::default()
        };
        assert!(!config.allows_any_origin());

        let wildcard = HttpServerConfig {
            cors_origins: vec!["*".into()],
            ..Default::default()
        };
        assert!(wildcard.allows_any_origin());
    }

    #[test]
    fn test_validate_origins() {
        let config = HttpServerConfig {
            cors_origins: vec![
                "*".into(),
                "http://localhost:5173".into(),
                "https://dashboard.example.org".into(),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(HttpServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_origins_rejected() {
        for origin in [
            "localhost:5173",
            "http://",
            "http://localhost:5173/",
            "https://dash board.example.org",
            "http://exa\u{7f}mple.org",
        ] {
            let config = HttpServerConfig {
                cors_origins: vec![origin.to_string()],
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.contains("CORS"), "{}", origin);
        }
    }
}

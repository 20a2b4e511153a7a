//! Configuration settings structures
//!
//! Defines the TOML-backed configuration for the Outpost server. The listen
//! address is the only external configuration point of the core; logging
//! behavior is controlled from the command line and `RUST_LOG`.

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// This is the root configuration object, serialized to/from TOML.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Server-specific settings
    pub server: ServerSettings,
}

/// Server configuration settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerSettings {
    /// Network address to bind the server to
    ///
    /// Format: "IP:PORT" (e.g., "127.0.0.1:1234" for localhost,
    /// "0.0.0.0:1234" for all interfaces)
    pub listen_addr: String,
}

impl Default for Config {
    /// Default configuration suitable for local development
    fn default() -> Self {
        Self {
            server: ServerSettings {
                listen_addr: "127.0.0.1:1234".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:1234");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.server.listen_addr, deserialized.server.listen_addr);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
[server]
listen_addr = "0.0.0.0:9090"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9090");
    }
}

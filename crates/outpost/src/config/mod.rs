//! Configuration module for the Outpost server
//!
//! This module handles command-line arguments and configuration file
//! parsing, and provides default settings for the server.

pub mod args;
pub mod settings;

pub use args::Args;
pub use settings::{Config, ServerSettings};

use anyhow::Result;
use tracing::{info, warn};

/// Load configuration from file or create default configuration
///
/// Attempts to load configuration from the specified file. If the file
/// doesn't exist, a default configuration file is created and the defaults
/// are returned.
///
/// # Errors
/// * Returns error if file I/O operations fail
/// * Returns error if TOML parsing fails
pub async fn load_config(args: &Args) -> Result<Config> {
    if args.config.exists() {
        let config_str = tokio::fs::read_to_string(&args.config).await?;
        match toml::de::from_str::<Config>(&config_str) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to parse config file {}: {}", args.config.display(), e);
                Err(e.into())
            }
        }
    } else {
        warn!("Configuration file not found: {}, using defaults", args.config.display());

        // Create default config file
        let default_config = Config::default();
        let config_str = toml::to_string_pretty(&default_config)?;
        tokio::fs::write(&args.config, config_str).await?;
        info!("Created default configuration file: {}", args.config.display());

        Ok(default_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_config_creates_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        // Delete the file to test default creation
        drop(temp_file);

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:1234");
        assert!(args.config.exists());

        std::fs::remove_file(&args.config).ok();
    }

    #[tokio::test]
    async fn test_load_config_existing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[server]
listen_addr = "0.0.0.0:9090"
        "#;

        temp_file.write_all(config_content.as_bytes()).unwrap();

        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9090");
    }

    #[tokio::test]
    async fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[server\nlisten_addr = nonsense").unwrap();

        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        assert!(load_config(&args).await.is_err());
    }
}

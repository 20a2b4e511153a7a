//! Command-line argument parsing
//!
//! This module defines the command-line interface for the Outpost server
//! using the clap crate for argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Outpost server
///
/// These arguments allow users to override configuration file settings
/// and control server behavior from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    ///
    /// Specifies the path to the TOML configuration file.
    /// If the file doesn't exist, a default configuration will be created.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Server listen address
    ///
    /// Override the listen address from the configuration file.
    /// Format: "IP:PORT" (e.g., "127.0.0.1:1234" or "0.0.0.0:3000")
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Enable debug logging
    ///
    /// When enabled, sets the logging level to debug, providing more
    /// detailed output for troubleshooting.
    #[arg(short, long)]
    pub debug: bool,

    /// Emit logs as structured JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.toml"),
            listen: None,
            debug: false,
            json_log: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::default();
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(!args.debug);
        assert!(!args.json_log);
        assert!(args.listen.is_none());
    }
}

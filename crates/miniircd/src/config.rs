use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::constants::SERVER_NAME;
use crate::errors::ServerError;

/// Startup configuration: what to bind to and how to identify ourselves.
///
/// This is pure process configuration, read once before the listener binds.
/// It is never re-read or mutated at runtime, and none of it is persisted
/// client/channel state — the server's registries always start empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_name: String,
    pub motd: String,
    pub bind_address: String,
    pub port: u16,
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_name: SERVER_NAME.to_string(),
            motd: "Welcome to the mini IRC server!".to_string(),
            bind_address: "::".to_string(),
            port: 6667,
            max_connections: 4096,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ServerError::Config {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        toml::from_str(&content).map_err(|e| ServerError::Config {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    }
}

/// Command-line flags. Anything left unset falls back to the config file,
/// and anything absent from both falls back to [`Config::default`].
#[derive(Debug, Parser)]
#[command(name = "miniircd", about = "A minimal IRC server")]
pub struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (default 6667).
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind to (default "::", dual-stack IPv6+IPv4).
    #[arg(long)]
    pub bind: Option<String>,
}

impl Cli {
    /// Resolve CLI flags, an optional config file, and built-in defaults
    /// into one effective [`Config`], CLI flags taking precedence.
    pub fn resolve(self) -> Result<Config, ServerError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 6667);
        assert_eq!(config.server_name, "miniircd");
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli {
            config: None,
            port: Some(7000),
            bind: Some("0.0.0.0".to_string()),
        };
        let config = cli.resolve().unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.bind_address, "0.0.0.0");
    }
}

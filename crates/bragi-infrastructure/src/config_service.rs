//! Configuration service implementation.
//!
//! Loads the server configuration from `~/.config/bragi/config.toml` (or an
//! explicit path) and fills in defaults for everything the file leaves out.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use bragi_core::error::{BragiError, Result};
use serde::{Deserialize, Serialize};

use crate::paths::BragiPaths;

/// Port the browser client expects the backend on.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration as stored in `config.toml`.
///
/// ```toml
/// bind = "127.0.0.1:3000"
/// scenarios_dir = "/srv/bragi/scenarios"
/// log_dir = "/var/log/bragi"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
    /// Directory holding one JSON file per scenario.
    /// Falls back to the platform data directory when unset.
    pub scenarios_dir: Option<PathBuf>,
    /// Directory for rolling log files. Console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            scenarios_dir: None,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Returns the configured scenarios directory, or the platform default.
    pub fn resolved_scenarios_dir(&self) -> Result<PathBuf> {
        match &self.scenarios_dir {
            Some(dir) => Ok(dir.clone()),
            None => BragiPaths::scenarios_dir().map_err(|e| BragiError::config(e.to_string())),
        }
    }
}

/// Loads [`ServerConfig`] from TOML.
pub struct ConfigService;

impl ConfigService {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// config file is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<ServerConfig> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = match BragiPaths::config_file() {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!("[ConfigService] {}, using defaults", e);
                        return Ok(ServerConfig::default());
                    }
                };
                if default_path.exists() {
                    Self::load_file(&default_path)
                } else {
                    tracing::debug!(
                        "[ConfigService] No config at {:?}, using defaults",
                        default_path
                    );
                    Ok(ServerConfig::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<ServerConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BragiError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: ServerConfig = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), DEFAULT_PORT);
        assert!(config.bind.ip().is_loopback());
        assert!(config.scenarios_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "scenarios_dir = \"/tmp/bragi-scenarios\"\n").unwrap();

        let config = ConfigService::load(Some(&path)).unwrap();
        assert_eq!(config.bind.port(), DEFAULT_PORT);
        assert_eq!(
            config.resolved_scenarios_dir().unwrap(),
            PathBuf::from("/tmp/bragi-scenarios")
        );
    }

    #[test]
    fn test_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "bind = \"0.0.0.0:8080\"\nscenarios_dir = \"data\"\nlog_dir = \"logs\"\n",
        )
        .unwrap();

        let config = ConfigService::load(Some(&path)).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigService::load(Some(&temp_dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, BragiError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "bind = 42").unwrap();

        assert!(matches!(
            ConfigService::load(Some(&path)).unwrap_err(),
            BragiError::Config(_)
        ));
    }
}

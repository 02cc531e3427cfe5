//! Unified path management for bragi files.
//!
//! All paths are resolved via AppPaths from the version-migrate crate so that
//! every platform (Linux, macOS, Windows) gets its native layout.

use std::path::PathBuf;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for bragi.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/bragi/             # Config directory (AppPaths default)
/// ├── config.toml              # Server configuration
/// └── logs/                    # Server logs
///     └── bragi-server.log.YYYY-MM-DD
///
/// ~/.local/share/bragi/        # Data directory
/// └── scenarios/               # One <id>.json per scenario
/// ```
pub struct BragiPaths;

impl BragiPaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("bragi")
    }

    /// Returns the bragi configuration directory (e.g., `~/.config/bragi/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the bragi data directory (e.g., `~/.local/share/bragi/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to the server configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory holding scenario documents.
    pub fn scenarios_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("scenarios"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = BragiPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = BragiPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
        assert!(config_dir.ends_with("bragi"));
    }

    #[test]
    fn test_scenarios_dir() {
        let scenarios_dir = BragiPaths::scenarios_dir().unwrap();
        assert!(scenarios_dir.ends_with("scenarios"));
        let data_dir = BragiPaths::data_dir().unwrap();
        assert!(scenarios_dir.starts_with(&data_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = BragiPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::PlannerConfig;

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Directory holding config.toml and preferences.json, respecting
/// XDG_CONFIG_HOME.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    base.join("lifegrid")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Read the planner config. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    if !path.exists() {
        return Ok(PlannerConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::IdStrategy;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = read_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ids]\nstrategy = \"timestamp\"\n\n[log]\nlevel = \"debug\"\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.ids.strategy, IdStrategy::Timestamp);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\ntimezone = ").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}

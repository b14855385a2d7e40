use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A tiny persisted key-value store backed by one JSON object file.
///
/// Only the dark-mode preference lives here; nothing else survives a restart.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Open the store at `path`. A missing or malformed file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring malformed preferences: {}", e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferencesError::ReadError { path, source }),
        };
        Ok(Preferences { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Set a key and write the whole store back to disk.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }

    /// Saved dark-mode choice, if any
    pub fn dark_mode(&self) -> Option<bool> {
        self.get(DARK_MODE_KEY).and_then(Value::as_bool)
    }

    /// Saved choice, or `fallback` when nothing has been saved
    pub fn dark_mode_or(&self, fallback: bool) -> bool {
        self.dark_mode().unwrap_or(fallback)
    }

    pub fn set_dark_mode(&mut self, on: bool) -> Result<(), PreferencesError> {
        self.set(DARK_MODE_KEY, Value::Bool(on))
    }

    fn save(&self) -> Result<(), PreferencesError> {
        let content = serde_json::to_string_pretty(&self.values)?;
        let write_err = |source| PreferencesError::WriteError {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(write_err)
    }
}

pub fn default_preferences_path(config_dir: &Path) -> PathBuf {
    config_dir.join("preferences.json")
}

/// Write `content` to a temp file beside `path`, then rename over it.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

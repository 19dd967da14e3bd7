//! Saved form defaults.
//!
//! Remembers the last submitted non-secret inputs so the interactive form
//! can prefill them. The store is an append-only history in a TOML file;
//! the latest entry is the one with the highest id. Inputs are a free-form
//! map, so every key naming a catalogued secret or the runner token secret
//! is dropped before writing.
//!
//! ```toml
//! next_id = 3
//!
//! [[entries]]
//! id = 1
//! saved_at = "2026-10-16T09:12:44Z"
//!
//! [entries.inputs]
//! NEW_HOST = "node1"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::fields;
use crate::core::types::InputKey;
use crate::error::{DefaultsError, Result};

/// One saved snapshot of form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsRecord {
    /// Auto-increment id, unique within the store
    pub id: u64,
    /// When the snapshot was saved
    pub saved_at: DateTime<Utc>,
    /// Non-secret input values
    #[serde(default)]
    pub inputs: BTreeMap<InputKey, String>,
}

impl DefaultsRecord {
    /// Saved value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inputs.get(key).map(String::as_str)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct History {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    entries: Vec<DefaultsRecord>,
}

/// File-backed defaults history.
///
/// Each call opens the file, does one read or one write, and releases it.
#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
    secret_names: Vec<String>,
}

impl DefaultsStore {
    /// Store backed by `path`. The file is created on first save.
    ///
    /// The default runner token secret name is always treated as secret.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            secret_names: vec![constants::DEFAULT_RUNNER_TOKEN_SECRET.to_string()],
        }
    }

    /// Also drop `name` (case-insensitive) from saved inputs.
    pub fn with_secret(mut self, name: impl Into<String>) -> Self {
        self.secret_names.push(name.into());
        self
    }

    fn is_secret(&self, key: &str) -> bool {
        fields::is_secret(key) || self.secret_names.iter().any(|n| n.eq_ignore_ascii_case(key))
    }

    /// Store at the default location (`<data_dir>/sealpost/defaults.toml`).
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError::NoDataDir` if the platform data dir is unknown.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Default store path.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError::NoDataDir` if the platform data dir is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or(DefaultsError::NoDataDir)?;
        Ok(base.join(constants::DATA_DIR).join(constants::DEFAULTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<History> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no defaults saved yet");
            return Ok(History::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(DefaultsError::ReadFailed)?;
        let history: History = toml::from_str(&contents).map_err(DefaultsError::Parse)?;

        debug!(entries = history.entries.len(), "defaults loaded");
        Ok(history)
    }

    fn write(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(DefaultsError::WriteFailed)?;
            }
        }

        let contents = toml::to_string_pretty(history).map_err(DefaultsError::Serialize)?;
        fs::write(&self.path, contents).map_err(DefaultsError::WriteFailed)?;

        Ok(())
    }

    /// Most recently saved record (highest id).
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError` if the file exists but cannot be read or parsed.
    pub fn latest(&self) -> Result<Option<DefaultsRecord>> {
        let history = self.read()?;
        Ok(history.entries.into_iter().max_by_key(|e| e.id))
    }

    /// All saved records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError` if the file exists but cannot be read or parsed.
    pub fn history(&self) -> Result<Vec<DefaultsRecord>> {
        let mut entries = self.read()?.entries;
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    /// Append a snapshot of `inputs` and return its id.
    ///
    /// Keys that name a catalogued secret or a registered secret name are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError` if the history cannot be read or written.
    pub fn save(&self, inputs: &BTreeMap<InputKey, String>) -> Result<u64> {
        let mut history = self.read()?;

        let max_id = history.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let id = history.next_id.max(max_id + 1);

        let inputs: BTreeMap<InputKey, String> = inputs
            .iter()
            .filter(|(key, _)| {
                let secret = self.is_secret(key);
                if secret {
                    warn!(key = %key, "not saving secret field to defaults");
                }
                !secret
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        history.entries.push(DefaultsRecord {
            id,
            saved_at: Utc::now(),
            inputs,
        });
        history.next_id = id + 1;

        self.write(&history)?;

        debug!(id, path = %self.path.display(), "defaults saved");
        Ok(id)
    }
}

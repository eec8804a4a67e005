//! JSON file-based preference backend.
//!
//! Keeps the whole file in memory and rewrites it on every change using an
//! atomic write (write to a temporary file, then rename), so a crash never
//! leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "preferences": {
//!     "foodlens-theme": { "value": "light", "updated_at": 1760000000 }
//!   }
//! }
//! ```

use crate::domain::error::{FoodlensError, Result};
use crate::storage::backend::PreferenceStore;
use crate::storage::models::PreferenceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    #[serde(default)]
    preferences: BTreeMap<String, PreferenceRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            preferences: BTreeMap::new(),
        }
    }
}

/// JSON file preference store.
pub struct JsonPreferences {
    file_path: PathBuf,
    data: StorageData,

    /// Set when `data` has changes not yet written.
    dirty: bool,
}

impl JsonPreferences {
    /// Opens the store at `file_path`, loading it if it exists.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or the file
    /// exists but cannot be read or parsed.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening preference store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preference file yet");
            StorageData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Starts an empty store at `file_path` without reading it.
    ///
    /// The next write replaces whatever the file held.
    #[must_use]
    pub fn fresh(file_path: PathBuf) -> Self {
        Self {
            file_path,
            data: StorageData::default(),
            dirty: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| FoodlensError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version != FORMAT_VERSION {
            tracing::debug!(version = data.version, "preference file has a different format version");
        }

        tracing::debug!(entries = data.preferences.len(), "loaded preferences");
        Ok(data)
    }

    /// Writes pending changes with an atomic replace.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FoodlensError::Storage(format!("failed to serialize preferences: {e}")))?;

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn get(&self, key: &str) -> Result<Option<PreferenceRecord>> {
        let _span = tracing::debug_span!("json_get_preference", key = %key).entered();

        let record = self.data.preferences.get(key).cloned();
        tracing::debug!(found = record.is_some(), "preference lookup complete");
        Ok(record)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_preference", key = %key, value = %value).entered();

        self.data.preferences.insert(key.to_string(), PreferenceRecord::new(value));
        self.data.version = FORMAT_VERSION;
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonPreferences {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}

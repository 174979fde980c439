//! JSON key-value persistence.
//!
//! Each logical store lives under one key, serialized as a whole JSON array
//! at `<data_dir>/<key>.json`. Writes always replace the entire value; there
//! are no partial updates and no transactions across keys.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FaithcalResult;

/// Key holding the active personal events.
pub const PERSONAL_EVENTS_KEY: &str = "personalEvents";
/// Key holding the audit log entries.
pub const AUDIT_LOGS_KEY: &str = "auditLogs";
/// Key holding the persisted tradition filter.
pub const SELECTED_TRADITIONS_KEY: &str = "selectedReligions";

/// Whole-value JSON storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Storage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the collection stored under `key`.
    ///
    /// A missing key yields an empty collection. Malformed data is discarded
    /// (with a warning) rather than propagated, so a corrupt file never
    /// blocks startup.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.path_for(key);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    "discarding malformed data under '{key}' ({}): {e}",
                    path.display()
                );
                Vec::new()
            }
        }
    }

    /// Replace the collection stored under `key` with `values`.
    pub fn save<T: Serialize>(&self, key: &str, values: &[T]) -> FaithcalResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(values)?;
        std::fs::write(self.path_for(key), contents)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

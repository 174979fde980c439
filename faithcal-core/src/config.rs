//! Global faithcal configuration.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{FaithcalError, FaithcalResult};

static DEFAULT_DATA_PATH: &str = "~/.local/share/faithcal";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

fn default_grace_secs() -> u64 {
    crate::store::DEFAULT_GRACE_WINDOW.as_secs()
}

/// Global configuration at ~/.config/faithcal/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Where the persisted event/audit state lives
    #[serde(
        default = "default_data_path",
        skip_serializing_if = "is_default_data_path"
    )]
    pub data_dir: PathBuf,

    /// Undo grace window for deleted events, in seconds
    #[serde(default = "default_grace_secs")]
    pub undo_grace_secs: u64,
}

impl AppConfig {
    /// Load the config, creating a commented default file on first run.
    pub fn load() -> FaithcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: AppConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| FaithcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FaithcalError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn config_path() -> FaithcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FaithcalError::Config("Could not determine config directory".into()))?
            .join("faithcal");

        Ok(config_dir.join("config.toml"))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn grace_window(&self) -> Duration {
        Duration::from_secs(self.undo_grace_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> FaithcalResult<()> {
        let contents = format!(
            "\
# faithcal configuration

# Where persisted events and the audit log live:
# data_dir = \"{}\"

# How many seconds a deleted event can be undone:
# undo_grace_secs = {}
",
            DEFAULT_DATA_PATH,
            default_grace_secs()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FaithcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| FaithcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

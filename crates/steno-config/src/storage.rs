use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_history_file() -> String {
    "exercise_history.json".to_string()
}

fn default_settings_file() -> String {
    "settings.json".to_string()
}

/// Where exercise history and settings are persisted
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let data_dir = env::var("STENO_DATA_DIR").unwrap_or_else(|_| default_data_dir());

        Self {
            data_dir,
            ..Self::default()
        }
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.history_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.settings_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_file: default_history_file(),
            settings_file: default_settings_file(),
        }
    }
}

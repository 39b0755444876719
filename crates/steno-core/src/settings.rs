use std::fs;
use std::path::{Path, PathBuf};

use steno_types::ExerciseSettings;

use crate::error::StoreError;

/// Persisted exercise settings, `[exercise_size, [lessons...]]` on disk.
pub struct SettingsStore {
    path: PathBuf,
    settings: ExerciseSettings,
}

impl SettingsStore {
    /// Open the settings at `path`, using `defaults` when the file is missing
    /// or unreadable.
    pub fn open(path: impl Into<PathBuf>, defaults: ExerciseSettings) -> Self {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<ExerciseSettings>(&data) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    tracing::warn!("Settings at {} are corrupt, using defaults: {e}", path.display());
                    defaults
                }
            },
            Err(_) => defaults,
        };
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &ExerciseSettings {
        &self.settings
    }

    /// Replace the settings and persist them. Returns whether they changed.
    pub fn save(&mut self, settings: ExerciseSettings) -> Result<bool, StoreError> {
        let settings = settings.sanitized();
        let changed = settings != self.settings;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&settings)?)?;
        tracing::info!(
            "Saved settings: {} words from {:?}",
            settings.exercise_size,
            settings.enabled_lessons
        );

        self.settings = settings;
        Ok(changed)
    }
}

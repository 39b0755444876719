use std::fs;
use std::path::{Path, PathBuf};

use steno_types::ExerciseResult;

use crate::error::StoreError;

/// Append-only log of finished exercises, persisted whole after each change.
pub struct HistoryStore {
    path: PathBuf,
    results: Vec<ExerciseResult>,
}

impl HistoryStore {
    /// Open the history at `path`. A missing or unreadable file is an empty
    /// history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let results = load(&path);
        Self { path, results }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn results(&self) -> &[ExerciseResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn append(&mut self, result: ExerciseResult) -> Result<(), StoreError> {
        self.results.push(result);
        self.save()
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.results.clear();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.results)?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            "Saved {} exercises to {}",
            self.results.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn load(path: &Path) -> Vec<ExerciseResult> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::info!("No exercise history at {} ({e}), starting empty", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<ExerciseResult>>(&data) {
        Ok(results) => {
            tracing::info!("Loaded {} exercises from {}", results.len(), path.display());
            results
        }
        Err(e) => {
            tracing::warn!("Exercise history at {} is corrupt, starting empty: {e}", path.display());
            Vec::new()
        }
    }
}

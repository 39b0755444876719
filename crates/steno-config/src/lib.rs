use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::exercise::ExerciseConfig;
use self::storage::StorageConfig;

pub mod dictionary;
pub mod exercise;
pub mod storage;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub storage: StorageConfig,
    pub exercise: ExerciseConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::new(),
            storage: StorageConfig::new(),
            exercise: ExerciseConfig::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "dictionary": { "additional_paths": ["user.json"] } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.dictionary.path, "main.json");
        assert_eq!(
            config.dictionary.all_paths().collect::<Vec<_>>(),
            vec!["main.json", "user.json"]
        );
        assert_eq!(config.storage.history_file, "exercise_history.json");
        assert_eq!(config.exercise.default_size, 20);
    }

    #[test]
    fn test_storage_paths_join_data_dir() {
        let storage = StorageConfig {
            data_dir: "/tmp/steno".into(),
            ..StorageConfig::default()
        };
        assert_eq!(
            storage.history_path(),
            std::path::PathBuf::from("/tmp/steno/exercise_history.json")
        );
        assert_eq!(
            storage.settings_path(),
            std::path::PathBuf::from("/tmp/steno/settings.json")
        );
    }

    #[test]
    fn test_default_settings_are_sanitized() {
        let exercise = ExerciseConfig {
            default_size: 0,
            default_lessons: vec![],
            ..ExerciseConfig::default()
        };
        let settings = exercise.default_settings();
        assert_eq!(settings.exercise_size, 1);
        assert_eq!(settings.enabled_lessons, vec![steno_types::FALLBACK_LESSON.to_string()]);
    }
}

use std::path::Path;

use anyhow::Context;
use steno_config::Config;
use steno_core::{DictionaryLoader, ExerciseGenerator, HistoryStore, LessonTable, SettingsStore};

pub struct AppState {
    pub config: Config,
    pub generator: ExerciseGenerator<LessonTable>,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn load(config: Config) -> anyhow::Result<Self> {
        let dictionary = DictionaryLoader::load_configured(&config.dictionary)
            .context("loading steno dictionaries")?;
        let lessons = LessonTable::load_from_file(Path::new(&config.exercise.lessons_path))
            .context("loading lessons")?;
        let history = HistoryStore::open(config.storage.history_path());
        let settings = SettingsStore::open(
            config.storage.settings_path(),
            config.exercise.default_settings(),
        );

        Ok(Self {
            generator: ExerciseGenerator::new(dictionary, lessons, history),
            settings,
            config,
        })
    }
}

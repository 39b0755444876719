use std::env;

use serde::{Deserialize, Serialize};
use steno_types::{ExerciseSettings, FALLBACK_LESSON};

fn default_size() -> usize {
    20
}

fn default_lessons() -> Vec<String> {
    vec![FALLBACK_LESSON.to_string()]
}

fn default_lessons_path() -> String {
    "lessons.json".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ExerciseConfig {
    /// Words per exercise until the user saves their own settings
    #[serde(default = "default_size")]
    pub default_size: usize,
    #[serde(default = "default_lessons")]
    pub default_lessons: Vec<String>,
    /// Lesson catalog (lesson name -> words)
    #[serde(default = "default_lessons_path")]
    pub lessons_path: String,
}

impl ExerciseConfig {
    pub fn new() -> Self {
        let default_size = env::var("STENO_EXERCISE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_size);

        let lessons_path = env::var("STENO_LESSONS").unwrap_or_else(|_| default_lessons_path());

        Self {
            default_size,
            default_lessons: default_lessons(),
            lessons_path,
        }
    }

    pub fn default_settings(&self) -> ExerciseSettings {
        ExerciseSettings::new(self.default_size, self.default_lessons.clone()).sanitized()
    }
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            default_size: default_size(),
            default_lessons: default_lessons(),
            lessons_path: default_lessons_path(),
        }
    }
}

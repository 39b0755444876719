use std::path::Path;

use crate::error::LoadError;

/// Named word lists exercises are drawn from
pub trait LessonCatalog {
    /// Words of a lesson in order, None if the lesson does not exist
    fn lesson_words(&self, name: &str) -> Option<&[String]>;

    /// Lesson names in catalog order
    fn lesson_names(&self) -> Vec<&str>;
}

/// Lesson catalog backed by an ordered table
#[derive(Debug, Clone, Default)]
pub struct LessonTable {
    lessons: Vec<(String, Vec<String>)>,
}

impl LessonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lessons<I, N, W>(lessons: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<W>)>,
        N: Into<String>,
        W: Into<String>,
    {
        Self {
            lessons: lessons
                .into_iter()
                .map(|(name, words)| (name.into(), words.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Load from a JSON object mapping lesson name to an array of words
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let data: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_str)?;

        let mut lessons = Vec::with_capacity(data.len());
        for (name, words) in data {
            let words: Vec<String> = serde_json::from_value(words).map_err(|e| {
                LoadError::InvalidFormat(format!("lesson {name} is not a list of words: {e}"))
            })?;
            lessons.push((name, words));
        }

        Ok(Self { lessons })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading lessons from file: {}", path.display());
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        tracing::info!("Loaded {} lessons", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

impl LessonCatalog for LessonTable {
    fn lesson_words(&self, name: &str) -> Option<&[String]> {
        self.lessons
            .iter()
            .find(|(lesson, _)| lesson == name)
            .map(|(_, words)| words.as_slice())
    }

    fn lesson_names(&self) -> Vec<&str> {
        self.lessons.iter().map(|(name, _)| name.as_str()).collect()
    }
}

use std::collections::HashMap;
use std::path::Path;

use steno_config::dictionary::DictionaryConfig;
use steno_types::Stroke;

use crate::error::{GenerateError, LoadError, LookupError};
use crate::parser;

/// Notations containing any of these characters are number strokes and never
/// offered for practice. `6` is absent on purpose.
pub const EXCLUDED_NOTATION_CHARS: &str = "012345789";

/// Reverse view of a steno dictionary: written word -> notations.
#[derive(Debug, Clone, Default)]
pub struct StenoDictionary {
    notations_by_word: HashMap<String, Vec<String>>,
    entry_count: usize,
}

impl StenoDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(notation, word)` pairs in dictionary order
    pub fn from_entries<I, N, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, W)>,
        N: Into<String>,
        W: Into<String>,
    {
        let mut dict = Self::new();
        for (notation, word) in entries {
            dict.insert(notation.into(), word.into());
        }
        dict
    }

    /// Load a flat JSON object mapping notation to word
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let data: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_str)?;

        let mut dict = Self::new();
        for (notation, word) in data {
            let word = match word {
                serde_json::Value::String(word) => word,
                other => {
                    return Err(LoadError::InvalidFormat(format!(
                        "entry {notation} maps to {other}, expected a string"
                    )));
                }
            };
            dict.insert(notation, word);
        }

        Ok(dict)
    }

    fn insert(&mut self, notation: String, word: String) {
        if is_excluded(&notation) {
            return;
        }
        self.notations_by_word.entry(word).or_default().push(notation);
        self.entry_count += 1;
    }

    /// Notations that write `word`, in dictionary order
    pub fn notations(&self, word: &str) -> Result<&[String], LookupError> {
        self.notations_by_word
            .get(word)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownWord(word.to_string()))
    }

    /// The notation exercises use for `word`
    pub fn first_notation(&self, word: &str) -> Result<&str, LookupError> {
        // Vectors are only created alongside their first notation.
        self.notations(word)?
            .first()
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownWord(word.to_string()))
    }

    /// Resolve `word` to the stroke shown to the user
    pub fn stroke_for(&self, word: &str) -> Result<Stroke, GenerateError> {
        let notation = self.first_notation(word)?;
        Ok(parser::parse_stroke(notation, word)?)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.notations_by_word.contains_key(word)
    }

    /// Number of notations kept after exclusion
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn word_count(&self) -> usize {
        self.notations_by_word.len()
    }

    /// Stack another dictionary after this one. Its notations are appended,
    /// so words already present keep their first notation.
    pub fn merge(mut self, other: StenoDictionary) -> Self {
        for (word, notations) in other.notations_by_word {
            self.entry_count += notations.len();
            self.notations_by_word.entry(word).or_default().extend(notations);
        }
        self
    }
}

fn is_excluded(notation: &str) -> bool {
    notation.chars().any(|c| EXCLUDED_NOTATION_CHARS.contains(c))
}

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<StenoDictionary, LoadError> {
        tracing::info!("Loading steno dictionary from file: {}", path.display());
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let dict = StenoDictionary::from_json(&json)?;
        tracing::info!(
            "Loaded {} entries for {} words from file",
            dict.entry_count(),
            dict.word_count()
        );
        Ok(dict)
    }

    /// Load the main dictionary followed by every additional one
    pub fn load_configured(config: &DictionaryConfig) -> Result<StenoDictionary, LoadError> {
        let mut dict = StenoDictionary::new();
        for path in config.all_paths() {
            dict = dict.merge(Self::load_from_file(Path::new(path))?);
        }
        Ok(dict)
    }
}

use std::env;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "main.json".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Main steno dictionary (notation -> word)
    #[serde(default = "default_path")]
    pub path: String,
    /// Extra dictionaries stacked after the main one
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let path = env::var("STENO_DICTIONARY").unwrap_or_else(|_| default_path());

        Self {
            path,
            additional_paths: vec![],
        }
    }

    /// Every dictionary file, main first
    pub fn all_paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.path.as_str()).chain(self.additional_paths.iter().map(String::as_str))
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            additional_paths: vec![],
        }
    }
}

use steno_types::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("word not in dictionary: {0}")]
    UnknownWord(String),
}

/// Failure to persist history or settings
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("no words to draw from, enabled lessons: {0:?}")]
    EmptyPool(Vec<String>),

    #[error("unknown lesson: {0}")]
    UnknownLesson(String),

    #[error("invalid word weights: {0}")]
    Weights(#[from] rand::distributions::WeightedError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

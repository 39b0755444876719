pub mod dictionary;
pub mod error;
pub mod generator;
pub mod history;
pub mod lessons;
pub mod parser;
pub mod session;
pub mod settings;
pub mod weights;

pub use dictionary::{DictionaryLoader, StenoDictionary};
pub use error::{GenerateError, LoadError, LookupError, StoreError};
pub use generator::ExerciseGenerator;
pub use history::HistoryStore;
pub use lessons::{LessonCatalog, LessonTable};
pub use session::ExerciseSession;
pub use settings::SettingsStore;

pub mod exercise;
pub mod key;
pub mod stroke;

pub use exercise::{ExerciseResult, ExerciseSettings, ExerciseWordResult, FALLBACK_LESSON};
pub use key::{Key, ParseError};
pub use stroke::{Chord, Stroke};

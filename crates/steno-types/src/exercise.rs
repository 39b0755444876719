use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;

/// ISO 8601 without offset, fractional seconds only when non-zero
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Lesson used when a settings change leaves no lesson enabled
pub const FALLBACK_LESSON: &str = "One Syllable Words";

/// Record of one word in a finished exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Stroke, bool, f64)", into = "(Stroke, bool, f64)")]
pub struct ExerciseWordResult {
    pub stroke: Stroke,
    /// False when the word was mistyped before it was typed correctly
    pub is_typed_correctly: bool,
    /// Seconds between finishing the previous word (or starting) and finishing this one
    pub typing_time: f64,
}

impl ExerciseWordResult {
    pub fn new(stroke: Stroke, is_typed_correctly: bool, typing_time: f64) -> Self {
        Self {
            stroke,
            is_typed_correctly,
            typing_time,
        }
    }

    pub fn written_word(&self) -> &str {
        &self.stroke.written_word
    }
}

impl From<(Stroke, bool, f64)> for ExerciseWordResult {
    fn from((stroke, is_typed_correctly, typing_time): (Stroke, bool, f64)) -> Self {
        Self::new(stroke, is_typed_correctly, typing_time)
    }
}

impl From<ExerciseWordResult> for (Stroke, bool, f64) {
    fn from(result: ExerciseWordResult) -> Self {
        (result.stroke, result.is_typed_correctly, result.typing_time)
    }
}

/// Record of a full exercise, words in the order they were presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "(String, Vec<ExerciseWordResult>)",
    into = "(String, Vec<ExerciseWordResult>)"
)]
pub struct ExerciseResult {
    /// Local date and time the exercise began
    pub timestamp: NaiveDateTime,
    pub words: Vec<ExerciseWordResult>,
}

impl ExerciseResult {
    pub fn new(timestamp: NaiveDateTime, words: Vec<ExerciseWordResult>) -> Self {
        Self { timestamp, words }
    }
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts both `T` and a space between date and time.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let normalized = text.trim().replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT)
}

impl TryFrom<(String, Vec<ExerciseWordResult>)> for ExerciseResult {
    type Error = chrono::ParseError;

    fn try_from((timestamp, words): (String, Vec<ExerciseWordResult>)) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: parse_timestamp(&timestamp)?,
            words,
        })
    }
}

impl From<ExerciseResult> for (String, Vec<ExerciseWordResult>) {
    fn from(result: ExerciseResult) -> Self {
        (format_timestamp(&result.timestamp), result.words)
    }
}

/// What an exercise is drawn from and how long it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, Vec<String>)", into = "(usize, Vec<String>)")]
pub struct ExerciseSettings {
    pub exercise_size: usize,
    /// Lesson names, in the order their words join the pool
    pub enabled_lessons: Vec<String>,
}

impl ExerciseSettings {
    pub fn new(exercise_size: usize, enabled_lessons: Vec<String>) -> Self {
        Self {
            exercise_size,
            enabled_lessons,
        }
    }

    /// Clamp the size to at least one word and fall back to
    /// [`FALLBACK_LESSON`] when nothing is enabled.
    pub fn sanitized(mut self) -> Self {
        self.exercise_size = self.exercise_size.max(1);
        if self.enabled_lessons.is_empty() {
            self.enabled_lessons.push(FALLBACK_LESSON.to_string());
        }
        self
    }
}

impl From<(usize, Vec<String>)> for ExerciseSettings {
    fn from((exercise_size, enabled_lessons): (usize, Vec<String>)) -> Self {
        Self::new(exercise_size, enabled_lessons)
    }
}

impl From<ExerciseSettings> for (usize, Vec<String>) {
    fn from(settings: ExerciseSettings) -> Self {
        (settings.exercise_size, settings.enabled_lessons)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::key::Key;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 14)
            .unwrap()
            .and_hms_micro_opt(15, 9, 26, 535_897)
            .unwrap()
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let ts = sample_timestamp();
        assert_eq!(format_timestamp(&ts), "2021-03-14T15:09:26.535897");
        assert_eq!(parse_timestamp("2021-03-14T15:09:26.535897").unwrap(), ts);
    }

    #[test]
    fn test_timestamp_accepts_space_separator_and_whole_seconds() {
        let ts = parse_timestamp("2021-03-14 15:09:26").unwrap();
        assert_eq!(format_timestamp(&ts), "2021-03-14T15:09:26");
    }

    #[test]
    fn test_exercise_result_wire_format() {
        let stroke = Stroke::new(vec![[Key::TL, Key::E, Key::SR, Key::TR].into_iter().collect()], "test");
        let result = ExerciseResult::new(
            sample_timestamp(),
            vec![ExerciseWordResult::new(stroke, true, 1.25)],
        );

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"["2021-03-14T15:09:26.535897",[[[[["T_L","E","T_R","S_R"]],"test"],true,1.25]]]"#
        );
        assert_eq!(serde_json::from_str::<ExerciseResult>(&json).unwrap(), result);
    }

    #[test]
    fn test_exercise_result_rejects_bad_timestamp() {
        let json = r#"["yesterday",[]]"#;
        assert!(serde_json::from_str::<ExerciseResult>(json).is_err());
    }

    #[test]
    fn test_settings_wire_format() {
        let settings = ExerciseSettings::new(25, vec!["Fingerspelling".into(), "Briefs".into()]);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"[25,["Fingerspelling","Briefs"]]"#);
        assert_eq!(serde_json::from_str::<ExerciseSettings>(&json).unwrap(), settings);
    }

    #[test]
    fn test_sanitized_settings() {
        let settings = ExerciseSettings::new(0, vec![]).sanitized();
        assert_eq!(settings.exercise_size, 1);
        assert_eq!(settings.enabled_lessons, vec![FALLBACK_LESSON.to_string()]);
    }
}

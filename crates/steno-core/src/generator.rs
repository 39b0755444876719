use std::collections::HashMap;

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use steno_types::{ExerciseResult, ExerciseSettings, Stroke};

use crate::dictionary::StenoDictionary;
use crate::error::{GenerateError, StoreError};
use crate::history::HistoryStore;
use crate::lessons::LessonCatalog;
use crate::weights;

/// Draws exercises from enabled lessons, favoring words the user is slow at,
/// and keeps the log of finished exercises.
pub struct ExerciseGenerator<C: LessonCatalog> {
    dictionary: StenoDictionary,
    lessons: C,
    history: HistoryStore,
}

impl<C: LessonCatalog> ExerciseGenerator<C> {
    pub fn new(dictionary: StenoDictionary, lessons: C, history: HistoryStore) -> Self {
        Self {
            dictionary,
            lessons,
            history,
        }
    }

    pub fn dictionary(&self) -> &StenoDictionary {
        &self.dictionary
    }

    pub fn lessons(&self) -> &C {
        &self.lessons
    }

    pub fn history(&self) -> &[ExerciseResult] {
        self.history.results()
    }

    /// Generate an exercise using the thread-local generator
    pub fn generate_exercise(&self, settings: &ExerciseSettings) -> Result<Vec<Stroke>, GenerateError> {
        self.generate_with_rng(settings, &mut rand::thread_rng())
    }

    /// Draw `settings.exercise_size` words with replacement, each with
    /// probability proportional to its weight, and resolve them to strokes.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        settings: &ExerciseSettings,
        rng: &mut R,
    ) -> Result<Vec<Stroke>, GenerateError> {
        let pool = self.word_pool(settings)?;
        if pool.is_empty() {
            return Err(GenerateError::EmptyPool(settings.enabled_lessons.clone()));
        }

        let word_weights = self.word_weights();
        let distribution = WeightedIndex::new(weights::weights_for(&word_weights, pool.iter().copied()))?;

        tracing::debug!(
            "Drawing {} words from a pool of {} ({} timed)",
            settings.exercise_size,
            pool.len(),
            word_weights.len()
        );

        (0..settings.exercise_size)
            .map(|_| self.dictionary.stroke_for(pool[distribution.sample(rng)]))
            .collect()
    }

    /// Words of every enabled lesson in settings order, duplicates kept
    fn word_pool(&self, settings: &ExerciseSettings) -> Result<Vec<&String>, GenerateError> {
        let mut pool = Vec::new();
        for lesson in &settings.enabled_lessons {
            let words = self
                .lessons
                .lesson_words(lesson)
                .ok_or_else(|| GenerateError::UnknownLesson(lesson.clone()))?;
            pool.extend(words);
        }
        Ok(pool)
    }

    /// Current weight of every timed word
    pub fn word_weights(&self) -> HashMap<String, f64> {
        weights::compute_weights(self.history.results())
    }

    pub fn record_exercise_result(&mut self, result: ExerciseResult) -> Result<(), StoreError> {
        tracing::info!("Recording exercise of {} words", result.words.len());
        self.history.append(result)
    }

    pub fn clear_exercise_history(&mut self) -> Result<(), StoreError> {
        tracing::info!("Clearing exercise history");
        self.history.clear()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use steno_types::ExerciseWordResult;
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::lessons::LessonTable;

    fn generator(lessons: LessonTable) -> (ExerciseGenerator<LessonTable>, TempDir) {
        let dir = tempdir().unwrap();
        let dictionary = StenoDictionary::from_entries([
            ("KAT", "cat"),
            ("TKOG", "dog"),
            ("SAT", "sat"),
            ("-T", "the"),
        ]);
        let history = HistoryStore::open(dir.path().join("history.json"));
        (ExerciseGenerator::new(dictionary, lessons, history), dir)
    }

    fn settings(size: usize, lessons: &[&str]) -> ExerciseSettings {
        ExerciseSettings::new(size, lessons.iter().map(|l| l.to_string()).collect())
    }

    fn timed(word: &str, time: f64) -> ExerciseWordResult {
        ExerciseWordResult::new(Stroke::new(vec![], word), true, time)
    }

    #[test]
    fn test_output_length_matches_settings() {
        let (generator, _dir) = generator(LessonTable::from_lessons([("Animals", vec!["cat", "dog"])]));
        let mut rng = StdRng::seed_from_u64(1);
        for size in [1, 7, 50] {
            let strokes = generator
                .generate_with_rng(&settings(size, &["Animals"]), &mut rng)
                .unwrap();
            assert_eq!(strokes.len(), size);
        }
    }

    #[test]
    fn test_strokes_use_first_notation() {
        let (generator, _dir) = generator(LessonTable::from_lessons([("Short", vec!["the"])]));
        let strokes = generator
            .generate_with_rng(&settings(3, &["Short"]), &mut StdRng::seed_from_u64(2))
            .unwrap();
        for stroke in strokes {
            assert_eq!(stroke.written_word, "the");
            assert_eq!(stroke.notation(), "-T");
        }
    }

    #[test]
    fn test_same_seed_same_exercise() {
        let (generator, _dir) = generator(LessonTable::from_lessons([(
            "Words",
            vec!["cat", "dog", "sat", "the"],
        )]));
        let s = settings(20, &["Words"]);
        let first = generator.generate_with_rng(&s, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = generator.generate_with_rng(&s, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let (generator, _dir) = generator(LessonTable::from_lessons([("Empty", Vec::<String>::new())]));
        assert!(matches!(
            generator.generate_exercise(&settings(5, &[])),
            Err(GenerateError::EmptyPool(_))
        ));
        assert!(matches!(
            generator.generate_exercise(&settings(5, &["Empty"])),
            Err(GenerateError::EmptyPool(_))
        ));
    }

    #[test]
    fn test_unknown_lesson_is_an_error() {
        let (generator, _dir) = generator(LessonTable::new());
        assert!(matches!(
            generator.generate_exercise(&settings(5, &["Nope"])),
            Err(GenerateError::UnknownLesson(name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_word_missing_from_dictionary_is_an_error() {
        let (generator, _dir) = generator(LessonTable::from_lessons([("Odd", vec!["zebra"])]));
        assert!(matches!(
            generator.generate_exercise(&settings(1, &["Odd"])),
            Err(GenerateError::Lookup(_))
        ));
    }

    #[test]
    fn test_slow_words_are_drawn_more_often() {
        let (mut generator, _dir) = generator(LessonTable::from_lessons([("Pair", vec!["cat", "dog"])]));
        // cat weighs 1/(1/10) = 10, dog 1/(1/1) = 1
        generator
            .record_exercise_result(ExerciseResult::new(
                NaiveDateTime::default(),
                vec![timed("sat", 1.0), timed("cat", 10.0), timed("dog", 1.0)],
            ))
            .unwrap();

        let weights = generator.word_weights();
        assert_eq!(weights["cat"], 10.0);
        assert_eq!(weights["dog"], 1.0);

        let draws = 10_000;
        let strokes = generator
            .generate_with_rng(&settings(draws, &["Pair"]), &mut StdRng::seed_from_u64(42))
            .unwrap();
        let cats = strokes.iter().filter(|s| s.written_word == "cat").count();
        let frequency = cats as f64 / draws as f64;
        assert!((frequency - 10.0 / 11.0).abs() < 0.02, "cat frequency {frequency}");
    }

    #[test]
    fn test_extreme_typing_time_does_not_block_generation() {
        let (mut generator, _dir) = generator(LessonTable::from_lessons([("Pair", vec!["cat", "dog"])]));
        generator
            .record_exercise_result(ExerciseResult::new(
                NaiveDateTime::default(),
                vec![timed("sat", 1.0), timed("cat", f64::MAX)],
            ))
            .unwrap();

        let strokes = generator
            .generate_with_rng(&settings(10, &["Pair"]), &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(strokes.len(), 10);
    }

    #[test]
    fn test_duplicate_pool_entries_add_weight() {
        let (generator, _dir) = generator(LessonTable::from_lessons([
            ("A", vec!["cat"]),
            ("B", vec!["cat", "cat", "dog"]),
        ]));
        let draws = 8_000;
        let strokes = generator
            .generate_with_rng(&settings(draws, &["A", "B"]), &mut StdRng::seed_from_u64(5))
            .unwrap();
        let cats = strokes.iter().filter(|s| s.written_word == "cat").count();
        let frequency = cats as f64 / draws as f64;
        assert!((frequency - 0.75).abs() < 0.03, "cat frequency {frequency}");
    }

    #[test]
    fn test_record_and_clear_history() {
        let (mut generator, dir) = generator(LessonTable::new());
        generator
            .record_exercise_result(ExerciseResult::new(
                NaiveDateTime::default(),
                vec![timed("cat", 1.0), timed("dog", 2.0)],
            ))
            .unwrap();
        assert_eq!(generator.history().len(), 1);
        assert_eq!(HistoryStore::open(dir.path().join("history.json")).len(), 1);

        generator.clear_exercise_history().unwrap();
        assert!(generator.history().is_empty());
        assert!(generator.word_weights().is_empty());
        assert!(HistoryStore::open(dir.path().join("history.json")).is_empty());
    }
}

use std::collections::HashMap;

use steno_types::ExerciseResult;

/// Weight of a word that has never been timed
pub const DEFAULT_WEIGHT: f64 = 0.5;

/// Per-word sampling weight from past exercises.
///
/// The weight of a word is `1 / Σ(1/t)` over its timing samples. It is not
/// divided by the sample count, so it grows with slow times and with the
/// number of samples. The first word of every exercise has no previous word
/// to time from and is skipped. Mistyped words give no sample. Words whose
/// weight over- or underflows are left out and fall back to [`DEFAULT_WEIGHT`].
pub fn compute_weights(history: &[ExerciseResult]) -> HashMap<String, f64> {
    let mut reciprocal_sums: HashMap<&str, f64> = HashMap::new();

    for exercise in history {
        for word in exercise.words.iter().skip(1) {
            if !word.is_typed_correctly {
                continue;
            }
            // A zero or garbage time would swamp the sum.
            if !(word.typing_time.is_finite() && word.typing_time > 0.0) {
                continue;
            }
            *reciprocal_sums.entry(word.written_word()).or_insert(0.0) += 1.0 / word.typing_time;
        }
    }

    reciprocal_sums
        .into_iter()
        .map(|(word, sum)| (word, 1.0 / sum))
        .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
        .map(|(word, weight)| (word.to_string(), weight))
        .collect()
}

/// Weight for each candidate, [`DEFAULT_WEIGHT`] when untimed
pub fn weights_for<'a, I>(weights: &HashMap<String, f64>, words: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a String>,
{
    words
        .into_iter()
        .map(|word| weights.get(word).copied().unwrap_or(DEFAULT_WEIGHT))
        .collect()
}

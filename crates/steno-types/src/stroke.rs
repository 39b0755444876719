use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::Key;

/// A set of keys pressed simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ChordRepr", into = "Vec<Key>")]
pub struct Chord {
    keys: BTreeSet<Key>,
}

impl Chord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key, returns false if it was already part of the chord
    pub fn insert(&mut self, key: Key) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn keys_in_steno_order(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.keys().collect();
        keys.sort_by_key(|k| k.order());
        keys
    }

    /// Canonical steno notation, e.g. `KAT` or `-S`.
    ///
    /// A hyphen precedes the first right-half key when the chord has no vowel
    /// or star to separate the two halves.
    pub fn to_notation(&self) -> String {
        let needs_hyphen = !self.keys().any(Key::is_vowel_or_star);
        let mut notation = String::with_capacity(self.len() + 1);
        let mut hyphen_written = false;

        for key in self.keys_in_steno_order() {
            if needs_hyphen && !hyphen_written && key.is_right_half() {
                notation.push('-');
                hyphen_written = true;
            }
            notation.push(key.letter());
        }

        notation
    }
}

impl FromIterator<Key> for Chord {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Chords are written as a key list. Older history files wrapped that list
/// in a one-element array, `[[4, 7, 15]]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChordRepr {
    Keys(Vec<Key>),
    Wrapped((Vec<Key>,)),
}

impl From<ChordRepr> for Chord {
    fn from(repr: ChordRepr) -> Self {
        match repr {
            ChordRepr::Keys(keys) | ChordRepr::Wrapped((keys,)) => keys.into(),
        }
    }
}

impl From<Vec<Key>> for Chord {
    fn from(keys: Vec<Key>) -> Self {
        keys.into_iter().collect()
    }
}

impl From<Chord> for Vec<Key> {
    fn from(chord: Chord) -> Self {
        chord.keys_in_steno_order()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

/// The chords that together type one written word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Vec<Chord>, String)", into = "(Vec<Chord>, String)")]
pub struct Stroke {
    pub chords: Vec<Chord>,
    pub written_word: String,
}

impl Stroke {
    pub fn new(chords: Vec<Chord>, written_word: impl Into<String>) -> Self {
        Self {
            chords,
            written_word: written_word.into(),
        }
    }

    /// Chord notation of the whole stroke, chords joined by `/`
    pub fn notation(&self) -> String {
        self.chords
            .iter()
            .map(Chord::to_notation)
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn first_chord(&self) -> Option<&Chord> {
        self.chords.first()
    }
}

impl From<(Vec<Chord>, String)> for Stroke {
    fn from((chords, written_word): (Vec<Chord>, String)) -> Self {
        Self {
            chords,
            written_word,
        }
    }
}

impl From<Stroke> for (Vec<Chord>, String) {
    fn from(stroke: Stroke) -> Self {
        (stroke.chords, stroke.written_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_inserts_hyphen_without_vowels() {
        let chord: Chord = [Key::SR].into_iter().collect();
        assert_eq!(chord.to_notation(), "-S");

        let chord: Chord = [Key::TL, Key::PL, Key::TR].into_iter().collect();
        assert_eq!(chord.to_notation(), "TP-T");
    }

    #[test]
    fn test_notation_uses_steno_order() {
        let chord: Chord = [Key::TR, Key::A, Key::KL].into_iter().collect();
        assert_eq!(chord.to_notation(), "KAT");
    }

    #[test]
    fn test_stroke_notation_joins_chords() {
        let stroke = Stroke::new(
            vec![
                [Key::A, Key::BR].into_iter().collect(),
                [Key::SL, Key::E, Key::LR, Key::TR].into_iter().collect(),
            ],
            "absolute",
        );
        assert_eq!(stroke.notation(), "AB/SELT");
    }

    #[test]
    fn test_stroke_wire_format() {
        let stroke = Stroke::new(vec![[Key::TR, Key::KL, Key::A].into_iter().collect()], "cat");
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(json, r#"[[["K_L","A","T_R"]],"cat"]"#);

        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }

    #[test]
    fn test_chord_reads_wrapped_key_list() {
        let wrapped: Chord = serde_json::from_str("[[4, 7, 15]]").unwrap();
        let plain: Chord = serde_json::from_str(r#"["K_L", "A", "T_R"]"#).unwrap();
        assert_eq!(wrapped, plain);
        assert_eq!(wrapped.to_notation(), "KAT");

        let empty: Chord = serde_json::from_str("[[]]").unwrap();
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_string(&wrapped).unwrap(), r#"["K_L","A","T_R"]"#);
    }
}

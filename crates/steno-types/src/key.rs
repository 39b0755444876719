use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Canonical ordering of the left half of the keyboard, star included
const LEFT_HALF_ORDER: &str = "STKPWHRAO*";
/// Canonical ordering of the right half of the keyboard
const RIGHT_HALF_ORDER: &str = "EUFRPBLGTSDZ";

/// Keys on a stenography keyboard, in declaration order.
///
/// Declaration order follows the physical layout (top row before bottom row
/// for each hand). Steno order is a separate ranking, see [`Key::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "KeyRepr", into = "String")]
pub enum Key {
    SL,
    TL,
    PL,
    HL,
    KL,
    WL,
    RL,
    A,
    O,
    Star,
    E,
    U,
    FR,
    PR,
    LR,
    TR,
    DR,
    RR,
    BR,
    GR,
    SR,
    ZR,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `notation` is filled in by whoever knows the full chord text
    #[error("no key for letter '{letter}' after steno order {after:?}{}", in_notation(.notation))]
    UnresolvableLetter {
        letter: char,
        after: Option<u8>,
        notation: Option<String>,
    },

    #[error("unknown key name: {0}")]
    UnknownKeyName(String),

    #[error("key index out of range: {0}")]
    KeyIndexOutOfRange(u64),
}

fn in_notation(notation: &Option<String>) -> String {
    notation
        .as_ref()
        .map(|n| format!(" in chord notation \"{n}\""))
        .unwrap_or_default()
}

/// Keys sharing a letter, sorted by steno order
static KEYS_BY_LETTER: LazyLock<HashMap<char, Vec<Key>>> = LazyLock::new(|| {
    let mut table: HashMap<char, Vec<Key>> = HashMap::new();
    for key in Key::ALL {
        table.entry(key.letter()).or_default().push(key);
    }
    for keys in table.values_mut() {
        keys.sort_by_key(|k| k.order());
    }
    table
});

impl Key {
    pub const COUNT: usize = 22;

    pub const ALL: [Key; Key::COUNT] = [
        Key::SL,
        Key::TL,
        Key::PL,
        Key::HL,
        Key::KL,
        Key::WL,
        Key::RL,
        Key::A,
        Key::O,
        Key::Star,
        Key::E,
        Key::U,
        Key::FR,
        Key::PR,
        Key::LR,
        Key::TR,
        Key::DR,
        Key::RR,
        Key::BR,
        Key::GR,
        Key::SR,
        Key::ZR,
    ];

    /// Position in declaration order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Key> {
        Key::ALL.get(index).copied()
    }

    /// Printed letter of the key. Several letters appear on both halves.
    pub fn letter(self) -> char {
        const LETTERS: &[u8; Key::COUNT] = b"STPHKWRAO*EUFPLTDRBGSZ";
        LETTERS[self.index()] as char
    }

    /// Steno order: the left-to-right rank used when writing chords.
    ///
    /// Left half keys rank by `STKPWHRAO*`, right half keys follow ranked by
    /// `EUFRPBLGTSDZ`.
    pub fn order(self) -> u8 {
        let letter = self.letter();
        let position = if self <= Key::Star {
            LEFT_HALF_ORDER.find(letter)
        } else {
            RIGHT_HALF_ORDER
                .find(letter)
                .map(|p| p + LEFT_HALF_ORDER.len())
        };
        // Every letter of the table appears in its half's ordering string.
        position.unwrap_or_default() as u8
    }

    /// Column on the physical keyboard
    pub fn column(self) -> u8 {
        let i = self.index() as u8;
        match self {
            Key::SL | Key::TL | Key::PL | Key::HL => i,
            Key::KL | Key::WL | Key::RL => 1 + i - Key::KL as u8,
            Key::A | Key::O | Key::Star | Key::E | Key::U => i - Key::A as u8 + Key::HL as u8 + 1,
            Key::FR | Key::PR | Key::LR | Key::TR | Key::DR => i - Key::FR as u8 + Key::HL as u8 + 6,
            Key::RR | Key::BR | Key::GR | Key::SR | Key::ZR => i - Key::RR as u8 + Key::HL as u8 + 6,
        }
    }

    /// Row on the physical keyboard: 0 top, 1 bottom, 2 thumbs
    pub fn row(self) -> u8 {
        match self {
            Key::SL | Key::TL | Key::PL | Key::HL => 0,
            Key::FR | Key::PR | Key::LR | Key::TR | Key::DR => 0,
            Key::Star => 0,
            Key::KL | Key::WL | Key::RL => 1,
            Key::RR | Key::BR | Key::GR | Key::SR | Key::ZR => 1,
            Key::A | Key::O | Key::E | Key::U => 2,
        }
    }

    /// True for keys ranked after the star, i.e. the right half
    pub fn is_right_half(self) -> bool {
        self > Key::Star
    }

    pub fn is_vowel_or_star(self) -> bool {
        matches!(self, Key::A | Key::O | Key::Star | Key::E | Key::U)
    }

    /// Persisted key name
    pub fn name(self) -> &'static str {
        match self {
            Key::SL => "S_L",
            Key::TL => "T_L",
            Key::PL => "P_L",
            Key::HL => "H_L",
            Key::KL => "K_L",
            Key::WL => "W_L",
            Key::RL => "R_L",
            Key::A => "A",
            Key::O => "O",
            Key::Star => "STAR",
            Key::E => "E",
            Key::U => "U",
            Key::FR => "F_R",
            Key::PR => "P_R",
            Key::LR => "L_R",
            Key::TR => "T_R",
            Key::DR => "D_R",
            Key::RR => "R_R",
            Key::BR => "B_R",
            Key::GR => "G_R",
            Key::SR => "S_R",
            Key::ZR => "Z_R",
        }
    }

    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Resolve a letter to the closest key after `minimum_order` in steno
    /// order. `None` means no lower bound.
    pub fn resolve(letter: char, minimum_order: Option<u8>) -> Result<Key, ParseError> {
        Key::candidates(letter)
            .iter()
            .copied()
            .find(|k| minimum_order.is_none_or(|min| k.order() > min))
            .ok_or_else(|| ParseError::UnresolvableLetter {
                letter,
                after: minimum_order,
                notation: None,
            })
    }

    /// Keys printed with `letter`, sorted by steno order
    pub fn candidates(letter: char) -> &'static [Key] {
        KEYS_BY_LETTER
            .get(&letter)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}

/// Keys are written by name; older history files stored the numeric index.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Name(String),
    Index(u64),
}

impl TryFrom<KeyRepr> for Key {
    type Error = ParseError;

    fn try_from(repr: KeyRepr) -> Result<Self, Self::Error> {
        match repr {
            KeyRepr::Name(name) => Key::from_name(&name).ok_or(ParseError::UnknownKeyName(name)),
            KeyRepr::Index(index) => usize::try_from(index)
                .ok()
                .and_then(Key::from_index)
                .ok_or(ParseError::KeyIndexOutOfRange(index)),
        }
    }
}

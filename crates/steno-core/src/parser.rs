use steno_types::{Chord, Key, ParseError, Stroke};

/// Separates the chords of a multi-chord stroke
pub const CHORD_SEPARATOR: char = '/';
/// Marks the boundary between the left and right half of the keyboard
pub const HALF_SEPARATOR: char = '-';

/// Parse dictionary notation such as `KAT` or `AB/SO/HRAOUT` into chords.
///
/// Letters of a chord must appear in steno order. Each letter resolves to the
/// nearest key after the previous one, and `-` restarts the search just after
/// the star so that the following letters land on the right half.
pub fn parse_chords(notation: &str) -> Result<Vec<Chord>, ParseError> {
    notation
        .split(CHORD_SEPARATOR)
        .map(|segment| parse_chord(segment).map_err(|e| with_notation(e, notation)))
        .collect()
}

/// Parse the notation of `written_word` into a stroke
pub fn parse_stroke(notation: &str, written_word: &str) -> Result<Stroke, ParseError> {
    Ok(Stroke::new(parse_chords(notation)?, written_word))
}

fn parse_chord(segment: &str) -> Result<Chord, ParseError> {
    let mut minimum_order = None;
    let mut chord = Chord::new();

    for letter in segment.chars() {
        if letter == HALF_SEPARATOR {
            minimum_order = Some(Key::Star.order());
            continue;
        }

        let key = Key::resolve(letter, minimum_order)?;
        minimum_order = Some(key.order());
        chord.insert(key);
    }

    Ok(chord)
}

fn with_notation(err: ParseError, notation: &str) -> ParseError {
    match err {
        ParseError::UnresolvableLetter { letter, after, .. } => ParseError::UnresolvableLetter {
            letter,
            after,
            notation: Some(notation.to_string()),
        },
        other => other,
    }
}

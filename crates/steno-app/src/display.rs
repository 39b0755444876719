use steno_types::{Chord, Key};

const COLUMNS: usize = 14;
const ROWS: usize = 3;

/// Text rendering of the steno keyboard with the chord's keys lit.
///
/// Unpressed keys show as `.`. `S-` and `*` are tall keys and appear on
/// both consonant rows.
pub fn render_keyboard(chord: &Chord) -> String {
    let mut grid = [[' '; COLUMNS]; ROWS];

    for key in Key::ALL {
        let glyph = if chord.contains(key) { key.letter() } else { '.' };
        let column = key.column() as usize;
        let row = key.row() as usize;
        grid[row][column] = glyph;
        if matches!(key, Key::SL | Key::Star) {
            grid[row + 1][column] = glyph;
        }
    }

    grid.iter()
        .map(|row| {
            row.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_highlights_pressed_keys() {
        let chord: Chord = [Key::KL, Key::A, Key::TR].into_iter().collect();
        let rendered = render_keyboard(&chord);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ". . . .     .     . . . T .");
        assert_eq!(rows[1], ". K . .     .     . . . . .");
        assert_eq!(rows[2], "        A .   . .");
    }

    #[test]
    fn test_tall_keys_span_two_rows() {
        let chord: Chord = [Key::SL, Key::Star].into_iter().collect();
        let rendered = render_keyboard(&chord);
        let rows: Vec<&str> = rendered.lines().collect();
        assert!(rows[0].starts_with('S'));
        assert!(rows[1].starts_with('S'));
        assert_eq!(rows[0].chars().nth(12), Some('*'));
        assert_eq!(rows[1].chars().nth(12), Some('*'));
    }
}

use std::io::{self, BufRead, Write};
use std::time::Instant;

use steno_core::ExerciseSession;
use steno_types::{ExerciseResult, Stroke};

use crate::display::render_keyboard;

/// Typed on its own line, stops the clock until the next line
pub const PAUSE_COMMAND: &str = ":pause";

/// Line-based practice: one word per line, retried until typed right.
///
/// Returns None when input ends before the exercise is finished.
pub fn run_practice<R: BufRead, W: Write>(
    strokes: Vec<Stroke>,
    mut input: R,
    mut output: W,
) -> io::Result<Option<ExerciseResult>> {
    let total = strokes.len();
    let mut session = ExerciseSession::start(strokes);

    while let Some(stroke) = session.current_stroke() {
        writeln!(
            output,
            "\n[{}/{}] {}    {}",
            session.current_index() + 1,
            total,
            stroke.written_word,
            stroke.notation()
        )?;
        if let Some(chord) = stroke.first_chord() {
            writeln!(output, "{}", render_keyboard(chord))?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            tracing::info!("Input closed, exercise abandoned");
            return Ok(None);
        }

        let typed = line.trim();
        if typed == PAUSE_COMMAND {
            session.pause(Instant::now());
            write!(output, "Paused, press Enter to continue ")?;
            output.flush()?;
            if input.read_line(&mut String::new())? == 0 {
                tracing::info!("Input closed, exercise abandoned");
                return Ok(None);
            }
            session.resume(Instant::now());
            continue;
        }

        if !session.submit_word(typed, Instant::now()) {
            writeln!(output, "Not quite, try again.")?;
        }
    }

    Ok(session.result())
}

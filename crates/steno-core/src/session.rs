use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use steno_types::{ExerciseResult, ExerciseWordResult, Stroke};

struct WordProgress {
    stroke: Stroke,
    contents: String,
    incorrectly_typed: bool,
    finished_at: Option<Instant>,
}

impl WordProgress {
    /// Text a steno machine emits for the word: a leading space, then the word
    fn target(&self) -> String {
        format!(" {}", self.stroke.written_word)
    }
}

/// Tracks typing through an exercise and produces its result.
///
/// The caller feeds the text of the active word's entry together with the
/// instant it changed. A word counts as finished when its text is complete;
/// the session moves on once the following space arrives, carrying that
/// space over to the next word. The last word moves on as soon as it is
/// complete.
///
/// Time between [`pause`](Self::pause) and [`resume`](Self::resume) is not
/// counted towards any word.
pub struct ExerciseSession {
    timestamp: NaiveDateTime,
    started_at: Instant,
    words: Vec<WordProgress>,
    current: usize,
    finished: bool,
    paused_at: Option<Instant>,
    paused_for: Duration,
}

impl ExerciseSession {
    pub fn new(strokes: Vec<Stroke>, timestamp: NaiveDateTime, started_at: Instant) -> Self {
        let finished = strokes.is_empty();
        let words = strokes
            .into_iter()
            .map(|stroke| WordProgress {
                stroke,
                contents: String::new(),
                incorrectly_typed: false,
                finished_at: None,
            })
            .collect();

        Self {
            timestamp,
            started_at,
            words,
            current: 0,
            finished,
            paused_at: None,
            paused_for: Duration::ZERO,
        }
    }

    /// Start now, stamped with the local time
    pub fn start(strokes: Vec<Stroke>) -> Self {
        Self::new(strokes, chrono::Local::now().naive_local(), Instant::now())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stroke of the word being typed, None once finished
    pub fn current_stroke(&self) -> Option<&Stroke> {
        if self.finished {
            return None;
        }
        self.words.get(self.current).map(|w| &w.stroke)
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Stop the clock until [`resume`](Self::resume) or the next input
    pub fn pause(&mut self, now: Instant) {
        if !self.finished && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_for += now.saturating_duration_since(paused_at);
        }
    }

    /// `now` with paused time taken out
    fn active_instant(&self, now: Instant) -> Instant {
        now.checked_sub(self.paused_for).unwrap_or(now)
    }

    pub fn current_contents(&self) -> &str {
        self.words
            .get(self.current)
            .map(|w| w.contents.as_str())
            .unwrap_or_default()
    }

    /// Append typed characters one at a time, as a keyboard would deliver them
    pub fn type_text(&mut self, text: &str, now: Instant) {
        for c in text.chars() {
            if self.finished {
                return;
            }
            let mut contents = self.current_contents().to_string();
            contents.push(c);
            self.set_contents(&contents, now);
        }
    }

    /// Remove the last character of the active word
    pub fn backspace(&mut self, now: Instant) {
        if self.finished {
            return;
        }
        let mut contents = self.current_contents().to_string();
        contents.pop();
        self.set_contents(&contents, now);
    }

    /// Replace the text of the active word
    pub fn set_contents(&mut self, contents: &str, now: Instant) {
        if self.finished {
            return;
        }
        self.resume(now);

        let finish_time = self.active_instant(now);
        let is_last = self.current + 1 == self.words.len();
        let word = &mut self.words[self.current];
        word.contents = contents.to_string();

        let target = word.target();
        let correctly_typed = format!("{target} ").starts_with(contents);
        let remaining = target.chars().count() as isize + 1 - contents.chars().count() as isize;
        let completely_typed = correctly_typed && remaining <= 1;
        let advance = (completely_typed && remaining <= 0) || is_last;

        if !correctly_typed {
            word.incorrectly_typed = true;
            word.finished_at = None;
            return;
        }
        if !completely_typed {
            return;
        }

        if word.finished_at.is_none() {
            word.finished_at = Some(finish_time);
        }
        if !advance {
            return;
        }

        let overflow = contents[target.len()..].to_string();
        if is_last && !overflow.is_empty() {
            word.incorrectly_typed = true;
            return;
        }

        word.contents = target;
        if is_last {
            self.finished = true;
        } else {
            self.current += 1;
            self.set_contents(&overflow, now);
        }
    }

    /// Line-oriented input: `typed` is the whole active word. Returns true
    /// when the session moved past it; otherwise the word is marked mistyped
    /// and its text cleared for another attempt.
    pub fn submit_word(&mut self, typed: &str, now: Instant) -> bool {
        if self.finished {
            return false;
        }

        let index = self.current;
        self.set_contents(&format!(" {typed}"), now);
        if self.finished || self.current != index {
            return true;
        }

        if self.words[index].finished_at.is_some() {
            self.set_contents(&format!(" {typed} "), now);
            return true;
        }

        self.words[index].incorrectly_typed = true;
        self.set_contents("", now);
        false
    }

    /// Result of the exercise once every word is finished.
    ///
    /// Each word's typing time runs from the previous word's finish, the
    /// first from the session start.
    pub fn result(&self) -> Option<ExerciseResult> {
        if !self.finished {
            return None;
        }

        let mut last = self.started_at;
        let mut words = Vec::with_capacity(self.words.len());
        for word in &self.words {
            let finished_at = word.finished_at?;
            let typing_time = finished_at.saturating_duration_since(last).as_secs_f64();
            words.push(ExerciseWordResult::new(
                word.stroke.clone(),
                !word.incorrectly_typed,
                typing_time,
            ));
            last = finished_at;
        }

        Some(ExerciseResult::new(self.timestamp, words))
    }
}

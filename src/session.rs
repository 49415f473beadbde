use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{Result, TyperError};
use crate::score;
use crate::view::{RenderView, WordView};
use crate::word_source::WordSource;

pub const DEFAULT_WINDOW_SIZE: usize = 16;
pub const MAX_WINDOW_SIZE: usize = 256;
pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const TICK_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub window_size: usize,
    pub duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

/// A key-down event as seen by the input box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Char(char),
    Backspace,
    Other,
}

/// An input-change event: the full new value of the input box plus the text
/// the change inserted, if any. Deletions carry no `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChange {
    pub value: String,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keystrokes {
    pub correct: usize,
    pub wrong: usize,
}

/// Final numbers of a finished round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundResult {
    pub correct_words: usize,
    pub wrong_words: usize,
    pub correct_keystrokes: usize,
    pub wrong_keystrokes: usize,
}

impl RoundResult {
    pub fn wpm(&self) -> u64 {
        score::wpm(self.correct_keystrokes)
    }

    pub fn accuracy(&self) -> Option<f64> {
        score::accuracy(self.correct_keystrokes, self.wrong_keystrokes)
    }
}

/// Live state of one timed typing round
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: SessionConfig,
    source: WordSource,
    window: Vec<String>,
    window_index: usize,
    cursor_index: usize,
    typed_text: String,
    correctness: BTreeMap<usize, Outcome>,
    remaining_seconds: u32,
    timer_running: bool,
    keystrokes: Keystrokes,
}

impl Session {
    pub fn new(source: WordSource, config: SessionConfig) -> Result<Self> {
        if config.window_size == 0 || config.window_size > MAX_WINDOW_SIZE {
            return Err(TyperError::InvalidWindowSize);
        }

        let window = source.window(0, config.window_size);
        Ok(Self {
            config,
            source,
            window,
            window_index: 0,
            cursor_index: 0,
            typed_text: String::new(),
            correctness: BTreeMap::new(),
            remaining_seconds: config.duration_secs,
            timer_running: false,
            keystrokes: Keystrokes::default(),
        })
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn source(&self) -> &WordSource {
        &self.source
    }

    pub fn window(&self) -> &[String] {
        &self.window
    }

    pub fn window_index(&self) -> usize {
        self.window_index
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn keystrokes(&self) -> Keystrokes {
        self.keystrokes
    }

    pub fn current_word(&self) -> &str {
        &self.window[self.cursor_index]
    }

    fn global_position(&self, local: usize) -> usize {
        self.window_index * self.config.window_size + local
    }

    /// Settled outcome for a global word position, if it was submitted
    pub fn outcome_at(&self, position: usize) -> Option<Outcome> {
        self.correctness.get(&position).copied()
    }

    pub fn settled_words(&self) -> usize {
        self.correctness.len()
    }

    /// Snapshot of the current counts, as they would be published if the
    /// round ended now
    pub fn tally(&self) -> RoundResult {
        let correct_words = self
            .correctness
            .values()
            .filter(|o| **o == Outcome::Correct)
            .count();

        RoundResult {
            correct_words,
            wrong_words: self.correctness.len() - correct_words,
            correct_keystrokes: self.keystrokes.correct,
            wrong_keystrokes: self.keystrokes.wrong,
        }
    }

    /// Key-down handler. Any key starts the countdown; space submits the
    /// current word.
    pub fn key_down(&mut self, key: Key) {
        self.start_timer();

        if key == Key::Space {
            self.submit();
        }
    }

    fn start_timer(&mut self) {
        if !self.timer_running {
            info!(words = self.source.name(), "round started");
            self.timer_running = true;
        }
    }

    /// Input-change handler. A change that inserted text scores one keystroke
    /// by checking the whole input value against the target's prefix.
    pub fn input_change(&mut self, change: InputChange) {
        if change.data.as_deref() == Some(" ") {
            return;
        }

        if change.data.as_deref().is_some_and(|d| !d.is_empty()) {
            if self.current_word().starts_with(change.value.as_str()) {
                self.keystrokes.correct += 1;
            } else {
                self.keystrokes.wrong += 1;
            }
        }

        self.typed_text = change.value;
    }

    fn submit(&mut self) {
        let position = self.global_position(self.cursor_index);
        let outcome = if self.current_word() == self.typed_text {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        // settled positions are never rewritten
        self.correctness.entry(position).or_insert(outcome);
        debug!(position, ?outcome, typed = %self.typed_text, "word submitted");
        self.typed_text.clear();

        if self.cursor_index == self.window.len() - 1 {
            self.window_index += 1;
            self.window = self
                .source
                .window(self.window_index, self.config.window_size);
            self.cursor_index = 0;
            debug!(window_index = self.window_index, "advanced to next window");
        } else {
            self.cursor_index += 1;
        }
    }

    /// Timer handler, called once per second while the timer runs.
    ///
    /// Returns the finished round's result on the tick that observes the
    /// countdown at zero; the session is already reset when it returns.
    pub fn tick(&mut self) -> Option<RoundResult> {
        if !self.timer_running {
            return None;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return None;
        }

        let result = self.tally();
        self.reset();
        info!(
            correct_words = result.correct_words,
            wrong_words = result.wrong_words,
            correct_keystrokes = result.correct_keystrokes,
            wrong_keystrokes = result.wrong_keystrokes,
            wpm = result.wpm(),
            "round finished"
        );
        Some(result)
    }

    /// Discard the round in progress without publishing a result
    pub fn restart(&mut self) {
        info!("round restarted");
        self.reset();
    }

    fn reset(&mut self) {
        self.window_index = 0;
        self.window = self.source.window(0, self.config.window_size);
        self.cursor_index = 0;
        self.typed_text.clear();
        self.correctness.clear();
        self.remaining_seconds = self.config.duration_secs;
        self.timer_running = false;
        self.keystrokes = Keystrokes::default();
    }

    /// Behave like a text input receiving a printable key
    pub fn type_char(&mut self, c: char) {
        if c == ' ' {
            self.key_down(Key::Space);
            self.input_change(InputChange {
                value: self.typed_text.clone(),
                data: Some(" ".to_owned()),
            });
            return;
        }

        self.key_down(Key::Char(c));
        let mut value = self.typed_text.clone();
        value.push(c);
        self.input_change(InputChange {
            value,
            data: Some(c.to_string()),
        });
    }

    pub fn backspace(&mut self) {
        self.key_down(Key::Backspace);
        let mut value = self.typed_text.clone();
        if value.pop().is_some() {
            self.input_change(InputChange { value, data: None });
        }
    }

    /// Pasted text arrives as a single input change. It starts the countdown
    /// like a key would, but never submits a word.
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.start_timer();
        let value = format!("{}{}", self.typed_text, text);
        self.input_change(InputChange {
            value,
            data: Some(text.to_owned()),
        });
    }

    pub fn view(&self) -> RenderView {
        let words = self
            .window
            .iter()
            .enumerate()
            .map(|(idx, text)| WordView {
                text: text.clone(),
                is_current: idx == self.cursor_index,
                outcome: self.outcome_at(self.global_position(idx)),
            })
            .collect();

        RenderView {
            words,
            typed_text: self.typed_text.clone(),
            remaining_seconds: self.remaining_seconds,
            timer_running: self.timer_running,
        }
    }
}

/// Pure key-down transition
pub fn apply_keystroke(mut session: Session, key: Key) -> Session {
    session.key_down(key);
    session
}

/// Pure input-change transition
pub fn apply_input(mut session: Session, change: InputChange) -> Session {
    session.input_change(change);
    session
}

/// Pure timer transition
pub fn apply_tick(mut session: Session) -> (Session, Option<RoundResult>) {
    let result = session.tick();
    (session, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn source(list: &[&str]) -> WordSource {
        WordSource::new("test", list.iter().map(|w| w.to_string()).collect()).unwrap()
    }

    fn session(list: &[&str], window_size: usize) -> Session {
        Session::new(
            source(list),
            SessionConfig {
                window_size,
                duration_secs: DEFAULT_DURATION_SECS,
            },
        )
        .unwrap()
    }

    fn type_word(session: &mut Session, word: &str) {
        for c in word.chars() {
            session.type_char(c);
        }
        session.type_char(' ');
    }

    #[test]
    fn test_new_session() {
        let s = session(&["the", "cat", "sat"], 3);

        assert_eq!(s.window(), &["the", "cat", "sat"]);
        assert_eq!(s.cursor_index(), 0);
        assert_eq!(s.window_index(), 0);
        assert_eq!(s.typed_text(), "");
        assert_eq!(s.remaining_seconds(), 60);
        assert!(!s.timer_running());
        assert_eq!(s.keystrokes(), Keystrokes::default());
    }

    #[test]
    fn test_zero_window_size_rejected() {
        let result = Session::new(
            source(&["a"]),
            SessionConfig {
                window_size: 0,
                duration_secs: 60,
            },
        );
        assert_matches!(result, Err(TyperError::InvalidWindowSize));
    }

    #[test]
    fn test_oversized_window_rejected() {
        for window_size in [MAX_WINDOW_SIZE + 1, 1_000_000_000, usize::MAX] {
            let result = Session::new(
                source(&["a"]),
                SessionConfig {
                    window_size,
                    duration_secs: 60,
                },
            );
            assert_matches!(result, Err(TyperError::InvalidWindowSize));
        }
    }

    #[test]
    fn test_largest_window_accepted() {
        let s = session(&["a", "b"], MAX_WINDOW_SIZE);
        assert_eq!(s.window().len(), MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_first_key_latches_timer() {
        let mut s = session(&["the", "cat"], 2);

        s.key_down(Key::Other);
        assert!(s.timer_running());

        s.key_down(Key::Backspace);
        assert!(s.timer_running());
    }

    #[test]
    fn test_prefix_keystroke_scoring() {
        let mut s = session(&["the"], 1);

        s.type_char('t');
        s.type_char('h');
        s.type_char('x');
        s.type_char('e');

        assert_eq!(s.typed_text(), "thxe");
        assert_eq!(s.keystrokes(), Keystrokes { correct: 2, wrong: 2 });
    }

    #[test]
    fn test_input_change_without_data_is_not_scored() {
        let mut s = session(&["the"], 1);

        s.input_change(InputChange {
            value: "th".into(),
            data: None,
        });

        assert_eq!(s.typed_text(), "th");
        assert_eq!(s.keystrokes(), Keystrokes::default());
    }

    #[test]
    fn test_space_input_change_is_ignored() {
        let mut s = session(&["the"], 1);
        s.type_char('t');

        s.input_change(InputChange {
            value: "t ".into(),
            data: Some(" ".into()),
        });

        assert_eq!(s.typed_text(), "t");
        assert_eq!(s.keystrokes(), Keystrokes { correct: 1, wrong: 0 });
    }

    #[test]
    fn test_backspace_is_not_scored() {
        let mut s = session(&["the"], 1);
        s.type_char('x');
        s.backspace();
        s.type_char('t');

        assert_eq!(s.typed_text(), "t");
        assert_eq!(s.keystrokes(), Keystrokes { correct: 1, wrong: 1 });
    }

    #[test]
    fn test_paste_scores_once_and_starts_timer() {
        let mut s = session(&["there"], 1);

        s.paste("ther");

        assert_eq!(s.typed_text(), "ther");
        assert_eq!(s.keystrokes(), Keystrokes { correct: 1, wrong: 0 });
        assert!(s.timer_running());
        assert_eq!(s.tick(), None);
        assert_eq!(s.remaining_seconds(), 59);
    }

    #[test]
    fn test_empty_paste_does_nothing() {
        let mut s = session(&["there"], 1);
        s.paste("");
        assert!(!s.timer_running());
        assert_eq!(s.keystrokes(), Keystrokes::default());
    }

    #[test]
    fn test_submission_scenario() {
        let mut s = session(&["the", "cat", "sat"], 3);

        type_word(&mut s, "the");
        type_word(&mut s, "cat");
        type_word(&mut s, "xat");

        assert_eq!(s.outcome_at(0), Some(Outcome::Correct));
        assert_eq!(s.outcome_at(1), Some(Outcome::Correct));
        assert_eq!(s.outcome_at(2), Some(Outcome::Incorrect));

        let tally = s.tally();
        assert_eq!(tally.correct_words, 2);
        assert_eq!(tally.wrong_words, 1);
    }

    #[test]
    fn test_exact_match_only() {
        let mut s = session(&["the", "cat"], 2);

        type_word(&mut s, "th");
        assert_eq!(s.outcome_at(0), Some(Outcome::Incorrect));

        type_word(&mut s, "cats");
        assert_eq!(s.outcome_at(1), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_empty_submission_is_incorrect() {
        let mut s = session(&["the", "cat"], 2);

        s.type_char(' ');

        assert_eq!(s.outcome_at(0), Some(Outcome::Incorrect));
        assert_eq!(s.cursor_index(), 1);
    }

    #[test]
    fn test_window_advances_after_last_word() {
        let mut s = session(&["a", "b", "c", "d", "e"], 2);

        type_word(&mut s, "a");
        assert_eq!(s.cursor_index(), 1);
        type_word(&mut s, "b");

        assert_eq!(s.window_index(), 1);
        assert_eq!(s.cursor_index(), 0);
        assert_eq!(s.window(), &["c", "d"]);

        type_word(&mut s, "c");
        type_word(&mut s, "x");
        assert_eq!(s.window(), &["e", "a"]);

        assert_eq!(s.outcome_at(1), Some(Outcome::Correct));
        assert_eq!(s.outcome_at(2), Some(Outcome::Correct));
        assert_eq!(s.outcome_at(3), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_cursor_stays_in_window() {
        let mut s = session(&["a", "b", "c"], 3);

        for _ in 0..20 {
            s.type_char(' ');
            assert!(s.cursor_index() < s.window().len());
        }
        assert_eq!(s.settled_words(), 20);
    }

    #[test]
    fn test_unsubmitted_word_is_not_scored() {
        let mut s = session(&["the", "cat"], 2);

        type_word(&mut s, "the");
        s.type_char('c');
        s.type_char('a');

        let tally = s.tally();
        assert_eq!(tally.correct_words + tally.wrong_words, 1);
        assert_eq!(s.outcome_at(1), None);
    }

    #[test]
    fn test_tick_does_nothing_before_first_key() {
        let mut s = session(&["the"], 1);

        assert_eq!(s.tick(), None);
        assert_eq!(s.remaining_seconds(), 60);
    }

    #[test]
    fn test_round_finishes_after_countdown() {
        let mut s = session(&["the", "cat", "sat"], 3);
        type_word(&mut s, "the");
        type_word(&mut s, "cax");
        s.type_char('s');

        for expected in (0..60).rev() {
            assert_eq!(s.tick(), None);
            assert_eq!(s.remaining_seconds(), expected);
        }

        let result = s.tick().unwrap();
        assert_eq!(
            result,
            RoundResult {
                correct_words: 1,
                wrong_words: 1,
                correct_keystrokes: 6,
                wrong_keystrokes: 1,
            }
        );

        // reset underneath the published result
        assert!(!s.timer_running());
        assert_eq!(s.remaining_seconds(), 60);
        assert_eq!(s.window_index(), 0);
        assert_eq!(s.cursor_index(), 0);
        assert_eq!(s.typed_text(), "");
        assert_eq!(s.settled_words(), 0);
        assert_eq!(s.keystrokes(), Keystrokes::default());
        assert_eq!(s.window(), &["the", "cat", "sat"]);
    }

    #[test]
    fn test_round_without_typing_has_no_accuracy() {
        let mut s = session(&["the"], 1);
        s.key_down(Key::Other);

        let mut result = None;
        for _ in 0..61 {
            result = s.tick();
        }

        let result = result.unwrap();
        assert_eq!(result.correct_keystrokes, 0);
        assert_eq!(result.wrong_keystrokes, 0);
        assert_eq!(result.accuracy(), None);
        assert_eq!(result.wpm(), 0);
    }

    #[test]
    fn test_restart_discards_round() {
        let mut s = session(&["the", "cat"], 2);
        type_word(&mut s, "the");
        s.tick();

        s.restart();

        assert_eq!(s, session(&["the", "cat"], 2));
    }

    #[test]
    fn test_new_sessions_are_identical() {
        assert_eq!(session(&["a", "b", "c"], 2), session(&["a", "b", "c"], 2));
    }

    #[test]
    fn test_view_marks_cursor_and_outcomes() {
        let mut s = session(&["the", "cat", "sat"], 3);
        type_word(&mut s, "the");
        type_word(&mut s, "cot");
        s.type_char('s');

        let view = s.view();
        assert_eq!(view.typed_text, "s");
        assert_eq!(view.remaining_seconds, 60);
        assert!(view.timer_running);

        let outcomes: Vec<_> = view.words.iter().map(|w| w.outcome).collect();
        assert_eq!(
            outcomes,
            vec![Some(Outcome::Correct), Some(Outcome::Incorrect), None]
        );
        let current: Vec<_> = view.words.iter().map(|w| w.is_current).collect();
        assert_eq!(current, vec![false, false, true]);
    }

    #[test]
    fn test_view_of_next_window_starts_unknown() {
        let mut s = session(&["a", "b", "c", "d"], 2);
        type_word(&mut s, "a");
        type_word(&mut s, "b");

        let view = s.view();
        assert_eq!(view.words[0].text, "c");
        assert!(view.words.iter().all(|w| w.outcome.is_none()));
    }

    #[test]
    fn test_pure_transitions() {
        let s = session(&["hi", "yo"], 2);

        let s = apply_keystroke(s, Key::Char('h'));
        let s = apply_input(
            s,
            InputChange {
                value: "h".into(),
                data: Some("h".into()),
            },
        );
        let s = apply_keystroke(s, Key::Space);

        assert!(s.timer_running());
        assert_eq!(s.outcome_at(0), Some(Outcome::Incorrect));
        assert_eq!(s.keystrokes().correct, 1);

        let (s, result) = apply_tick(s);
        assert_eq!(result, None);
        assert_eq!(s.remaining_seconds(), 59);
    }
}

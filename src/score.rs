use std::fmt;

/// Characters that count as one "word" when converting keystrokes to wpm
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for a one-minute round: correct keystrokes over five.
///
/// Wrong keystrokes never affect the result.
pub fn wpm(correct_keystrokes: usize) -> u64 {
    (correct_keystrokes as f64 / CHARS_PER_WORD).round() as u64
}

/// Percentage of keystrokes that matched the target word, or `None` when
/// nothing was typed.
pub fn accuracy(correct_keystrokes: usize, wrong_keystrokes: usize) -> Option<f64> {
    let total = correct_keystrokes + wrong_keystrokes;
    match total {
        0 => None,
        total => Some(correct_keystrokes as f64 / total as f64 * 100.0),
    }
}

/// Accuracy formatted for the result card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyDisplay(pub Option<f64>);

impl fmt::Display for AccuracyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pct) => write!(f, "{pct:.2}%"),
            None => f.write_str("—"),
        }
    }
}

/// `(correct | wrong) total`
pub fn keystroke_summary(correct_keystrokes: usize, wrong_keystrokes: usize) -> String {
    format!(
        "({} | {}) {}",
        correct_keystrokes,
        wrong_keystrokes,
        correct_keystrokes + wrong_keystrokes
    )
}

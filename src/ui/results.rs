use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::score::{keystroke_summary, AccuracyDisplay};
use crate::session::RoundResult;

pub const RESULT_CARD_HEIGHT: u16 = 9;

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<16}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

/// Text of the "Your result" card
pub fn result_lines(result: &RoundResult) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    vec![
        Line::from(Span::styled(
            format!("{} WPM", result.wpm()),
            bold.fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            "(words per minute)",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::default(),
        stat_line(
            "Keystrokes",
            keystroke_summary(result.correct_keystrokes, result.wrong_keystrokes),
            Color::Blue,
        ),
        stat_line(
            "Accuracy",
            AccuracyDisplay(result.accuracy()).to_string(),
            Color::Yellow,
        ),
        stat_line("Correct words", result.correct_words.to_string(), Color::Green),
        stat_line("Wrong words", result.wrong_words.to_string(), Color::Red),
    ]
}

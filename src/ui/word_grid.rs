use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::session::Outcome;
use crate::view::WordView;

const CELL_PADDING: usize = 2;

fn word_style(word: &WordView) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    let base = match word.outcome {
        Some(Outcome::Correct) => base.fg(Color::Green),
        Some(Outcome::Incorrect) => base.fg(Color::Red),
        None => base.fg(Color::Gray),
    };

    if word.is_current {
        base.bg(Color::DarkGray).add_modifier(Modifier::UNDERLINED)
    } else {
        base
    }
}

/// Width of one grid cell: the widest word plus padding
pub fn cell_width(words: &[WordView]) -> usize {
    words.iter().map(|w| w.text.width()).max().unwrap_or(0) + CELL_PADDING
}

/// Lay the window out as rows of `columns` equally wide, centered cells
pub fn grid_lines(words: &[WordView], columns: u16) -> Vec<Line<'static>> {
    let columns = usize::from(columns.max(1));
    let width = cell_width(words);

    words
        .chunks(columns)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|word| {
                    let text_width = word.text.width();
                    let left = (width - text_width) / 2;
                    let right = width - text_width - left;
                    Span::styled(
                        format!("{}{}{}", " ".repeat(left), word.text, " ".repeat(right)),
                        word_style(word),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn grid_height(word_count: usize, columns: u16) -> u16 {
    u16::try_from(word_count.div_ceil(usize::from(columns.max(1)))).unwrap_or(u16::MAX)
}

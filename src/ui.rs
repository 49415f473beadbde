pub mod results;
pub mod word_grid;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::results::{result_lines, RESULT_CARD_HEIGHT};
use crate::ui::word_grid::{cell_width, grid_height, grid_lines};

const HORIZONTAL_MARGIN: u16 = 2;
const TIMER_WIDTH: u16 = 8;
const RESULT_CARD_WIDTH: u16 = 36;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.session.view();
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        // shrink the column count until the grid fits the terminal
        let inner_width = usize::from(area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2));
        let cell = cell_width(&view.words).max(1);
        let columns = self
            .columns
            .min(u16::try_from((inner_width / cell).max(1)).unwrap_or(u16::MAX));

        let grid_rows = grid_height(view.words.len(), columns);
        let result_height = if self.result.is_some() {
            RESULT_CARD_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1),                           // header
                Constraint::Length(grid_rows.saturating_add(2)), // word grid
                Constraint::Length(3),                           // input + timer
                Constraint::Length(result_height),               // result card
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Typer", bold_style.fg(Color::Magenta)))
            .render(chunks[0], buf);

        let grid = Paragraph::new(grid_lines(&view.words, columns))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        grid.render(chunks[1], buf);

        let input_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(TIMER_WIDTH)])
            .split(chunks[2]);

        let focused = self.state == AppState::Typing;
        let input_style = if !view.typed_text_on_track() {
            bold_style.fg(Color::Red)
        } else {
            bold_style
        };
        let mut input_spans = vec![Span::styled(view.typed_text.clone(), input_style)];
        if focused {
            input_spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { Style::default() } else { dim_style });
        Paragraph::new(Line::from(input_spans))
            .block(input_block)
            .render(input_chunks[0], buf);

        let timer_style = if view.timer_running { bold_style } else { dim_style };
        Paragraph::new(Span::styled(view.remaining_seconds.to_string(), timer_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(input_chunks[1], buf);

        if let Some(result) = &self.result {
            let [card_area] = Layout::horizontal([Constraint::Length(RESULT_CARD_WIDTH)])
                .flex(Flex::Center)
                .areas(chunks[3]);
            Paragraph::new(result_lines(result))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Span::styled(" Your result ", bold_style)),
                )
                .render(card_area, buf);
        }

        let legend_text = match self.state {
            AppState::Typing => "(tab) restart / (esc) quit",
            AppState::Results => "(enter) type again / (tab) restart / (esc) quit",
        };
        let legend = Paragraph::new(Span::styled(
            legend_text,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[5], buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

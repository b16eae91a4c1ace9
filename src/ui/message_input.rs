//! Compose field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::message_input_state::MessageInputState;

use super::styles;

const PLACEHOLDER_TEXT: &str = "Type a message, Enter to send";

const PROMPT_SYMBOL: &str = "> ";

pub fn render_message_input(frame: &mut Frame<'_>, area: Rect, input_state: &MessageInputState) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let (line, cursor_column) = build_input_line(input_state, inner_width);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );
    frame.render_widget(paragraph, area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(cursor_column.min(u16::MAX as usize) as u16);
    frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
}

/// Builds the visible line and the cursor column inside the field.
///
/// Text wider than the field is scrolled horizontally so the cursor stays
/// visible.
fn build_input_line(input_state: &MessageInputState, inner_width: usize) -> (Line<'static>, usize) {
    let prompt = Span::styled(PROMPT_SYMBOL, styles::input_prompt_style());

    if input_state.is_empty() {
        let line = Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT, styles::placeholder_style()),
        ]);
        return (line, PROMPT_SYMBOL.len());
    }

    let available = inner_width.saturating_sub(PROMPT_SYMBOL.len()).max(1);
    let cursor_width = input_state.cursor_display_width();
    let skip_columns = cursor_width.saturating_sub(available.saturating_sub(1));

    let text = input_state.text();
    let mut visible = String::new();
    let mut column = 0;
    for ch in text.chars() {
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if column >= skip_columns {
            visible.push(ch);
        }
        column += width;
    }

    let line = Line::from(vec![
        prompt,
        Span::styled(visible, styles::input_text_style()),
    ]);
    (line, PROMPT_SYMBOL.len() + cursor_width - skip_columns)
}

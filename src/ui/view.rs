use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::shell_state::ShellState;

use super::message_input::render_message_input;
use super::styles;
use super::transcript_rendering::{build_transcript_elements, render_rows};

const KEY_HINTS: &str = "Enter: send | PgUp/PgDn: scroll | Ctrl+R: reconnect | Esc: quit";

pub fn render(frame: &mut Frame<'_>, state: &mut ShellState) {
    let [transcript_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_transcript_panel(frame, transcript_area, state);
    render_message_input(frame, input_area, state.message_input());

    let status = Paragraph::new(status_line(state));
    frame.render_widget(status, status_area);
}

fn render_transcript_panel(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState) {
    let block = Block::default()
        .title(Span::styled(
            transcript_title(state),
            styles::panel_title_style(),
        ))
        .borders(Borders::ALL)
        .border_style(styles::panel_border_style());

    if state.transcript().is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No messages yet. Say hello!",
            styles::placeholder_style(),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let elements = build_transcript_elements(state.transcript().entries());
    let rows = render_rows(&elements, inner_width);
    let offset = state
        .transcript_mut()
        .resolve_scroll_offset(rows.len(), inner_height);

    let visible: Vec<Line<'static>> = rows.into_iter().skip(offset).take(inner_height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn transcript_title(state: &ShellState) -> String {
    let mut title = format!("Chat {}", state.chat_id());
    if !state.transcript().is_following_tail() {
        title.push_str(" [scrolled]");
    }
    title
}

fn status_line(state: &ShellState) -> Line<'static> {
    let connectivity = state.connectivity_status();
    let mut spans = vec![
        Span::styled(
            format!("[{}]", connectivity.as_label()),
            styles::connectivity_style(connectivity),
        ),
        Span::raw(format!(" connection: {}", state.connection_state().as_label())),
    ];

    if let Some(notice) = state.notice() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice.to_owned(), styles::notice_style()));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(KEY_HINTS, styles::hint_style()));
    Line::from(spans)
}

//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{envelope::SenderRole, events::ConnectivityStatus, transcript::EntryOrigin};

// =============================================================================
// Panel styles
// =============================================================================

pub fn panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn panel_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

// =============================================================================
// Transcript styles
// =============================================================================

/// Admins stand out from regular users; unknown roles stay neutral.
pub fn sender_style(sender: &SenderRole, origin: EntryOrigin) -> Style {
    let color = match (sender, origin) {
        (_, EntryOrigin::Local) => Color::Green,
        (SenderRole::Admin, EntryOrigin::Remote) => Color::Magenta,
        (SenderRole::User, EntryOrigin::Remote) => Color::Blue,
        (SenderRole::Other(_), EntryOrigin::Remote) => Color::White,
    };

    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn entry_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn entry_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

// =============================================================================
// Input and status styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn connectivity_style(status: ConnectivityStatus) -> Style {
    let color = match status {
        ConnectivityStatus::Online => Color::Green,
        ConnectivityStatus::Connecting => Color::Yellow,
        ConnectivityStatus::Offline => Color::Red,
    };

    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn notice_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

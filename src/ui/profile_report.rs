//! Plain-text report of the profile view for the one-shot commands.

use crate::domain::profile::{PasteSummary, ProfileView, ProfileViewState};

const TITLE_PREVIEW_CHARS: usize = 60;

pub fn profile_report(view: &ProfileView) -> Vec<String> {
    match view.ui_state() {
        ProfileViewState::Loading => vec!["Loading profile...".to_owned()],
        ProfileViewState::Error => vec!["Failed to load profile. Check [auth] token and retry.".to_owned()],
        ProfileViewState::Ready => {
            let mut lines = vec![
                format!("Name:  {}", view.name()),
                format!("Email: {}", view.email()),
                String::new(),
            ];

            if view.pastes().is_empty() {
                lines.push("No pastes yet.".to_owned());
                return lines;
            }

            lines.push(format!("Pastes ({}):", view.pastes().len()));
            lines.extend(view.pastes().iter().map(paste_line));
            lines
        }
    }
}

fn paste_line(paste: &PasteSummary) -> String {
    let created = paste
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_owned());
    let title = if paste.title.trim().is_empty() {
        "(untitled)".to_owned()
    } else {
        truncate(paste.title.trim(), TITLE_PREVIEW_CHARS)
    };

    format!("  {}  {}  {}", paste.id, created, title)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

//! Transcript rendering.
//!
//! Turns transcript entries into display rows:
//! - time and sender on a header row, content indented below it
//! - consecutive entries from the same sender share one header
//! - a date separator whenever the local day changes
//!
//! Content is wrapped to the panel width up front so the row count is exact
//! and scrolling can be resolved against it.

use chrono::{Local, NaiveDate, TimeZone};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::domain::{
    envelope::SenderRole,
    transcript::{EntryOrigin, TranscriptEntry},
};

use super::styles;

const CONTENT_INDENT: &str = "      ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptElement {
    DateSeparator(String),
    Entry {
        time: String,
        /// Set on the first entry of a sender group.
        sender: Option<SenderRole>,
        origin: EntryOrigin,
        content: String,
    },
}

pub fn build_transcript_elements(entries: &[TranscriptEntry]) -> Vec<TranscriptElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_sender: Option<(&SenderRole, EntryOrigin)> = None;

    for entry in entries {
        let date = timestamp_to_date(entry.appended_at_ms);
        if prev_date != Some(date) {
            elements.push(TranscriptElement::DateSeparator(format_date(date)));
            prev_sender = None;
        }

        let sender_key = (&entry.sender, entry.origin);
        let sender = (prev_sender != Some(sender_key)).then(|| entry.sender.clone());

        elements.push(TranscriptElement::Entry {
            time: format_time(entry.appended_at_ms),
            sender,
            origin: entry.origin,
            content: entry.content.clone(),
        });

        prev_date = Some(date);
        prev_sender = Some(sender_key);
    }

    elements
}

/// Renders elements into rows no wider than `width` columns.
pub fn render_rows(elements: &[TranscriptElement], width: usize) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(CONTENT_INDENT.len()).max(1);
    let mut rows = Vec::new();

    for element in elements {
        match element {
            TranscriptElement::DateSeparator(date) => {
                rows.push(
                    Line::from(Span::styled(
                        format!("--- {date} ---"),
                        styles::date_separator_style(),
                    ))
                    .alignment(Alignment::Center),
                );
            }
            TranscriptElement::Entry {
                time,
                sender,
                origin,
                content,
            } => {
                if let Some(sender) = sender {
                    rows.push(Line::from(vec![
                        Span::styled(format!("{time:>5} "), styles::entry_time_style()),
                        Span::styled(
                            format!("{}:", sender_label(sender, *origin)),
                            styles::sender_style(sender, *origin),
                        ),
                    ]));
                }

                for chunk in content
                    .lines()
                    .flat_map(|line| wrap_line(line, content_width))
                {
                    rows.push(Line::from(vec![
                        Span::raw(CONTENT_INDENT),
                        Span::styled(chunk, styles::entry_text_style()),
                    ]));
                }
            }
        }
    }

    rows
}

fn sender_label(sender: &SenderRole, origin: EntryOrigin) -> String {
    match origin {
        EntryOrigin::Local => format!("{sender} (you)"),
        EntryOrigin::Remote => sender.to_string(),
    }
}

/// Splits one line into pieces of at most `width` display columns.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || pieces.is_empty() {
        pieces.push(current);
    }

    pieces
}

fn timestamp_to_date(timestamp_ms: i64) -> NaiveDate {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.date_naive(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.date_naive(),
        chrono::LocalResult::None => Local::now().date_naive(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::None => "??:??".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // UTC instants; rendering uses the local zone, so only relative day
    // boundaries are asserted.
    const FEB_14_2026_10AM: i64 = 1771063200000;
    const FEB_15_2026_1PM: i64 = 1771160400000;

    fn entry(sender: SenderRole, origin: EntryOrigin, content: &str, at_ms: i64) -> TranscriptEntry {
        TranscriptEntry {
            sender,
            content: content.to_owned(),
            origin,
            appended_at_ms: at_ms,
        }
    }

    fn row_text(row: &Line<'_>) -> String {
        row.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn senders(elements: &[TranscriptElement]) -> Vec<Option<SenderRole>> {
        elements
            .iter()
            .filter_map(|element| match element {
                TranscriptElement::Entry { sender, .. } => Some(sender.clone()),
                TranscriptElement::DateSeparator(_) => None,
            })
            .collect()
    }

    #[test]
    fn empty_transcript_has_no_elements() {
        assert!(build_transcript_elements(&[]).is_empty());
    }

    #[test]
    fn starts_with_date_separator() {
        let elements = build_transcript_elements(&[entry(
            SenderRole::User,
            EntryOrigin::Local,
            "hello",
            FEB_14_2026_10AM,
        )]);

        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[0], TranscriptElement::DateSeparator(_)));
    }

    #[test]
    fn groups_consecutive_entries_by_sender() {
        let elements = build_transcript_elements(&[
            entry(SenderRole::Admin, EntryOrigin::Remote, "one", FEB_14_2026_10AM),
            entry(SenderRole::Admin, EntryOrigin::Remote, "two", FEB_14_2026_10AM + 60_000),
            entry(SenderRole::User, EntryOrigin::Local, "three", FEB_14_2026_10AM + 120_000),
        ]);

        assert_eq!(
            senders(&elements),
            vec![Some(SenderRole::Admin), None, Some(SenderRole::User)]
        );
    }

    #[test]
    fn echoed_copy_of_own_message_starts_a_new_group() {
        let elements = build_transcript_elements(&[
            entry(SenderRole::User, EntryOrigin::Local, "hello", FEB_14_2026_10AM),
            entry(SenderRole::User, EntryOrigin::Remote, "hello", FEB_14_2026_10AM + 10),
        ]);

        assert_eq!(
            senders(&elements),
            vec![Some(SenderRole::User), Some(SenderRole::User)]
        );
    }

    #[test]
    fn inserts_separator_on_day_change_and_resets_grouping() {
        let elements = build_transcript_elements(&[
            entry(SenderRole::Admin, EntryOrigin::Remote, "day one", FEB_14_2026_10AM),
            entry(SenderRole::Admin, EntryOrigin::Remote, "day two", FEB_15_2026_1PM),
        ]);

        assert_eq!(elements.len(), 4);
        assert!(matches!(elements[2], TranscriptElement::DateSeparator(_)));
        assert_eq!(
            senders(&elements),
            vec![Some(SenderRole::Admin), Some(SenderRole::Admin)]
        );
    }

    #[test]
    fn renders_header_and_indented_content() {
        let elements = build_transcript_elements(&[entry(
            SenderRole::Admin,
            EntryOrigin::Remote,
            "hi",
            FEB_14_2026_10AM,
        )]);

        let rows = render_rows(&elements, 40);

        assert_eq!(rows.len(), 3);
        assert!(row_text(&rows[1]).ends_with("admin:"));
        assert_eq!(row_text(&rows[2]), format!("{CONTENT_INDENT}hi"));
    }

    #[test]
    fn local_entries_are_labelled() {
        let elements = build_transcript_elements(&[entry(
            SenderRole::User,
            EntryOrigin::Local,
            "hello",
            FEB_14_2026_10AM,
        )]);

        let rows = render_rows(&elements, 40);

        assert!(row_text(&rows[1]).ends_with("user (you):"));
    }

    #[test]
    fn wraps_long_content_to_width() {
        let elements = build_transcript_elements(&[entry(
            SenderRole::Admin,
            EntryOrigin::Remote,
            "abcdefghij",
            FEB_14_2026_10AM,
        )]);

        let rows = render_rows(&elements, CONTENT_INDENT.len() + 4);

        let content_rows: Vec<String> = rows[2..].iter().map(row_text).collect();
        assert_eq!(
            content_rows,
            vec![
                format!("{CONTENT_INDENT}abcd"),
                format!("{CONTENT_INDENT}efgh"),
                format!("{CONTENT_INDENT}ij"),
            ]
        );
    }

    #[test]
    fn wrap_respects_wide_characters() {
        assert_eq!(wrap_line("日本語", 4), vec!["日本".to_owned(), "語".to_owned()]);
        assert_eq!(wrap_line("", 4), vec![String::new()]);
    }

    #[test]
    fn format_date_produces_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date");

        assert_eq!(format_date(date), "14 Feb 2026");
    }

    #[test]
    fn format_time_produces_hh_mm() {
        let time = format_time(FEB_14_2026_10AM);

        assert_eq!(time.len(), 5);
        assert!(time.contains(':'));
    }
}

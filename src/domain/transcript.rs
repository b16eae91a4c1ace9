use chrono::Local;

use super::envelope::{ChatEnvelope, SenderRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Optimistic echo of a locally composed message.
    Local,
    /// Envelope received from the server.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub sender: SenderRole,
    pub content: String,
    pub origin: EntryOrigin,
    /// Local wall-clock time the entry was appended, display only.
    pub appended_at_ms: i64,
}

impl TranscriptEntry {
    pub fn local(sender: SenderRole, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            origin: EntryOrigin::Local,
            appended_at_ms: Local::now().timestamp_millis(),
        }
    }

    pub fn remote(envelope: ChatEnvelope) -> Self {
        Self {
            sender: envelope.sender,
            content: envelope.content,
            origin: EntryOrigin::Remote,
            appended_at_ms: Local::now().timestamp_millis(),
        }
    }
}

/// Append-only transcript plus the scroll position of its viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptState {
    entries: Vec<TranscriptEntry>,
    scroll_offset: usize,
    follow_tail: bool,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            scroll_offset: 0,
            follow_tail: true,
        }
    }
}

impl TranscriptState {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn is_following_tail(&self) -> bool {
        self.follow_tail
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.follow_tail = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        if self.follow_tail {
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    /// Resolves the top row to render for `total_rows` of content in a
    /// viewport of `viewport_height` rows. Scrolling past the end resumes
    /// following the tail.
    pub fn resolve_scroll_offset(&mut self, total_rows: usize, viewport_height: usize) -> usize {
        let max_offset = total_rows.saturating_sub(viewport_height);

        if self.follow_tail || self.scroll_offset >= max_offset {
            self.follow_tail = true;
            self.scroll_offset = max_offset;
        }

        self.scroll_offset
    }
}

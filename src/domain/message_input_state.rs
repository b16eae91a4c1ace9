//! Editable state of the compose field.

use unicode_width::UnicodeWidthChar;

/// Upper bound on composed message length, in characters.
pub const MAX_INPUT_CHARS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageInputState {
    chars: Vec<char>,
    /// Cursor as a character index into `chars`.
    cursor: usize,
}

impl MessageInputState {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    #[cfg(test)]
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Terminal columns occupied by the text left of the cursor.
    pub fn cursor_display_width(&self) -> usize {
        self.chars[..self.cursor]
            .iter()
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    /// Inserts at the cursor. Returns false once the length cap is reached.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.chars.len() >= MAX_INPUT_CHARS {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Inserts as much of `text` as fits under the cap. Newlines become spaces
    /// since the field is single-line.
    pub fn insert_str(&mut self, text: &str) -> usize {
        let mut inserted = 0;
        for ch in text.chars().map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch }) {
            if !self.insert_char(ch) {
                break;
            }
            inserted += 1;
        }
        inserted
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> MessageInputState {
        let mut state = MessageInputState::default();
        state.insert_str(text);
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = MessageInputState::default();

        assert!(state.is_empty());
        assert_eq!(state.text(), "");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn insert_in_the_middle_keeps_cursor_after_inserted_char() {
        let mut state = typed("Ho");
        state.move_cursor_left();

        state.insert_char('i');

        assert_eq!(state.text(), "Hio");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut state = typed("H");
        state.move_cursor_home();

        state.delete_char_before();

        assert_eq!(state.text(), "H");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut state = typed("abc");
        state.move_cursor_home();
        state.move_cursor_right();

        state.delete_char_at();

        assert_eq!(state.text(), "ac");
        assert_eq!(state.cursor_position(), 1);
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut state = typed("ab");

        state.move_cursor_right();
        assert_eq!(state.cursor_position(), 2);

        state.move_cursor_home();
        state.move_cursor_left();
        assert_eq!(state.cursor_position(), 0);

        state.move_cursor_end();
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn edits_cyrillic_by_character() {
        let mut state = typed("Привет");

        state.delete_char_before();
        assert_eq!(state.text(), "Приве");

        state.move_cursor_home();
        state.delete_char_at();
        assert_eq!(state.text(), "риве");
    }

    #[test]
    fn pasted_newlines_become_spaces() {
        let state = typed("one\ntwo");

        assert_eq!(state.text(), "one two");
    }

    #[test]
    fn cursor_width_counts_wide_characters() {
        let state = typed("a你");

        assert_eq!(state.cursor_position(), 2);
        assert_eq!(state.cursor_display_width(), 3);
    }

    #[test]
    fn clear_resets_text_and_cursor() {
        let mut state = typed("Hi");

        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn insert_respects_length_cap() {
        let mut state = MessageInputState::default();
        for _ in 0..MAX_INPUT_CHARS {
            assert!(state.insert_char('x'));
        }

        assert!(!state.insert_char('y'));
        assert_eq!(state.insert_str("more"), 0);
        assert_eq!(state.text().chars().count(), MAX_INPUT_CHARS);
    }
}

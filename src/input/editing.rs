//! Buffer editing, cursor motion and history recall.

use super::TextInput;
use crate::keymap::Command;

impl TextInput {
    /// The buffer contents.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the buffer and moves the cursor to its end.
    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().collect();
        if self.char_limit > 0 {
            runes.truncate(self.char_limit);
        }
        self.value = runes;
        self.pos = self.value.len();
        self.handle_overflow();
    }

    /// Empties the buffer.
    pub fn reset(&mut self) {
        self.value.clear();
        self.set_cursor(0);
    }

    /// Cursor position as a character index.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the end of the buffer.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Moves the cursor to the start of the buffer.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end of the buffer.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Inserts text at the cursor, honouring the character limit.
    pub fn insert_str(&mut self, s: &str) {
        let room = if self.char_limit > 0 {
            self.char_limit.saturating_sub(self.value.len())
        } else {
            usize::MAX
        };
        let runes: Vec<char> = s.chars().take(room).collect();
        let n = runes.len();
        self.value.splice(self.pos..self.pos, runes);
        self.set_cursor(self.pos + n);
    }

    /// Applies an editing or motion command. Returns whether the command
    /// belongs to the input; the buffer may be unchanged either way.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Left => self.set_cursor(self.pos.saturating_sub(1)),
            Command::Right => self.set_cursor(self.pos + 1),
            Command::WordLeft => self.word_backward(),
            Command::WordRight => self.word_forward(),
            Command::Home => self.cursor_start(),
            Command::End => self.cursor_end(),
            Command::Backspace => {
                if self.pos > 0 {
                    self.value.remove(self.pos - 1);
                    self.set_cursor(self.pos - 1);
                }
            }
            Command::DeleteChar => {
                if self.pos < self.value.len() {
                    self.value.remove(self.pos);
                    self.handle_overflow();
                }
            }
            Command::DeleteWordBackward => self.delete_word_backward(),
            Command::DeleteWordForward => self.delete_word_forward(),
            Command::DeleteToEnd => {
                self.value.truncate(self.pos);
                self.cursor_end();
            }
            Command::DeleteToStart => {
                self.value.drain(..self.pos);
                self.offset = 0;
                self.set_cursor(0);
            }
            Command::HistoryPrev => self.history_prev(),
            Command::HistoryNext => self.history_next(),
            _ => return false,
        }
        true
    }

    /// Recalls the previous history item.
    pub fn history_prev(&mut self) {
        if self.history_pos == 0 {
            return;
        }
        self.history_pos -= 1;
        if let Some(item) = self.history.get(self.history_pos).cloned() {
            self.set_value(&item);
        }
    }

    /// Recalls the next history item; past the newest item the buffer is
    /// emptied.
    pub fn history_next(&mut self) {
        if self.history_pos >= self.history.len() {
            return;
        }
        self.history_pos += 1;
        let item = self.history.get(self.history_pos).cloned().unwrap_or_default();
        self.set_value(&item);
    }

    fn delete_word_backward(&mut self) {
        if self.pos == 0 {
            return;
        }
        let end = self.pos;
        let mut start = end;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..end);
        self.set_cursor(start);
    }

    fn delete_word_forward(&mut self) {
        let start = self.pos;
        let mut end = start;
        while end < self.value.len() && self.value[end].is_whitespace() {
            end += 1;
        }
        while end < self.value.len() && !self.value[end].is_whitespace() {
            end += 1;
        }
        self.value.drain(start..end);
        self.set_cursor(start);
    }

    fn word_backward(&mut self) {
        let mut i = self.pos;
        while i > 0 && self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        self.set_cursor(i);
    }

    fn word_forward(&mut self) {
        let mut i = self.pos;
        while i < self.value.len() && self.value[i].is_whitespace() {
            i += 1;
        }
        while i < self.value.len() && !self.value[i].is_whitespace() {
            i += 1;
        }
        self.set_cursor(i);
    }

    /// Keeps the cursor inside the visible window `offset..offset_right`.
    pub(super) fn handle_overflow(&mut self) {
        let width = self.width();
        if width == 0 || self.value.len() <= width {
            self.offset = 0;
            self.offset_right = self.value.len();
            return;
        }

        self.offset_right = self.offset_right.min(self.value.len());
        if self.pos < self.offset {
            self.offset = self.pos;
            self.offset_right = (self.offset + width).min(self.value.len());
        } else if self.pos >= self.offset_right {
            // One column stays free for the cursor at the end of the text.
            self.offset_right = self.pos;
            self.offset = self.offset_right.saturating_sub(width.saturating_sub(1));
        }
    }
}

//! Single-line text input with cursor management.
//!
//! Backs the section search bars, the command palette and the contact form
//! fields.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::theme::Palette;

#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only counts as empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Render as `prompt` + text, with a block cursor when `focused`.
    /// An empty, unfocused buffer shows `placeholder` instead.
    pub fn to_line(
        &self,
        prompt: &str,
        placeholder: &str,
        focused: bool,
        palette: &Palette,
    ) -> Line<'static> {
        let mut spans = vec![Span::styled(prompt.to_string(), palette.title())];

        if self.content.is_empty() && !focused {
            spans.push(Span::styled(placeholder.to_string(), palette.dim()));
            return Line::from(spans);
        }

        let before = &self.content[..self.cursor];
        let cursor_char = self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after = if self.cursor < self.content.len() {
            &self.content[self.cursor + cursor_char.len()..]
        } else {
            ""
        };

        spans.push(Span::styled(before.to_string(), palette.text()));
        if focused {
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(palette.text).fg(palette.bg_base),
            ));
            spans.push(Span::styled(after.to_string(), palette.text()));
        } else {
            spans.push(Span::styled(
                self.content[self.cursor..].to_string(),
                palette.text(),
            ));
        }
        Line::from(spans)
    }
}

/// Apply an editing key to `buf`. Returns true when the text changed.
pub fn route_text_input(buf: &mut InputBuffer, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match (modifiers, code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buf.insert_char(c);
            true
        }
        (KeyModifiers::NONE, KeyCode::Backspace) => {
            buf.backspace();
            true
        }
        (KeyModifiers::NONE, KeyCode::Delete) => {
            buf.delete();
            true
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            buf.clear();
            true
        }
        (KeyModifiers::NONE, KeyCode::Left) => {
            buf.move_left();
            false
        }
        (KeyModifiers::NONE, KeyCode::Right) => {
            buf.move_right();
            false
        }
        (KeyModifiers::NONE, KeyCode::Home) => {
            buf.move_home();
            false
        }
        (KeyModifiers::NONE, KeyCode::End) => {
            buf.move_end();
            false
        }
        _ => false,
    }
}

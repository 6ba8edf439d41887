use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest answer a player can type; a sentence never gets near it.
const MAX_CHARS: usize = 240;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor used to type what the player said aloud.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        let text: String = text.chars().take(MAX_CHARS).collect();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When the cursor is at the end of the text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at(self.cursor);
                }
            }
            KeyCode::Delete => self.remove_at(self.cursor),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                if self.len() < MAX_CHARS {
                    let byte_offset = self.char_to_byte(self.cursor);
                    self.text.insert(byte_offset, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_at(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// unix-word-rubout: skip whitespace, then non-whitespace.
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut LineInput, s: &str) {
        for ch in s.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_accented_text() {
        let mut input = LineInput::new("");
        type_str(&mut input, "el pájaro canta");
        assert_eq!(input.value(), "el pájaro canta");

        input.handle(key(KeyCode::Home));
        type_str(&mut input, "¡");
        assert_eq!(input.value(), "¡el pájaro canta");
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut input = LineInput::new("árbol");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "árbo");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "rbo");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "rbo");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut input = LineInput::new("la luna brilla  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "la luna ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "la ");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = LineInput::new("una flor");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.render_parts(), ("", None, ""));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::new("sol");
        input.handle(key(KeyCode::Right));
        assert_eq!(input.render_parts(), ("sol", None, ""));
        input.handle(ctrl('a'));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.render_parts(), ("", Some('s'), "ol"));
        input.handle(key(KeyCode::Right));
        assert_eq!(input.render_parts(), ("s", Some('o'), "l"));
        input.handle(ctrl('e'));
        assert_eq!(input.render_parts(), ("sol", None, ""));
    }

    #[test]
    fn length_is_capped() {
        let mut input = LineInput::new(&"a".repeat(MAX_CHARS + 10));
        assert_eq!(input.value().chars().count(), MAX_CHARS);
        input.handle(key(KeyCode::Char('b')));
        assert!(!input.value().contains('b'));
    }

    #[test]
    fn submit_and_cancel() {
        let mut input = LineInput::new("hola");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Char('x'))), InputResult::Continue);
    }
}

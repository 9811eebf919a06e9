use crossterm::event::KeyCode;

/// A text input field with encapsulated state.
///
/// The cursor is a character index, not a byte index.
///
/// # Example
/// ```
/// use barcode_agent::utils::text_input::TextInput;
///
/// let mut input = TextInput::new();
/// input.insert_char('h');
/// input.insert_char('i');
/// assert_eq!(input.text(), "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Set the text and move cursor to end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position. Control characters are
    /// ignored.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let byte_index = self.byte_index(self.cursor);
        self.text.insert(byte_index, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_index = self.byte_index(self.cursor);
            self.text.remove(byte_index);
        }
    }

    /// Delete the character at the cursor position.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let byte_index = self.byte_index(self.cursor);
            self.text.remove(byte_index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Handle a key code event.
    ///
    /// Returns true if the key was handled.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_new() {
        let input = TextInput::new();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
        assert!(input.is_empty());
    }

    #[test]
    fn test_text_input_with_text() {
        let input = TextInput::with_text("Widget");
        assert_eq!(input.text(), "Widget");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_text("hllo");
        input.move_home();
        input.move_right();
        input.insert_char('e');
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_unicode_handling() {
        let mut input = TextInput::with_text("Käse");
        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "Kä");

        input.insert_char('ß');
        assert_eq!(input.text(), "Käß");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\u{7}');
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::with_text("hello");
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_delete() {
        let mut input = TextInput::with_text("hello");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "ello");
        assert_eq!(input.cursor(), 0);

        input.move_end();
        input.delete();
        assert_eq!(input.text(), "ello");
    }

    #[test]
    fn test_handle_key() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyCode::Char('a')));
        assert!(input.handle_key(KeyCode::Char('b')));
        assert!(input.handle_key(KeyCode::Left));
        assert!(input.handle_key(KeyCode::Backspace));
        assert_eq!(input.text(), "b");
        assert!(!input.handle_key(KeyCode::Enter));
    }

    #[test]
    fn test_whitespace_is_empty() {
        let input = TextInput::with_text("   ");
        assert!(input.is_empty());
        assert_eq!(input.text_trimmed(), "");
    }
}

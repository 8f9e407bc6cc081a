/// A single-line text field with cursor handling.
///
/// Backs the editable fields on the review screen. Holds content and a
/// character-index cursor; rendering is done by the screen that owns it.
#[derive(Debug, Clone, Default)]
pub struct FieldEditor {
    /// The text content of the field
    content: String,
    /// Current cursor position (character index)
    cursor_position: usize,
}

impl FieldEditor {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field pre-filled with `content`, cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor_position = content.chars().count();
        Self {
            content,
            cursor_position,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor_position);
        self.content.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor (Backspace).
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.byte_index(self.cursor_position);
            self.content.remove(byte_idx);
        }
    }

    /// Delete the character at the cursor (Delete key).
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.content.chars().count() {
            let byte_idx = self.byte_index(self.cursor_position);
            self.content.remove(byte_idx);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.content.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Move cursor to the beginning of the text.
    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to the end of the text.
    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.content.chars().count();
    }

    /// Replace the content, cursor moves to the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor_position = self.content.chars().count();
    }

    /// Current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current cursor position as a character index.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Byte offset of the given character index.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

//! Input field handling for the terminal user interface.
//!
//! Cursors count characters, not bytes, so Spanish and Vietnamese text edits
//! cleanly.

/// Byte offset of the `idx`-th character of `s`, or `s.len()` past the end.
fn byte_index(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map(|(i, _)| i).unwrap_or(s.len())
}

/// A single-line text input with a cursor and active flag.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = byte_index(&self.value, self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = byte_index(&self.value, self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = byte_index(&self.value, self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Multi-line editor used for task notes.
///
/// The text is kept as lines; `row` and `col` address a character within
/// them. An empty text is one empty line.
#[derive(Clone, Debug)]
pub struct TextArea {
    lines: Vec<String>,
    pub row: usize,
    pub col: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self { lines: vec![String::new()], row: 0, col: 0 }
    }
}

impl TextArea {
    /// Open `text` for editing with the cursor at the very end.
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self { lines, row, col }
    }

    /// The edited text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    /// Split the current line at the cursor.
    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete before the cursor, joining with the previous line at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    /// Delete at the cursor, joining the next line at end of line.
    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = self.line_len(self.row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_field_multibyte_editing() {
        let mut f = InputField::with_value("Ngày");
        assert_eq!(f.cursor, 4);
        f.handle_backspace();
        assert_eq!(f.value, "Ngà");
        f.move_cursor_left();
        f.handle_char('ư');
        assert_eq!(f.value, "Ngưà");
        f.handle_delete();
        assert_eq!(f.value, "Ngư");
        f.move_cursor_right();
        f.move_cursor_right();
        assert_eq!(f.cursor, 3);
    }

    #[test]
    fn test_input_field_edges() {
        let mut f = InputField::new();
        f.handle_backspace();
        f.handle_delete();
        f.move_cursor_left();
        assert_eq!((f.value.as_str(), f.cursor), ("", 0));
        for c in "2012-05-01".chars() {
            f.handle_char(c);
        }
        assert_eq!(f.value, "2012-05-01");
    }

    #[test]
    fn test_text_area_newline_and_join() {
        let mut t = TextArea::from_text("Llamé al centro");
        assert_eq!((t.row, t.col), (0, 15));
        for _ in 0..6 {
            t.move_left();
        }
        t.newline();
        assert_eq!(t.text(), "Llamé al \ncentro");
        assert_eq!((t.row, t.col), (1, 0));
        t.backspace();
        assert_eq!(t.text(), "Llamé al centro");
        assert_eq!((t.row, t.col), (0, 9));
        t.end();
        t.newline();
        t.insert_char('é');
        t.move_up();
        t.end();
        t.delete();
        assert_eq!(t.text(), "Llamé al centroé");
    }

    #[test]
    fn test_text_area_cursor_clamps_between_lines() {
        let mut t = TextArea::from_text("a long first line\nab");
        assert_eq!((t.row, t.col), (1, 2));
        t.move_up();
        t.end();
        t.move_down();
        assert_eq!(t.col, 2);
        t.move_right();
        assert_eq!((t.row, t.col), (1, 2));
        t.home();
        t.move_left();
        assert_eq!((t.row, t.col), (0, 17));
        t.clear();
        assert_eq!(t.text(), "");
        assert_eq!(TextArea::from_text("").lines().len(), 1);
    }
}

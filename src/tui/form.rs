//! Multi-field form widget: labelled single-line inputs with cursor editing.
//!
//! Used by the tenant setup view, the settings overlay, and the add-resource
//! overlay.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// A single editable field.
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Cursor position (character offset into `value`).
    pub cursor: usize,
    /// Mask the value when rendering (tokens, credentials).
    pub secret: bool,
    pub required: bool,
}

impl Field {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            secret: false,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
        self
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.char_to_byte(self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_pos = self.char_to_byte(self.cursor);
            let prev_byte_pos = self.char_to_byte(self.cursor - 1);
            self.value.drain(prev_byte_pos..byte_pos);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete(&mut self) {
        let char_count = self.value.chars().count();
        if self.cursor < char_count {
            let byte_pos = self.char_to_byte(self.cursor);
            let next_byte_pos = self.char_to_byte(self.cursor + 1);
            self.value.drain(byte_pos..next_byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        let char_count = self.value.chars().count();
        if self.cursor < char_count {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Clear the field (Ctrl+U).
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Value as shown on screen (masked for secret fields).
    pub fn display_value(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Convert a char-based cursor position to a byte offset.
    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// State of a whole form: an ordered field list plus focus.
pub struct FormState {
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub focused: usize,
}

impl FormState {
    pub fn new(title: &'static str, fields: Vec<Field>) -> Self {
        Self {
            title,
            fields,
            focused: 0,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut Field> {
        self.fields.get_mut(self.focused)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Trimmed value of the field at `idx` (empty string if out of range).
    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.trim()).unwrap_or("")
    }

    /// Value of the field at `idx` as an Option, None when blank.
    pub fn optional_value(&self, idx: usize) -> Option<String> {
        let v = self.value(idx);
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    }

    /// Label of the first required field left blank, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
    }

    /// Reset all field values and focus.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused = 0;
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Lines needed to draw the form: borders, a hint line, and one row per field.
pub fn form_height(form: &FormState) -> u16 {
    form.fields.len() as u16 + 4
}

/// Render the form inside a bordered block, clearing what's underneath.
///
/// Sets the terminal cursor into the focused field.
pub fn render(area: Rect, frame: &mut Frame, form: &FormState, hint: &str) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let label_width = form
        .fields
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);

    let mut cursor: Option<(u16, u16)> = None;

    for (idx, field) in form.fields.iter().enumerate() {
        let y = inner.y + idx as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let focused = idx == form.focused;

        let marker = if focused { "\u{25BA} " } else { "  " };
        let label = format!("{}{:<width$} ", marker, field.label, width = label_width);
        let label_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = field.display_value();
        let value_style = if field.secret {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let line = Line::from(vec![
            Span::styled(label.clone(), label_style),
            Span::styled(value, value_style),
        ]);
        frame.render_widget(Paragraph::new(line), row);

        if focused {
            let cursor_x = row.x + label.len() as u16 + field.cursor as u16;
            cursor = Some((cursor_x.min(row.x + row.width.saturating_sub(1)), y));
        }
    }

    // Hint line below the fields.
    let hint_y = inner.y + form.fields.len() as u16 + 1;
    if hint_y < inner.y + inner.height {
        let hint_area = Rect::new(inner.x, hint_y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            ))),
            hint_area,
        );
    }

    if let Some((cx, cy)) = cursor {
        frame.set_cursor_position((cx, cy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(
            "Test",
            vec![
                Field::new("Name").required(),
                Field::new("Token").secret(),
            ],
        )
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut field = Field::new("Name");
        for c in "héllo".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "héllo");
        field.backspace();
        assert_eq!(field.value, "héll");
        assert_eq!(field.cursor, 4);
    }

    #[test]
    fn test_edit_in_the_middle() {
        let mut field = Field::new("Name").with_value("abc");
        field.move_home();
        field.move_right();
        field.insert_char('x');
        assert_eq!(field.value, "axbc");
        field.delete();
        assert_eq!(field.value, "axc");
    }

    #[test]
    fn test_secret_masking() {
        let field = Field::new("Token").secret().with_value("s3cret");
        assert_eq!(field.display_value(), "******");
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = form();
        assert_eq!(form.focused, 0);
        form.next_field();
        assert_eq!(form.focused, 1);
        form.next_field();
        assert_eq!(form.focused, 0);
        form.prev_field();
        assert_eq!(form.focused, 1);
    }

    #[test]
    fn test_missing_required() {
        let mut form = form();
        assert_eq!(form.missing_required(), Some("Name"));
        if let Some(field) = form.focused_field_mut() {
            field.insert_char('a');
        }
        assert_eq!(form.missing_required(), None);
    }

    #[test]
    fn test_optional_value_blank_is_none() {
        let mut form = form();
        assert_eq!(form.optional_value(1), None);
        form.fields[1].value = "  ".to_string();
        assert_eq!(form.optional_value(1), None);
        form.fields[1].value = " tok ".to_string();
        assert_eq!(form.optional_value(1).as_deref(), Some("tok"));
    }
}

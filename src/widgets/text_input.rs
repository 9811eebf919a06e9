//! Text input widget for rendering TextInput instances.
//!
//! Renders a bordered, titled field and places the terminal cursor when the
//! field is focused.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// A widget for rendering TextInput with consistent styling.
///
/// # Example
/// ```
/// use barcode_agent::widgets::TextInputWidget;
/// use barcode_agent::utils::TextInput;
///
/// let input = TextInput::with_text("Widget");
/// let widget = TextInputWidget::new(&input)
///     .title("Product name")
///     .placeholder("Enter a name...")
///     .focused(true);
/// // frame.render_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    /// Read-only fields show their text but never take the cursor
    read_only: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
            read_only: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Get the display text (actual text or placeholder).
    fn display_text(&self) -> &str {
        let text = self.input.text();
        if text.is_empty() {
            self.placeholder.unwrap_or("")
        } else {
            text
        }
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.read_only || self.input.text().is_empty() {
            t.muted_style()
        } else {
            t.text_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let t = theme();
        let border_style = if self.focused && !self.read_only {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.focused || self.read_only {
            return None;
        }
        let inner = self.create_block().inner(area);
        let cursor = self.input.cursor().min(inner.width.saturating_sub(1) as usize);
        Some(Position::new(inner.x + cursor as u16, inner.y))
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.display_text().to_string())
            .block(self.create_block())
            .style(self.text_style())
            .render(area, buf);
    }
}

/// Extension trait for Frame to render TextInputWidget with cursor support.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let cursor = widget.cursor_position(area);
        self.render_widget(widget, area);
        if let Some(position) = cursor {
            self.set_cursor_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_empty_with_placeholder() {
        let input = TextInput::new();
        let widget = TextInputWidget::new(&input).placeholder("Enter text...");
        assert_eq!(widget.display_text(), "Enter text...");
    }

    #[test]
    fn test_display_text_normal() {
        let input = TextInput::with_text("hello");
        let widget = TextInputWidget::new(&input);
        assert_eq!(widget.display_text(), "hello");
    }

    #[test]
    fn test_cursor_only_when_focused() {
        let input = TextInput::with_text("abc");
        let area = Rect::new(0, 0, 20, 3);

        assert_eq!(TextInputWidget::new(&input).cursor_position(area), None);
        assert_eq!(
            TextInputWidget::new(&input).focused(true).cursor_position(area),
            Some(Position::new(4, 1))
        );
        assert_eq!(
            TextInputWidget::new(&input)
                .focused(true)
                .read_only(true)
                .cursor_position(area),
            None
        );
    }
}

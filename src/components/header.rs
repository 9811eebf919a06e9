use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Common header component for all pages
pub struct Header;

impl Header {
    /// Render a header with the page title and the settings toggle
    ///
    /// # Arguments
    /// * `frame` - The frame to render to
    /// * `area` - The area to render the header in
    /// * `title` - The page title (e.g., "Product")
    /// * `settings_hint` - Key and label of the settings toggle (e.g., "O: view settings")
    ///
    /// # Returns
    /// The height of the header (for layout calculations)
    pub fn render(frame: &mut Frame, area: Rect, title: &str, settings_hint: &str) -> u16 {
        let t = theme();
        let header_block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(" Barcode Agent ")
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(ratatui::widgets::Padding::new(1, 1, 0, 0));

        let inner_area = header_block.inner(area);
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(settings_hint.chars().count() as u16),
            ])
            .split(inner_area);

        frame.render_widget(
            Paragraph::new(title).style(t.emphasis_style()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(settings_hint)
                .style(t.muted_style())
                .alignment(Alignment::Right),
            chunks[1],
        );

        area.height
    }
}

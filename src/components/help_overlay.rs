//! Help Overlay Component
//!
//! Displays the current keybindings, grouped by category.

use crate::keymap::{KeyBinding, Keymap};
use crate::styles::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    /// Lines listing every binding, one category header per group
    pub fn binding_lines(keymap: &Keymap) -> Vec<Line<'static>> {
        let t = theme();
        let mut bindings: Vec<KeyBinding> = keymap.all_bindings();
        // Stable sort keeps the preset order within a category
        bindings.sort_by_key(|b| b.action.category());

        let mut lines = Vec::new();
        let mut current_category = "";
        for binding in &bindings {
            let category = binding.action.category();
            if category != current_category {
                if !current_category.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    format!("  {} ", category),
                    t.title_style().add_modifier(Modifier::UNDERLINED),
                )));
                current_category = category;
            }

            lines.push(Line::from(vec![
                Span::styled(format!("    {:12}", binding.display()), t.emphasis_style()),
                Span::styled(binding.get_description().to_string(), t.text_style()),
            ]));
        }
        lines
    }

    /// Render the help overlay in the center of the screen
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) {
        let t = theme();

        let popup_width = (area.width * 9 / 10).min(80);
        let popup_height = (area.height * 9 / 10).min(40);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(popup_width) / 2,
            area.y + area.height.saturating_sub(popup_height) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let title = format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(t.border_focused_style());

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(inner_area);

        let bindings_paragraph = Paragraph::new(Self::binding_lines(keymap))
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left);
        frame.render_widget(bindings_paragraph, chunks[0]);

        let footer_text = format!(
            "Edit keybindings in: {}\nPress any key to close",
            config_path
        );
        let footer = Paragraph::new(footer_text)
            .style(t.muted_style())
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_one_header() {
        let lines = HelpOverlay::binding_lines(&Keymap::default());
        let headers: Vec<String> = lines
            .iter()
            .filter(|l| l.spans.len() == 1 && !l.spans[0].content.trim().is_empty())
            .map(|l| l.spans[0].content.trim().to_string())
            .collect();

        assert_eq!(headers, vec!["Forms", "Global", "Navigation", "Product"]);
    }
}

//! Product screen: name and comments of the product on display.

use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction};
use crate::state::Session;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

pub struct ProductViewScreen;

impl ProductViewScreen {
    fn comment_count(session: &Session) -> usize {
        session
            .displayed_product
            .as_ref()
            .and_then(|p| p.get("comments"))
            .and_then(|c| c.as_array())
            .map_or(0, Vec::len)
    }
}

impl Screen for ProductViewScreen {
    fn title(&self) -> &'static str {
        "Product"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let content = ctx.content();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let name = Paragraph::new(content.text("productname"))
            .style(t.title_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .title(" Name "),
            );
        frame.render_widget(name, chunks[0]);

        let comments = content.list("comments");
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(format!(" Comments ({}) ", comments.len()));

        if comments.is_empty() {
            frame.render_widget(
                Paragraph::new("No comments yet")
                    .style(t.muted_style())
                    .block(block),
                chunks[1],
            );
            return Ok(());
        }

        let items: Vec<ListItem> = comments
            .iter()
            .map(|row| {
                let field = |name: &str| row.get(name).map_or("", String::as_str);
                let mut header = vec![Span::styled(field("by").to_string(), t.emphasis_style())];
                if !field("date").is_empty() {
                    header.push(Span::styled(format!("  {}", field("date")), t.muted_style()));
                }
                ListItem::new(vec![
                    Line::from(header),
                    Line::from(Span::styled(field("text").to_string(), t.text_style())),
                ])
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(ctx.session.comment_scroll.min(comments.len() - 1)));

        let list = List::new(items)
            .block(block)
            .highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(list, chunks[1], &mut state);
        Ok(())
    }

    fn handle_event(
        &self,
        _key: KeyEvent,
        action: Option<Action>,
        session: &mut Session,
    ) -> Result<ScreenAction> {
        match action {
            Some(Action::MoveUp) => {
                session.comment_scroll = session.comment_scroll.saturating_sub(1);
                Ok(ScreenAction::None)
            }
            Some(Action::MoveDown) => {
                let last = Self::comment_count(session).saturating_sub(1);
                session.comment_scroll = (session.comment_scroll + 1).min(last);
                Ok(ScreenAction::None)
            }
            Some(Action::AddComment) | Some(Action::Confirm) => Ok(ScreenAction::AddComment),
            Some(Action::Cancel) => Ok(ScreenAction::Back),
            _ => Ok(ScreenAction::None),
        }
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{}: Scroll | {}: Add comment | {}: Back",
            keymap.navigation_display(),
            keymap.get_key_display_for_action(Action::AddComment),
            keymap.get_key_display_for_action(Action::Cancel),
        )
    }
}

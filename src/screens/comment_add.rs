//! Add-comment screen.

use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction};
use crate::state::Session;
use crate::utils::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub struct CommentAddScreen;

impl Screen for CommentAddScreen {
    fn title(&self) -> &'static str {
        "Add comment"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let content = ctx.content();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let product = TextInput::with_text(content.text("product"));
        frame.render_widget(
            TextInputWidget::new(&product).title("Product").read_only(true),
            chunks[0],
        );

        let user = TextInput::with_text(content.text("user"));
        frame.render_widget(
            TextInputWidget::new(&user).title("By").read_only(true),
            chunks[1],
        );

        frame.render_text_input_widget(
            TextInputWidget::new(&ctx.session.comment_form.text)
                .title("Comment")
                .placeholder("What do you think of it?")
                .focused(true),
            chunks[2],
        );
        Ok(())
    }

    fn handle_event(
        &self,
        key: KeyEvent,
        action: Option<Action>,
        session: &mut Session,
    ) -> Result<ScreenAction> {
        match action {
            Some(Action::Confirm) => Ok(ScreenAction::SubmitComment),
            Some(Action::Cancel) => Ok(ScreenAction::Back),
            Some(_) => Ok(ScreenAction::None),
            None => {
                session.comment_form.text.handle_key(key.code);
                Ok(ScreenAction::None)
            }
        }
    }

    fn is_input_focused(&self, _session: &Session) -> bool {
        true
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{}: Submit | {}: Cancel",
            keymap.get_key_display_for_action(Action::Confirm),
            keymap.get_key_display_for_action(Action::Cancel),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_typing_goes_to_comment() {
        let mut session = Session::new();
        let screen = CommentAddScreen;
        for c in "ok".chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            screen.handle_event(key, None, &mut session).unwrap();
        }
        assert_eq!(session.comment_form.text.text(), "ok");

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let action = screen
            .handle_event(enter, Some(Action::Confirm), &mut session)
            .unwrap();
        assert_eq!(action, ScreenAction::SubmitComment);
    }
}

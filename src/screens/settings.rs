//! Settings screen: user name and server address.

use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction};
use crate::state::{Session, SettingsField};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn title(&self) -> &'static str {
        "Settings"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let form = &ctx.session.settings_form;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_text_input_widget(
            TextInputWidget::new(&form.username)
                .title("User name")
                .placeholder(ctx.content().text("username"))
                .focused(form.focus == SettingsField::Username),
            chunks[0],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&form.server_url)
                .title("Server URL")
                .placeholder(ctx.content().text("url"))
                .focused(form.focus == SettingsField::ServerUrl),
            chunks[1],
        );
        Ok(())
    }

    fn handle_event(
        &self,
        key: KeyEvent,
        action: Option<Action>,
        session: &mut Session,
    ) -> Result<ScreenAction> {
        let form = &mut session.settings_form;
        match action {
            Some(Action::Confirm) => Ok(ScreenAction::SaveSettings),
            Some(Action::Cancel) => Ok(ScreenAction::Back),
            Some(Action::NextField) | Some(Action::MoveDown) => {
                form.next_field();
                Ok(ScreenAction::None)
            }
            Some(Action::PrevField) | Some(Action::MoveUp) => {
                form.prev_field();
                Ok(ScreenAction::None)
            }
            Some(_) => Ok(ScreenAction::None),
            None => {
                form.focused_input_mut().handle_key(key.code);
                Ok(ScreenAction::None)
            }
        }
    }

    fn is_input_focused(&self, _session: &Session) -> bool {
        true
    }

    fn footer(&self, keymap: &Keymap) -> String {
        keymap.footer_form()
    }
}

//! New-product screen: names a barcode the server did not know.

use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction};
use crate::state::Session;
use crate::styles::theme;
use crate::utils::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub struct ProductNewScreen;

impl Screen for ProductNewScreen {
    fn title(&self) -> &'static str {
        "New product"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new("This barcode is not known yet. Give the product a name to add it.")
                .style(t.muted_style()),
            chunks[0],
        );

        let barcode = TextInput::with_text(ctx.content().text("barcode"));
        frame.render_widget(
            TextInputWidget::new(&barcode).title("Barcode").read_only(true),
            chunks[1],
        );

        frame.render_text_input_widget(
            TextInputWidget::new(&ctx.session.product_form.name)
                .title("Name")
                .placeholder("Product name")
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
            Some(Action::Confirm) => Ok(ScreenAction::SubmitProduct),
            Some(Action::Cancel) => Ok(ScreenAction::Back),
            Some(_) => Ok(ScreenAction::None),
            None => {
                session.product_form.name.handle_key(key.code);
                Ok(ScreenAction::None)
            }
        }
    }

    fn is_input_focused(&self, _session: &Session) -> bool {
        true
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{}: Add product | {}: Cancel",
            keymap.get_key_display_for_action(Action::Confirm),
            keymap.get_key_display_for_action(Action::Cancel),
        )
    }
}

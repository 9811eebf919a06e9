//! Intro screen: waits for the first scan.

use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction};
use crate::state::Session;
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::KeyEvent;
use indoc::indoc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

const LOGO: &str = indoc! {"
    ▌█▐▌▌█▐▐█▌▌▐█▌▐▌█
    ▌█▐▌▌█▐▐█▌▌▐█▌▐▌█
    ▌█▐▌▌█▐▐█▌▌▐█▌▐▌█
    4 006381 333931
"};

pub struct IntroScreen;

impl Screen for IntroScreen {
    fn title(&self) -> &'static str {
        "Welcome"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let scan_key = ctx.keymap.get_key_display_for_action(Action::Scan);

        let mut lines: Vec<Line> = LOGO
            .lines()
            .map(|l| Line::from(Span::styled(l, t.emphasis_style())))
            .collect();
        lines.extend([
            Line::from(""),
            Line::from(Span::styled("Barcode Agent", t.title_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Look up products by their barcode, read what others said about them and leave your own comments.",
                t.text_style(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", t.muted_style()),
                Span::styled(scan_key, t.emphasis_style()),
                Span::styled(" and scan a barcode to start.", t.muted_style()),
            ]),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
        Ok(())
    }

    fn handle_event(
        &self,
        _key: KeyEvent,
        _action: Option<Action>,
        _session: &mut Session,
    ) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    fn footer(&self, _keymap: &Keymap) -> String {
        String::new()
    }
}

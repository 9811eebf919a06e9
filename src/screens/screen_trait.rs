//! Screen trait and associated types.
//!
//! Screens draw one page and turn key presses into [`ScreenAction`]s. They
//! keep no state of their own: everything a page needs between frames lives
//! in the [`Session`], and everything the template rendered lives in the
//! page's surface.

use crate::keymap::{Action, Keymap};
use crate::pages::{Content, Page};
use crate::state::Session;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only view of what a screen needs for drawing.
pub struct RenderContext<'a> {
    /// The page being drawn
    pub page: &'a Page<Session>,
    pub session: &'a Session,
    pub keymap: &'a Keymap,
}

impl<'a> RenderContext<'a> {
    pub fn new(page: &'a Page<Session>, session: &'a Session, keymap: &'a Keymap) -> Self {
        Self {
            page,
            session,
            keymap,
        }
    }

    /// Content the template last rendered into the page
    pub fn content(&self) -> &'a Content {
        self.page.surface().content()
    }
}

/// What the application should do after a screen handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// Nothing, stay on the current page.
    #[default]
    None,
    /// Return to the previous page.
    Back,
    AddComment,
    SubmitComment,
    SubmitProduct,
    SaveSettings,
}

/// Trait for the screen of one page.
pub trait Screen {
    /// Title shown in the header
    fn title(&self) -> &'static str;

    /// Draw the page body into `area`.
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle a key press the application did not consume itself.
    ///
    /// `action` is the keymap's reading of the key, if any.
    fn handle_event(
        &self,
        key: KeyEvent,
        action: Option<Action>,
        session: &mut Session,
    ) -> Result<ScreenAction>;

    /// Check if a text input is currently focused.
    ///
    /// When true, plain characters go to the input instead of the keymap.
    fn is_input_focused(&self, _session: &Session) -> bool {
        false
    }

    /// Page specific part of the footer
    fn footer(&self, keymap: &Keymap) -> String;
}

//! Screens of the application, one per page.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │                    App                      │
//! │   current page id ──> screen_for(id)        │
//! │        │                                    │
//! │        ├─ render(frame, area, context)      │
//! │        └─ handle_event(key, action, session)│
//! │                 │                           │
//! │                 └──> ScreenAction           │
//! └────────────────────────────────────────────┘
//! ```

pub mod comment_add;
pub mod intro;
pub mod product_new;
pub mod product_view;
pub mod screen_trait;
pub mod settings;

pub use comment_add::CommentAddScreen;
pub use intro::IntroScreen;
pub use product_new::ProductNewScreen;
pub use product_view::ProductViewScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction};
pub use settings::SettingsScreen;

use crate::controller::pages;

/// Screen drawing the page `id`
pub fn screen_for(id: &str) -> Option<&'static dyn Screen> {
    match id {
        pages::INTRO => Some(&IntroScreen),
        pages::PRODUCT_VIEW => Some(&ProductViewScreen),
        pages::COMMENT_ADD => Some(&CommentAddScreen),
        pages::PRODUCT_NEW => Some(&ProductNewScreen),
        pages::SETTINGS => Some(&SettingsScreen),
        _ => None,
    }
}

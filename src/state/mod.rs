//! Application state handed to page hooks.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Session                    │
//! ├─────────────────────────────────────────────┤
//! │  pending_product   pending_comment          │
//! │  displayed_product settings_label           │
//! │  ┌──────────────┐ ┌────────────┐ ┌────────┐ │
//! │  │ ProductForm  │ │CommentForm │ │Settings│ │
//! │  └──────────────┘ └────────────┘ └────────┘ │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The page registry passes the session to every `on_display`/`on_hide`
//! hook, so hooks prepare forms and labels without holding references to
//! the rest of the application.

pub mod forms;
pub mod session;

pub use forms::{CommentForm, ProductForm, SettingsField, SettingsForm};
pub use session::{NewComment, NewProduct, Session, SettingsLabel};

// Reusable UI widgets

pub mod status_bar;
pub mod text_input;

pub use status_bar::{Notification, StatusBar, StatusBarWidget};
pub use text_input::{TextInputWidget, TextInputWidgetExt};

//! Barcode Agent - look up products by barcode and share comments about them
//!
//! This library provides the page registry with its lifecycle hooks, the
//! settings store, the logging facade, the connection to the Barcode Agent
//! server and the terminal client built on top of them.

// Core modules
pub mod controller;
pub mod logging;
pub mod pages;
pub mod scanner;
pub mod server;
pub mod settings;
pub mod state;

// Terminal client
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod screens;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

/// File name of the application log inside the log directory
pub const LOG_FILE_NAME: &str = "barcode-agent.log";

// Re-exports for convenience
pub use config::{Config, ConfigStore};
pub use controller::Controller;
pub use logging::{Logger, Notifier, Severity};
pub use pages::{NavigationError, Page, PageHooks, PageRegistry};
pub use server::{Outcome, ServerConnection, ServerError};
pub use settings::Settings;

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};

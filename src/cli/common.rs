//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: settings, server connection and console logger
//! - Output helpers: `print_success`, `print_error`, `print_info`

use crate::config::ConfigStore;
use crate::logging::{ConsoleNotifier, Logger};
use crate::server::{Labels, Outcome, ServerConnection};
use crate::settings::Settings;
use anyhow::{anyhow, Context, Result};
use std::future::Future;
use tokio::runtime::Runtime;

/// Source name of CLI log messages
const LOG_PREFIX: &str = "BarcodeAgentCli";

/// Shared context for CLI commands.
pub struct CliContext {
    pub settings: Settings<ConfigStore>,
    pub logger: Logger<ConsoleNotifier>,
    runtime: Runtime,
}

impl CliContext {
    /// Load the settings from the configuration file.
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let store = ConfigStore::open(config_path).context("Failed to load configuration")?;

        Ok(Self {
            settings: Settings::new(store),
            logger: Logger::new(LOG_PREFIX, ConsoleNotifier),
            runtime: Runtime::new().context("Failed to create tokio runtime")?,
        })
    }

    /// Connection to the configured server
    pub fn server(&self) -> Result<ServerConnection> {
        ServerConnection::new(&self.settings.server_url())
            .context("Configured server URL is not usable")
    }

    /// Run one request to completion, reporting it like the TUI does.
    ///
    /// Failures become errors; a missing record is `Ok(None)`.
    pub fn request<T, F>(&mut self, labels: &Labels, request: F) -> Result<Option<T>>
    where
        F: Future<Output = Outcome<T>>,
    {
        self.logger.delay(labels.delay);
        let outcome = self.runtime.block_on(request);
        outcome.report(&mut self.logger, labels);

        match outcome {
            Outcome::Found(value) => Ok(Some(value)),
            Outcome::Missing => Ok(None),
            Outcome::Failed(err) => Err(anyhow!(err)),
        }
    }
}

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
///
/// # Arguments
/// * `msg` - The message to print
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}

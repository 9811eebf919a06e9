//! Logging and user notification facade.
//!
//! Every message goes to the base log (`tracing`). Notifications are logged
//! with their severity tag and additionally handed to a [`Notifier`], the
//! status-bar style UI element that shows the latest message to the user.

use ratatui::style::Color;
use std::fmt;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational outcome (product found, comment submitted, ...)
    Info,
    /// An operation is underway
    Delay,
    /// Something failed
    Error,
}

/// How a severity is presented in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub label: &'static str,
    pub icon: &'static str,
    pub background: Color,
}

const INFO: Presentation = Presentation {
    label: "INFO",
    icon: "\u{2139}", // ℹ
    background: Color::Rgb(0x4B, 0x94, 0x6A),
};

const DELAY: Presentation = Presentation {
    label: "DELAY",
    icon: "\u{231B}", // ⌛
    background: Color::Rgb(0x33, 0x33, 0x33),
};

const ERROR: Presentation = Presentation {
    label: "ERROR",
    icon: "\u{2718}", // ✘
    background: Color::Rgb(0xC9, 0x0C, 0x22),
};

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Delay, Severity::Error];

    /// Presentation attributes for this severity
    pub fn presentation(self) -> &'static Presentation {
        match self {
            Severity::Info => &INFO,
            Severity::Delay => &DELAY,
            Severity::Error => &ERROR,
        }
    }

    pub fn label(self) -> &'static str {
        self.presentation().label
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Notifier for command-line use: writes notifications to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        eprintln!("{} {}", severity.presentation().icon, message);
    }
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub entries: Vec<(Severity, String)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications recorded with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|(s, _)| *s == severity).count()
    }

    pub fn last(&self) -> Option<&(Severity, String)> {
        self.entries.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.entries.push((severity, message.to_string()));
    }
}

/// Logger with an optional source prefix and a notifier for user messages.
#[derive(Debug)]
pub struct Logger<N> {
    prefix: String,
    notifier: N,
}

impl<N: Notifier> Logger<N> {
    pub fn new(prefix: impl Into<String>, notifier: N) -> Self {
        Self {
            prefix: prefix.into(),
            notifier,
        }
    }

    /// Silently log a message to the base log
    pub fn log(&self, message: &str) {
        tracing::info!(source = %self.prefix, "{}", message);
    }

    /// Log a notification and show it to the user
    pub fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::error!(source = %self.prefix, "[{}] {}", severity, message),
            _ => tracing::info!(source = %self.prefix, "[{}] {}", severity, message),
        }
        self.notifier.notify(severity, message);
    }

    pub fn info(&mut self, message: &str) {
        self.notify(Severity::Info, message);
    }

    pub fn delay(&mut self, message: &str) {
        self.notify(Severity::Delay, message);
    }

    pub fn error(&mut self, message: &str) {
        self.notify(Severity::Error, message);
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

//! Keyboard-wedge barcode scanning.
//!
//! Handheld scanners in keyboard mode "type" the barcode followed by Enter.
//! While a scan is active, every key event is fed to the
//! [`KeyboardWedgeScanner`], which collects the characters and reports one
//! [`ScanOutcome`] when the scan ends.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Symbology derived from the shape of a scanned code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeFormat {
    Ean8,
    UpcA,
    Ean13,
    Code128,
}

impl BarcodeFormat {
    /// Guess the symbology from the scanned text
    pub fn detect(text: &str) -> Self {
        if text.bytes().all(|b| b.is_ascii_digit()) {
            match text.len() {
                8 => return BarcodeFormat::Ean8,
                12 => return BarcodeFormat::UpcA,
                13 => return BarcodeFormat::Ean13,
                _ => {}
            }
        }
        BarcodeFormat::Code128
    }

    pub fn name(self) -> &'static str {
        match self {
            BarcodeFormat::Ean8 => "EAN_8",
            BarcodeFormat::UpcA => "UPC_A",
            BarcodeFormat::Ean13 => "EAN_13",
            BarcodeFormat::Code128 => "CODE_128",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successful read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub text: String,
    pub format: BarcodeFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("nothing was scanned")]
    Empty,

    #[error("unreadable character {0:?}")]
    UnreadableCharacter(char),

    #[error("no scan in progress")]
    NotScanning,
}

/// How a scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Scanned(ScanResult),
    Cancelled,
    Failed(ScanError),
}

impl ScanOutcome {
    /// Classify a complete read
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return ScanOutcome::Failed(ScanError::Empty);
        }
        if let Some(c) = text.chars().find(|c| !c.is_ascii_graphic() && *c != ' ') {
            return ScanOutcome::Failed(ScanError::UnreadableCharacter(c));
        }

        ScanOutcome::Scanned(ScanResult {
            text: text.to_string(),
            format: BarcodeFormat::detect(text),
        })
    }
}

/// Collects typed characters into a barcode.
#[derive(Debug, Default)]
pub struct KeyboardWedgeScanner {
    buffer: Option<String>,
}

impl KeyboardWedgeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a scan, discarding anything collected before.
    pub fn start(&mut self) {
        info!("scanning");
        self.buffer = Some(String::new());
    }

    pub fn is_scanning(&self) -> bool {
        self.buffer.is_some()
    }

    /// Characters collected so far in the running scan
    pub fn collected(&self) -> &str {
        self.buffer.as_deref().unwrap_or("")
    }

    /// Feed one key event.
    ///
    /// Returns `None` while the scan continues. Feeding a key while no scan
    /// is running fails with [`ScanError::NotScanning`].
    pub fn feed(&mut self, key: KeyEvent) -> Option<ScanOutcome> {
        let Some(buffer) = self.buffer.as_mut() else {
            return Some(ScanOutcome::Failed(ScanError::NotScanning));
        };

        match key.code {
            KeyCode::Enter => {
                let text = self.buffer.take().unwrap_or_default();
                let outcome = ScanOutcome::from_text(&text);
                if let ScanOutcome::Scanned(result) = &outcome {
                    info!(
                        "Scanner result: text: {} format: {}",
                        result.text, result.format
                    );
                }
                Some(outcome)
            }
            KeyCode::Esc => {
                self.buffer = None;
                Some(ScanOutcome::Cancelled)
            }
            KeyCode::Backspace => {
                buffer.pop();
                None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer = None;
                Some(ScanOutcome::Cancelled)
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                None
            }
            other => {
                debug!("Ignoring key {:?} during scan", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(scanner: &mut KeyboardWedgeScanner, text: &str) {
        for c in text.chars() {
            assert_eq!(scanner.feed(key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(BarcodeFormat::detect("96385074"), BarcodeFormat::Ean8);
        assert_eq!(BarcodeFormat::detect("036000291452"), BarcodeFormat::UpcA);
        assert_eq!(BarcodeFormat::detect("4006381333931"), BarcodeFormat::Ean13);
        assert_eq!(BarcodeFormat::detect("000000"), BarcodeFormat::Code128);
        assert_eq!(BarcodeFormat::detect("ABC-1234"), BarcodeFormat::Code128);
        assert_eq!(BarcodeFormat::Ean13.to_string(), "EAN_13");
    }

    #[test]
    fn test_scan_until_enter() {
        let mut scanner = KeyboardWedgeScanner::new();
        scanner.start();
        type_text(&mut scanner, "4006381333931");

        let outcome = scanner.feed(key(KeyCode::Enter));
        assert_eq!(
            outcome,
            Some(ScanOutcome::Scanned(ScanResult {
                text: "4006381333931".to_string(),
                format: BarcodeFormat::Ean13,
            }))
        );
        assert!(!scanner.is_scanning());
    }

    #[test]
    fn test_escape_cancels() {
        let mut scanner = KeyboardWedgeScanner::new();
        scanner.start();
        type_text(&mut scanner, "123");
        assert_eq!(scanner.feed(key(KeyCode::Esc)), Some(ScanOutcome::Cancelled));
        assert!(!scanner.is_scanning());
    }

    #[test]
    fn test_backspace_corrects() {
        let mut scanner = KeyboardWedgeScanner::new();
        scanner.start();
        type_text(&mut scanner, "12x");
        scanner.feed(key(KeyCode::Backspace));
        assert_eq!(scanner.collected(), "12");
    }

    #[test]
    fn test_empty_read_fails() {
        let mut scanner = KeyboardWedgeScanner::new();
        scanner.start();
        assert_eq!(
            scanner.feed(key(KeyCode::Enter)),
            Some(ScanOutcome::Failed(ScanError::Empty))
        );
    }

    #[test]
    fn test_unprintable_read_fails() {
        assert_eq!(
            ScanOutcome::from_text("12\u{7}34"),
            ScanOutcome::Failed(ScanError::UnreadableCharacter('\u{7}'))
        );
        assert_eq!(
            ScanOutcome::from_text("12é"),
            ScanOutcome::Failed(ScanError::UnreadableCharacter('é'))
        );
    }

    #[test]
    fn test_feed_without_scan() {
        let mut scanner = KeyboardWedgeScanner::new();
        assert_eq!(
            scanner.feed(key(KeyCode::Char('1'))),
            Some(ScanOutcome::Failed(ScanError::NotScanning))
        );
    }
}

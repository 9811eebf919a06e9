//! Status bar widget.
//!
//! A single line at the bottom of the screen showing the most recent
//! notification. Its background color tells the severity apart. The message
//! stays until the next notification replaces it.

use crate::logging::{Notifier, Severity};
use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// A notification as shown in the status bar
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Status bar state. Acts as the [`Notifier`] of the application logger.
#[derive(Debug, Default)]
pub struct StatusBar {
    current: Option<Notification>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Get the notification on display (if any)
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Render the status bar using Frame
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        frame.render_widget(StatusBarWidget::new(self.current.as_ref()), area);
    }
}

impl Notifier for StatusBar {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.current = Some(Notification {
            severity,
            message: message.to_string(),
        });
    }
}

/// Widget drawing one status line
pub struct StatusBarWidget<'a> {
    notification: Option<&'a Notification>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(notification: Option<&'a Notification>) -> Self {
        Self { notification }
    }

    fn line(&self) -> Line<'a> {
        match self.notification {
            Some(notification) => {
                let presentation = notification.severity.presentation();
                Line::from(vec![
                    Span::raw(format!(" {} ", presentation.icon)),
                    Span::raw(notification.message.as_str()),
                ])
            }
            None => Line::from(""),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let style = match self.notification {
            Some(notification) => t.status_style(notification.severity.presentation().background),
            None => t.muted_style(),
        };

        Paragraph::new(self.line()).style(style).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notification_wins() {
        let mut bar = StatusBar::new();
        assert!(bar.current().is_none());

        bar.notify(Severity::Delay, "Requesting info...");
        bar.notify(Severity::Info, "Product found");

        let current = bar.current().unwrap();
        assert_eq!(current.severity, Severity::Info);
        assert_eq!(current.message, "Product found");
    }

    #[test]
    fn test_renders_message_with_icon() {
        let mut bar = StatusBar::new();
        bar.notify(Severity::Error, "Could not reach server");

        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(bar.current()).render(area, &mut buf);

        let rendered: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(rendered.contains("Could not reach server"));
        assert!(rendered.contains(Severity::Error.presentation().icon));
    }
}

use crate::components::{Footer, Header, HelpOverlay};
use crate::config::ConfigStore;
use crate::controller::{Controller, Dispatch, ServerEvent};
use crate::keymap::{Action, Keymap};
use crate::scanner::KeyboardWedgeScanner;
use crate::screens::{self, RenderContext, ScreenAction};
use crate::styles::theme;
use crate::tui::Tui;
use crate::utils::format_path_for_display;
use crate::widgets::StatusBar;
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

/// Main application state
pub struct App {
    config_path: PathBuf,
    keymap: Keymap,
    tui: Tui,
    controller: Controller<StatusBar, ConfigStore>,
    scanner: KeyboardWedgeScanner,
    runtime: Runtime,
    /// Server responses travel back to the UI loop through this channel
    events_tx: UnboundedSender<ServerEvent>,
    events_rx: UnboundedReceiver<ServerEvent>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let store = ConfigStore::open(config_path.clone())?;
        let keymap = store.config().keymap.clone();

        let controller = Controller::new(StatusBar::new(), store)?;
        let tui = Tui::new()?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config_path,
            keymap,
            tui,
            controller,
            scanner: KeyboardWedgeScanner::new(),
            runtime,
            events_tx,
            events_rx,
            show_help: false,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.controller.start();

        // Main event loop
        loop {
            self.drain_server_events();
            self.draw()?;

            if self.should_quit {
                break;
            }

            // Poll for events with 250ms timeout
            if let Some(Event::Key(key)) = self.tui.poll_event(Duration::from_millis(250))? {
                self.handle_key(key)?;
            }
        }

        self.tui.exit()?;
        info!("Barcode Agent exiting");
        Ok(())
    }

    /// Send a request on the runtime; its response comes back through the
    /// event channel.
    fn spawn(&self, dispatch: Dispatch) {
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let event = dispatch.run().await;
            if tx.send(event).is_err() {
                error!("Server response arrived after the UI shut down");
            }
        });
    }

    fn drain_server_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(follow_up) = self.controller.complete(event) {
                self.spawn(follow_up);
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            tui,
            controller,
            keymap,
            scanner,
            config_path,
            show_help,
            ..
        } = self;
        let config_path = format_path_for_display(config_path);

        tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(2),
                    Constraint::Length(1),
                ])
                .split(area);

            let session = controller.session();
            let page = controller.registry().current();
            let screen = controller.current_page().and_then(screens::screen_for);

            let settings_hint = format!(
                "{}: {}",
                keymap.get_key_display_for_action(Action::ToggleSettings),
                session.settings_label.text()
            );
            let title = screen.map_or("", |s| s.title());
            Header::render(frame, chunks[0], title, &settings_hint);

            if let (Some(screen), Some(page)) = (screen, page) {
                let ctx = RenderContext::new(page, session, keymap);
                if let Err(err) = screen.render(frame, chunks[1], &ctx) {
                    error!("Failed to render page {}: {:#}", page.id(), err);
                }
            }

            let footer = match screen.map(|s| s.footer(keymap)) {
                Some(text) if !text.is_empty() => format!("{} | {}", text, keymap.footer_global()),
                _ => keymap.footer_global(),
            };
            Footer::render(frame, chunks[2], &footer);
            controller.logger().notifier().render(frame, chunks[3]);

            if scanner.is_scanning() {
                render_scan_popup(frame, area, scanner.collected());
            }
            if *show_help {
                HelpOverlay::render(frame, area, keymap, &config_path);
            }
        })?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Any key closes the help overlay
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        if self.scanner.is_scanning() {
            if let Some(outcome) = self.scanner.feed(key) {
                if let Some(dispatch) = self.controller.scan_result(outcome) {
                    self.spawn(dispatch);
                }
            }
            return Ok(());
        }

        let screen = self.controller.current_page().and_then(screens::screen_for);
        let input_focused = screen.is_some_and(|s| s.is_input_focused(self.controller.session()));
        let action = if input_focused {
            self.keymap.get_text_entry_action(key.code, key.modifiers)
        } else {
            self.keymap.get_action(key.code, key.modifiers)
        };

        match action {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::Help) => self.show_help = true,
            Some(Action::Scan) => self.scanner.start(),
            Some(Action::ToggleSettings) => self.controller.toggle_settings(),
            _ => {
                if let Some(screen) = screen {
                    let result = screen.handle_event(key, action, self.controller.session_mut())?;
                    self.apply(result);
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, action: ScreenAction) {
        let dispatch = match action {
            ScreenAction::None => None,
            ScreenAction::Back => {
                self.controller.go_back();
                None
            }
            ScreenAction::AddComment => {
                self.controller.add_comment();
                None
            }
            ScreenAction::SubmitComment => self.controller.submit_comment(),
            ScreenAction::SubmitProduct => self.controller.submit_product(),
            ScreenAction::SaveSettings => {
                self.controller.save_settings();
                None
            }
        };

        if let Some(dispatch) = dispatch {
            self.spawn(dispatch);
        }
    }
}

/// Small centered box showing the characters read so far
fn render_scan_popup(frame: &mut Frame, area: Rect, collected: &str) {
    let t = theme();
    let width = area.width.min(40);
    let height = 3;
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height.min(area.height),
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_focused_style())
        .title(" Scanning (Esc to cancel) ")
        .title_alignment(Alignment::Center);
    frame.render_widget(
        Paragraph::new(collected)
            .style(t.emphasis_style())
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}

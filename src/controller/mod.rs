//! Application controller.
//!
//! Wires scan results, user actions and server responses to page
//! navigation. The controller never waits on the network: operations that
//! talk to the server return a [`Dispatch`], which the caller runs wherever
//! it likes and hands back to [`Controller::complete`] as a
//! [`ServerEvent`].
//!
//! ```text
//!   scan / key ──> Controller ──Dispatch──> runtime ──ServerEvent──┐
//!                     ^                                            │
//!                     └──────────────── complete() <───────────────┘
//! ```

pub mod pages;
pub mod requests;

pub use requests::{Dispatch, Request, Response, ServerEvent};

use crate::logging::{Logger, Notifier};
use crate::pages::{lookup_text, PageRegistry};
use crate::scanner::ScanOutcome;
use crate::server::{ServerConnection, ServerError, BARCODE_LABELS, PRODUCT_LABELS};
use crate::server::{SUBMIT_COMMENT_LABELS, SUBMIT_PRODUCT_LABELS};
use crate::settings::{KeyValueStore, Settings, DEFAULT_SERVER_URL, SERVER_URL, USERNAME};
use crate::state::{NewComment, NewProduct, Session};
use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Source name of controller log messages
pub const LOG_PREFIX: &str = "BarcodeAgent";

/// What to do once a response has been reported
enum Next {
    Stay,
    Show(&'static str, Value),
    NewProduct(String),
    Request(Request),
}

pub struct Controller<N, S> {
    registry: PageRegistry<Session>,
    session: Session,
    logger: Logger<N>,
    settings: Settings<S>,
    server: ServerConnection,
}

impl<N: Notifier, S: KeyValueStore> Controller<N, S> {
    /// Controller with every application page registered
    pub fn new(notifier: N, store: S) -> Result<Self> {
        Self::with_registry(pages::build_registry()?, notifier, store)
    }

    pub fn with_registry(
        registry: PageRegistry<Session>,
        notifier: N,
        store: S,
    ) -> Result<Self> {
        let mut logger = Logger::new(LOG_PREFIX, notifier);
        let settings = Settings::new(store);

        let server = match ServerConnection::new(&settings.server_url()) {
            Ok(server) => server,
            Err(err) => {
                logger.error(&err.to_string());
                ServerConnection::new(DEFAULT_SERVER_URL)?
            }
        };

        Ok(Self {
            registry,
            session: Session::new(),
            logger,
            settings,
            server,
        })
    }

    /// Show the first page and greet the user
    pub fn start(&mut self) {
        self.show(pages::INTRO, &json!({}));
        self.logger.info("Device is Ready");
    }

    /// Navigate, reporting failures to the user
    pub fn show(&mut self, id: &str, context: &Value) {
        if let Err(err) = self.registry.navigate_to(&mut self.session, id, context) {
            self.logger.error(&err.to_string());
        }
    }

    pub fn go_back(&mut self) {
        if let Err(err) = self.registry.navigate_back(&mut self.session) {
            self.logger.error(&err.to_string());
        }
    }

    /// React to a finished scan
    pub fn scan_result(&mut self, outcome: ScanOutcome) -> Option<Dispatch> {
        match outcome {
            ScanOutcome::Scanned(result) => {
                self.logger
                    .log(&format!("Scanned {} ({})", result.text, result.format));
                self.request_barcode_info(&result.text)
            }
            ScanOutcome::Cancelled => {
                self.logger.info("Scan cancelled");
                None
            }
            ScanOutcome::Failed(err) => {
                self.logger.error(&format!("Scanning failed: {}", err));
                None
            }
        }
    }

    pub fn request_barcode_info(&mut self, barcode: &str) -> Option<Dispatch> {
        if barcode.is_empty() {
            self.logger.error(&ServerError::MissingBarcode.to_string());
            return None;
        }
        Some(self.begin(Request::BarcodeInfo {
            barcode: barcode.to_string(),
        }))
    }

    pub fn request_product_info(&mut self, product_id: &str) -> Dispatch {
        self.begin(Request::ProductInfo {
            product_id: product_id.to_string(),
        })
    }

    /// Announce a request and package it for sending
    pub fn begin(&mut self, request: Request) -> Dispatch {
        self.logger.delay(request.labels().delay);
        Dispatch::new(self.registry.epoch(), request, self.server.clone())
    }

    /// Report a server response and continue the flow that issued it.
    ///
    /// Responses that arrive after the user has navigated elsewhere are
    /// still reported, but their navigation and follow-up requests are
    /// dropped. Returns the follow-up request, if any.
    pub fn complete(&mut self, event: ServerEvent) -> Option<Dispatch> {
        let mut next = Next::Stay;

        match event.response {
            Response::BarcodeInfo { barcode, outcome } => outcome.deliver(
                &mut self.logger,
                &BARCODE_LABELS,
                &mut next,
                |next, list| {
                    *next = match list.products.into_iter().next() {
                        Some(product) => Next::Show(pages::PRODUCT_VIEW, product.into_context()),
                        None => Next::NewProduct(barcode.clone()),
                    }
                },
                |next| *next = Next::NewProduct(barcode.clone()),
            ),
            Response::ProductInfo(outcome) => outcome.deliver(
                &mut self.logger,
                &PRODUCT_LABELS,
                &mut next,
                |next, product| *next = Next::Show(pages::PRODUCT_VIEW, product.into_context()),
                |_| {},
            ),
            Response::ProductSubmitted(outcome) => outcome.deliver(
                &mut self.logger,
                &SUBMIT_PRODUCT_LABELS,
                &mut next,
                |next, created| {
                    *next = Next::Request(Request::ProductInfo {
                        product_id: created.id,
                    })
                },
                |_| {},
            ),
            Response::CommentSubmitted {
                product_id,
                outcome,
            } => outcome.deliver(
                &mut self.logger,
                &SUBMIT_COMMENT_LABELS,
                &mut next,
                |next, ()| *next = Next::Request(Request::ProductInfo { product_id }),
                |_| {},
            ),
        }

        if matches!(next, Next::Stay) {
            return None;
        }
        if event.epoch != self.registry.epoch() {
            warn!(
                "Dropping continuation of response from epoch {} (now {})",
                event.epoch,
                self.registry.epoch()
            );
            return None;
        }

        match next {
            Next::Stay => None,
            Next::Show(id, context) => {
                self.show(id, &context);
                None
            }
            Next::NewProduct(barcode) => {
                self.session.pending_product = Some(NewProduct {
                    barcode: barcode.clone(),
                });
                self.show(pages::PRODUCT_NEW, &json!({ "barcode": barcode }));
                None
            }
            Next::Request(request) => Some(self.begin(request)),
        }
    }

    /// Open or close the settings page
    pub fn toggle_settings(&mut self) {
        if self.registry.current_id() == Some(pages::SETTINGS) {
            self.go_back();
            return;
        }

        let context = json!({
            "username": self.settings.username(),
            "url": self.settings.server_url(),
        });
        self.show(pages::SETTINGS, &context);
    }

    /// Store the settings form, then close the settings page.
    ///
    /// A server URL that does not parse is reported and nothing in the form
    /// is stored. The connection only switches servers once the new URL has
    /// been stored.
    pub fn save_settings(&mut self) {
        let username = self.session.settings_form.username.text_trimmed().to_string();
        let server_url = self
            .session
            .settings_form
            .server_url
            .text_trimmed()
            .to_string();
        let url_changed = server_url != self.settings.server_url();

        let mut server = self.server.clone();
        if url_changed {
            if let Err(err) = server.set_base_url(&server_url) {
                self.logger.error(&err.to_string());
                return;
            }
        }

        let mut changed = false;
        if username != self.settings.username() {
            changed |= self.store_setting(USERNAME, &username);
        }
        if url_changed && self.store_setting(SERVER_URL, &server_url) {
            self.server = server;
            changed = true;
        }

        if changed {
            self.logger.info("Settings saved");
        }
        if self.registry.current_id() == Some(pages::SETTINGS) {
            self.go_back();
        }
    }

    fn store_setting(&mut self, key: &str, value: &str) -> bool {
        match self.settings.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error(&format!("Could not save setting {}: {:#}", key, err));
                false
            }
        }
    }

    /// Start writing a comment for the product on display
    pub fn add_comment(&mut self) {
        if self.registry.current_id() != Some(pages::PRODUCT_VIEW) {
            debug!("Ignoring add comment outside the product page");
            return;
        }
        let Some(product) = self.session.displayed_product.as_ref() else {
            self.logger.error("Internal error: No product on display");
            return;
        };

        let product_id = lookup_text(product, "id");
        let name = lookup_text(product, "name");
        let username = self.settings.username();

        self.session.pending_comment = Some(NewComment {
            product_id,
            username: username.clone(),
        });
        self.show(
            pages::COMMENT_ADD,
            &json!({ "product": { "name": name }, "username": username }),
        );
    }

    pub fn submit_comment(&mut self) -> Option<Dispatch> {
        let comment = self.session.comment_form.text.text_trimmed().to_string();
        if comment.is_empty() {
            self.logger.error("Comment is empty");
            return None;
        }
        let Some(pending) = self.session.pending_comment.clone() else {
            self.logger.error("Internal error: No comment in progress");
            return None;
        };

        Some(self.begin(Request::SubmitComment {
            product_id: pending.product_id,
            by: pending.username,
            comment,
        }))
    }

    pub fn submit_product(&mut self) -> Option<Dispatch> {
        let name = self.session.product_form.name.text_trimmed().to_string();
        if name.is_empty() {
            self.logger.error("Product name is empty");
            return None;
        }
        let Some(pending) = self.session.pending_product.clone() else {
            self.logger.error("Internal error: No product in progress");
            return None;
        };

        Some(self.begin(Request::SubmitProduct {
            barcode: pending.barcode,
            name,
        }))
    }

    pub fn current_page(&self) -> Option<&str> {
        self.registry.current_id()
    }

    pub fn registry(&self) -> &PageRegistry<Session> {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn logger(&self) -> &Logger<N> {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger<N> {
        &mut self.logger
    }

    pub fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    pub fn server(&self) -> &ServerConnection {
        &self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{RecordingNotifier, Severity};
    use crate::scanner::{ScanError, ScanResult};
    use crate::server::{Created, Outcome, Product, ProductList};
    use crate::settings::MemoryStore;
    use crate::state::SettingsLabel;
    use anyhow::bail;

    /// Store that refuses to persist the server URL
    #[derive(Debug, Default)]
    struct ReadOnlyUrlStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyUrlStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            if key == SERVER_URL {
                bail!("config file is read-only");
            }
            self.inner.set_item(key, value)
        }
    }

    type TestController = Controller<RecordingNotifier, MemoryStore>;

    fn controller() -> TestController {
        let mut controller = Controller::new(RecordingNotifier::new(), MemoryStore::new()).unwrap();
        controller.start();
        controller
    }

    fn messages(controller: &TestController) -> Vec<(Severity, String)> {
        controller.logger().notifier().entries.clone()
    }

    fn widget() -> Product {
        Product::try_from(json!({
            "id": "42",
            "barcode": "4006381333931",
            "name": "Widget",
            "comments": []
        }))
        .unwrap()
    }

    #[test]
    fn test_start_shows_intro() {
        let controller = controller();
        assert_eq!(controller.current_page(), Some(pages::INTRO));
        assert_eq!(
            messages(&controller),
            vec![(Severity::Info, "Device is Ready".to_string())]
        );
    }

    #[test]
    fn test_scan_issues_barcode_request() {
        let mut controller = controller();
        let dispatch = controller
            .scan_result(ScanOutcome::from_text("4006381333931"))
            .unwrap();

        assert_eq!(
            dispatch.request(),
            &Request::BarcodeInfo {
                barcode: "4006381333931".to_string()
            }
        );
        assert_eq!(dispatch.epoch(), controller.registry().epoch());
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Delay, "Requesting info...".to_string()))
        );
    }

    #[test]
    fn test_scan_cancel_and_failure() {
        let mut controller = controller();
        assert!(controller.scan_result(ScanOutcome::Cancelled).is_none());
        assert!(controller
            .scan_result(ScanOutcome::Failed(ScanError::Empty))
            .is_none());

        let entries = messages(&controller);
        assert_eq!(entries[1], (Severity::Info, "Scan cancelled".to_string()));
        assert_eq!(entries[2].0, Severity::Error);
        assert!(entries[2].1.starts_with("Scanning failed: "));
    }

    #[test]
    fn test_empty_barcode_is_rejected() {
        let mut controller = controller();
        assert!(controller.request_barcode_info("").is_none());
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(
                Severity::Error,
                "Internal error: Called requestInfo without barcode".to_string()
            ))
        );
    }

    #[test]
    fn test_found_barcode_shows_product() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("4006381333931").unwrap();

        let follow_up = controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "4006381333931".to_string(),
                outcome: Outcome::Found(ProductList {
                    products: vec![widget()],
                }),
            },
        });

        assert!(follow_up.is_none());
        assert_eq!(controller.current_page(), Some(pages::PRODUCT_VIEW));
        assert_eq!(
            controller.session().displayed_product,
            Some(widget().to_context())
        );
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Info, "Product found".to_string()))
        );
    }

    #[test]
    fn test_missing_barcode_starts_new_product() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("000000").unwrap();

        controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "000000".to_string(),
                outcome: Outcome::Missing,
            },
        });

        assert_eq!(controller.current_page(), Some(pages::PRODUCT_NEW));
        assert_eq!(
            controller.session().pending_product,
            Some(NewProduct {
                barcode: "000000".to_string()
            })
        );
        let content = controller
            .registry()
            .page(pages::PRODUCT_NEW)
            .unwrap()
            .surface()
            .content();
        assert_eq!(content.text("barcode"), "000000");
        assert_eq!(controller.logger().notifier().count(Severity::Info), 2);
    }

    #[test]
    fn test_failure_stays_on_page() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("000000").unwrap();

        let follow_up = controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "000000".to_string(),
                outcome: Outcome::Failed(ServerError::NetworkUnreachable {
                    detail: "connection refused".to_string(),
                }),
            },
        });

        assert!(follow_up.is_none());
        assert_eq!(controller.current_page(), Some(pages::INTRO));
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Error, "Could not reach server".to_string()))
        );
    }

    #[test]
    fn test_stale_response_is_reported_but_not_followed() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("4006381333931").unwrap();
        controller.toggle_settings();

        controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "4006381333931".to_string(),
                outcome: Outcome::Found(ProductList {
                    products: vec![widget()],
                }),
            },
        });

        assert_eq!(controller.current_page(), Some(pages::SETTINGS));
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Info, "Product found".to_string()))
        );
    }

    #[test]
    fn test_new_product_flow_refetches_created_product() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("000000").unwrap();
        controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "000000".to_string(),
                outcome: Outcome::Missing,
            },
        });

        assert!(controller.submit_product().is_none());
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Error, "Product name is empty".to_string()))
        );

        controller.session_mut().product_form.name.set_text("Widget");
        let dispatch = controller.submit_product().unwrap();
        assert_eq!(
            dispatch.request(),
            &Request::SubmitProduct {
                barcode: "000000".to_string(),
                name: "Widget".to_string()
            }
        );

        let follow_up = controller
            .complete(ServerEvent {
                epoch: dispatch.epoch(),
                response: Response::ProductSubmitted(Outcome::Found(Created {
                    id: "42".to_string(),
                })),
            })
            .unwrap();
        assert_eq!(
            follow_up.request(),
            &Request::ProductInfo {
                product_id: "42".to_string()
            }
        );

        controller.complete(ServerEvent {
            epoch: follow_up.epoch(),
            response: Response::ProductInfo(Outcome::Found(widget())),
        });
        assert_eq!(controller.current_page(), Some(pages::PRODUCT_VIEW));
        assert_eq!(controller.session().pending_product, None);
    }

    #[test]
    fn test_comment_flow() {
        let mut controller = controller();
        controller.show(pages::PRODUCT_VIEW, &widget().to_context());

        controller.add_comment();
        assert_eq!(controller.current_page(), Some(pages::COMMENT_ADD));
        assert_eq!(
            controller.session().pending_comment,
            Some(NewComment {
                product_id: "42".to_string(),
                username: "Anonymous User".to_string()
            })
        );
        let content = controller
            .registry()
            .page(pages::COMMENT_ADD)
            .unwrap()
            .surface()
            .content();
        assert_eq!(content.text("product"), "Widget");
        assert_eq!(content.text("user"), "Anonymous User");

        controller.session_mut().comment_form.text.set_text("Works well");
        let dispatch = controller.submit_comment().unwrap();
        assert_eq!(
            dispatch.request(),
            &Request::SubmitComment {
                product_id: "42".to_string(),
                by: "Anonymous User".to_string(),
                comment: "Works well".to_string()
            }
        );

        let follow_up = controller
            .complete(ServerEvent {
                epoch: dispatch.epoch(),
                response: Response::CommentSubmitted {
                    product_id: "42".to_string(),
                    outcome: Outcome::Found(()),
                },
            })
            .unwrap();
        assert_eq!(
            follow_up.request(),
            &Request::ProductInfo {
                product_id: "42".to_string()
            }
        );
    }

    #[test]
    fn test_cancel_comment_returns_to_product() {
        let mut controller = controller();
        controller.show(pages::PRODUCT_VIEW, &widget().to_context());
        controller.add_comment();

        controller.go_back();
        assert_eq!(controller.current_page(), Some(pages::PRODUCT_VIEW));
    }

    #[test]
    fn test_add_comment_ignored_elsewhere() {
        let mut controller = controller();
        controller.add_comment();
        assert_eq!(controller.current_page(), Some(pages::INTRO));
        assert_eq!(controller.session().pending_comment, None);
    }

    #[test]
    fn test_settings_toggle_and_save() {
        let mut controller = controller();
        controller.toggle_settings();
        assert_eq!(controller.current_page(), Some(pages::SETTINGS));
        assert_eq!(controller.session().settings_label, SettingsLabel::Hide);
        assert_eq!(
            controller.session().settings_form.server_url.text(),
            DEFAULT_SERVER_URL
        );

        let form = &mut controller.session_mut().settings_form;
        form.username.set_text("alice");
        form.server_url.set_text("http://localhost:3000");
        controller.save_settings();

        assert_eq!(controller.current_page(), Some(pages::INTRO));
        assert_eq!(controller.session().settings_label, SettingsLabel::View);
        assert_eq!(controller.settings().username(), "alice");
        assert_eq!(
            controller.server().base_url().as_str(),
            "http://localhost:3000/"
        );
        assert_eq!(
            controller.logger().notifier().last(),
            Some(&(Severity::Info, "Settings saved".to_string()))
        );
    }

    #[test]
    fn test_invalid_server_url_is_not_stored() {
        let mut controller = controller();
        controller.toggle_settings();
        controller
            .session_mut()
            .settings_form
            .server_url
            .set_text("not a url");
        controller.save_settings();

        assert_eq!(controller.current_page(), Some(pages::SETTINGS));
        assert_eq!(controller.settings().server_url(), DEFAULT_SERVER_URL);
        assert_eq!(
            controller.logger().notifier().last().map(|(s, _)| *s),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_invalid_server_url_keeps_whole_form_unsaved() {
        let mut controller = controller();
        controller.toggle_settings();
        let form = &mut controller.session_mut().settings_form;
        form.username.set_text("alice");
        form.server_url.set_text("not a url");
        controller.save_settings();

        assert_eq!(controller.current_page(), Some(pages::SETTINGS));
        assert_eq!(controller.settings().username(), "Anonymous User");
        assert_eq!(controller.settings().server_url(), DEFAULT_SERVER_URL);
        assert_eq!(
            controller.server().base_url().as_str(),
            "http://barcodeagent.nodejitsu.com/"
        );
    }

    #[test]
    fn test_unstored_server_url_is_not_applied() {
        let mut controller =
            Controller::new(RecordingNotifier::new(), ReadOnlyUrlStore::default()).unwrap();
        controller.start();
        controller.toggle_settings();
        let form = &mut controller.session_mut().settings_form;
        form.username.set_text("alice");
        form.server_url.set_text("http://localhost:3000");
        controller.save_settings();

        assert_eq!(controller.settings().username(), "alice");
        assert_eq!(controller.settings().server_url(), DEFAULT_SERVER_URL);
        assert_eq!(
            controller.server().base_url().as_str(),
            "http://barcodeagent.nodejitsu.com/"
        );
        let entries = &controller.logger().notifier().entries;
        assert!(entries.iter().any(|(severity, message)| {
            *severity == Severity::Error && message.starts_with("Could not save setting serverUrl")
        }));
    }

    #[test]
    fn test_product_page_gets_every_field() {
        let mut controller = controller();
        let dispatch = controller.request_barcode_info("4006381333931").unwrap();
        let record = json!({
            "id": "42",
            "barcode": 4006381333931u64,
            "name": "Widget",
            "image": "http://example.com/widget.png",
            "comments": [{"id": "c1", "by": "alice", "date": 1700000000, "text": "Good"}]
        });

        controller.complete(ServerEvent {
            epoch: dispatch.epoch(),
            response: Response::BarcodeInfo {
                barcode: "4006381333931".to_string(),
                outcome: Outcome::Found(ProductList {
                    products: vec![Product::try_from(record.clone()).unwrap()],
                }),
            },
        });

        assert_eq!(controller.current_page(), Some(pages::PRODUCT_VIEW));
        assert_eq!(controller.session().displayed_product, Some(record));
    }

    #[test]
    fn test_toggle_twice_returns() {
        let mut controller = controller();
        controller.toggle_settings();
        controller.toggle_settings();
        assert_eq!(controller.current_page(), Some(pages::INTRO));
    }

    #[test]
    fn test_scanned_result_is_logged_not_notified() {
        let mut controller = controller();
        let result = ScanResult {
            text: "12345670".to_string(),
            format: crate::scanner::BarcodeFormat::Ean8,
        };
        controller.scan_result(ScanOutcome::Scanned(result));
        assert_eq!(controller.logger().notifier().entries.len(), 2);
    }
}

//! The pages of the application, their templates and hooks.

use crate::pages::{
    lookup_text, NavigationError, Page, PageHooks, PageRegistry, Renderer, Template,
    TemplateRenderer,
};
use crate::state::{Session, SettingsLabel};
use serde_json::Value;

pub const INTRO: &str = "intro";
pub const PRODUCT_VIEW: &str = "productview";
pub const COMMENT_ADD: &str = "commentadd";
pub const PRODUCT_NEW: &str = "productnew";
pub const SETTINGS: &str = "settings";

/// Every page id, in registration order
pub const ALL: [&str; 5] = [INTRO, PRODUCT_VIEW, COMMENT_ADD, PRODUCT_NEW, SETTINGS];

pub fn product_view_template() -> Template {
    Template::new().text("productname", "name").repeat(
        "comments",
        "comments",
        &[("by", "by"), ("date", "date"), ("text", "text")],
    )
}

pub fn comment_add_template() -> Template {
    Template::new()
        .text("product", "product.name")
        .text("user", "username")
}

pub fn product_new_template() -> Template {
    Template::new()
        .text("barcode", "barcode")
        .text("name", "name")
}

pub fn settings_template() -> Template {
    Template::new()
        .text("username", "username")
        .text("url", "url")
}

/// Remembers the product on display. Showing a product ends any product or
/// comment that was being written.
struct ProductViewHooks;

impl PageHooks<Session> for ProductViewHooks {
    fn on_display(&mut self, session: &mut Session, context: &Value) {
        session.displayed_product = Some(context.clone());
        session.comment_scroll = 0;
        session.pending_product = None;
        session.pending_comment = None;
    }
}

struct CommentAddHooks;

impl PageHooks<Session> for CommentAddHooks {
    fn on_display(&mut self, session: &mut Session, _context: &Value) {
        session.comment_form.text.clear();
    }
}

struct ProductNewHooks;

impl PageHooks<Session> for ProductNewHooks {
    fn on_display(&mut self, session: &mut Session, context: &Value) {
        session.product_form.name.set_text(lookup_text(context, "name"));
    }
}

struct SettingsHooks;

impl PageHooks<Session> for SettingsHooks {
    fn on_display(&mut self, session: &mut Session, context: &Value) {
        session.settings_form.load(
            &lookup_text(context, "username"),
            &lookup_text(context, "url"),
        );
        session.settings_label = SettingsLabel::Hide;
    }

    fn on_hide(&mut self, session: &mut Session, _id: &str) {
        session.settings_label = SettingsLabel::View;
    }
}

/// All pages, ready to be registered
pub fn pages() -> Vec<Page<Session>> {
    vec![
        Page::new(INTRO),
        Page::new(PRODUCT_VIEW)
            .with_template(product_view_template())
            .with_hooks(ProductViewHooks),
        Page::new(COMMENT_ADD)
            .with_template(comment_add_template())
            .with_hooks(CommentAddHooks),
        Page::new(PRODUCT_NEW)
            .with_template(product_new_template())
            .with_hooks(ProductNewHooks),
        Page::new(SETTINGS)
            .with_template(settings_template())
            .with_hooks(SettingsHooks),
    ]
}

/// Registry holding every page, rendering with the template renderer
pub fn build_registry() -> Result<PageRegistry<Session>, NavigationError> {
    build_registry_with(TemplateRenderer)
}

pub fn build_registry_with(
    renderer: impl Renderer + 'static,
) -> Result<PageRegistry<Session>, NavigationError> {
    let mut registry = PageRegistry::with_renderer(renderer);
    for page in pages() {
        registry.register(page)?;
    }
    Ok(registry)
}

use super::forms::{CommentForm, ProductForm, SettingsForm};
use serde_json::Value;

/// A product being created, waiting for its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub barcode: String,
}

/// A comment being written for a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub product_id: String,
    pub username: String,
}

/// Text of the settings toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsLabel {
    #[default]
    View,
    Hide,
}

impl SettingsLabel {
    pub fn text(self) -> &'static str {
        match self {
            SettingsLabel::View => "view settings",
            SettingsLabel::Hide => "hide settings",
        }
    }
}

/// Everything the pages share between navigations.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub pending_product: Option<NewProduct>,
    pub pending_comment: Option<NewComment>,
    /// Context the product page was last opened with
    pub displayed_product: Option<Value>,
    /// First comment row shown on the product page
    pub comment_scroll: usize,
    pub product_form: ProductForm,
    pub comment_form: CommentForm,
    pub settings_form: SettingsForm,
    pub settings_label: SettingsLabel,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Records exchanged with the Barcode Agent server.
//!
//! Products are kept as the cleaned JSON the server sent, so pages see every
//! field, including ones this client has no use for. [`Product`] and
//! [`Comment`] only add typed accessors on top.

use super::outcome::ServerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product with its comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Product {
    record: Value,
}

/// A comment on a product, borrowed from its product record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'a> {
    record: &'a Value,
}

/// Response of a barcode lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Response of a successful product submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
}

impl TryFrom<Value> for Product {
    type Error = ServerError;

    fn try_from(record: Value) -> Result<Self, Self::Error> {
        if !record.is_object() {
            return Err(ServerError::InvalidBody(format!(
                "expected a product object, got {}",
                record
            )));
        }
        Ok(Self { record })
    }
}

impl From<Product> for Value {
    fn from(product: Product) -> Self {
        product.record
    }
}

impl Product {
    pub fn id(&self) -> String {
        text(self.record.get("id")).unwrap_or_default()
    }

    pub fn name(&self) -> String {
        text(self.record.get("name")).unwrap_or_default()
    }

    pub fn barcode(&self) -> Option<String> {
        text(self.record.get("barcode"))
    }

    pub fn comments(&self) -> impl Iterator<Item = Comment<'_>> {
        self.record
            .get("comments")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|record| Comment { record })
    }

    /// Navigation context for pages showing this product
    pub fn to_context(&self) -> Value {
        self.record.clone()
    }

    pub fn into_context(self) -> Value {
        self.record
    }
}

impl Comment<'_> {
    pub fn by(&self) -> String {
        text(self.record.get("by")).unwrap_or_default()
    }

    pub fn date(&self) -> Option<String> {
        text(self.record.get("date"))
    }

    pub fn text(&self) -> String {
        text(self.record.get("text")).unwrap_or_default()
    }
}

// Servers differ in whether they send ids, barcodes and dates as strings or
// numbers.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

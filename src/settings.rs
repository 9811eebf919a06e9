//! Application settings.
//!
//! Settings are string key/value pairs kept in any store implementing
//! [`KeyValueStore`]. Missing or empty values fall back to static defaults.

use anyhow::Result;
use std::collections::HashMap;

/// Settings key for the server base URL
pub const SERVER_URL: &str = "serverUrl";
/// Settings key for the name shown as comment author
pub const USERNAME: &str = "username";

pub const DEFAULT_SERVER_URL: &str = "http://barcodeagent.nodejitsu.com";
pub const DEFAULT_USERNAME: &str = "Anonymous User";

/// Static defaults for every known setting
pub const DEFAULTS: [(&str, &str); 2] = [
    (SERVER_URL, DEFAULT_SERVER_URL),
    (USERNAME, DEFAULT_USERNAME),
];

/// Persistent string storage behind [`Settings`].
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Thin wrapper around a store, providing defaults for missing values.
#[derive(Debug)]
pub struct Settings<S> {
    store: S,
    defaults: HashMap<&'static str, &'static str>,
}

impl<S: KeyValueStore> Settings<S> {
    /// Create settings with the application defaults
    pub fn new(store: S) -> Self {
        Self::with_defaults(store, &DEFAULTS)
    }

    pub fn with_defaults(store: S, defaults: &[(&'static str, &'static str)]) -> Self {
        Self {
            store,
            defaults: defaults.iter().copied().collect(),
        }
    }

    /// Stored value of `key`, or its default if none is stored.
    ///
    /// Unknown keys without a stored value yield an empty string.
    pub fn get(&self, key: &str) -> String {
        let value = self.store.get_item(key);
        tracing::debug!("Accessing storage: {}: {:?}", key, value);

        match value {
            Some(value) if !value.is_empty() => value,
            _ => self
                .defaults
                .get(key)
                .map(|d| (*d).to_string())
                .unwrap_or_default(),
        }
    }

    /// Write a value through to the backing store
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        tracing::info!("Setting {} to \"{}\"", key, value);
        self.store.set_item(key, value)
    }

    pub fn server_url(&self) -> String {
        self.get(SERVER_URL)
    }

    pub fn username(&self) -> String {
        self.get(USERNAME)
    }
}

//! Multi-valued call metadata.

use std::collections::HashMap;

/// Metadata entry the default extraction hook reads the credential from.
pub const AUTHORIZATION: &str = "authorization";

/// Transport metadata attached to an incoming call.
///
/// Names are case-insensitive and may carry several values; lookups that
/// want a single value take the first one in append order.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: HashMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`, preserving any existing values.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(normalize(name))
            .or_default()
            .push(value.into());
    }

    /// First value appended under `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize(name))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values appended under `name`, in append order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

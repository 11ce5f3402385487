//! String-keyed attribute set carried alongside a call.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Values attached to a call for downstream handlers to read.
///
/// Entries are keyed by name rather than by type: the same value type can sit
/// under different names, and which name holds the resolved token is a matter
/// of configuration. Reads are typed; asking for the wrong type yields `None`.
#[derive(Default)]
pub struct Attributes {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `name`, replacing any previous entry.
    pub fn insert<V: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: V) {
        self.values.insert(name.into(), Box::new(value));
    }

    /// Typed read of the entry under `name`.
    pub fn get<V: 'static>(&self, name: &str) -> Option<&V> {
        self.values
            .get(name)
            .and_then(|value| value.downcast_ref::<V>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Attributes").field("keys", &keys).finish()
    }
}

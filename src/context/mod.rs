//! Per-call context the interceptor borrows and mutates.

mod attributes;
mod metadata;

pub use attributes::Attributes;
pub use metadata::{Metadata, AUTHORIZATION};

use std::fmt;

/// Identifying properties of a call, referenced by diagnostics.
#[derive(Debug, Clone, Default)]
pub struct CallProperties {
    /// Full method path, e.g. `/package.Service/Method`.
    pub method: Option<String>,
    /// Peer address as reported by the transport.
    pub peer: Option<String>,
}

impl fmt::Display for CallProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "method={} peer={}",
            self.method.as_deref().unwrap_or("-"),
            self.peer.as_deref().unwrap_or("-")
        )
    }
}

/// Mutable carrier of one call's metadata and handler-visible attributes.
///
/// Owned by the surrounding framework; the interceptor borrows it for the
/// duration of one call and writes at most one attribute.
#[derive(Debug, Default)]
pub struct CallContext {
    metadata: Metadata,
    properties: CallProperties,
    attributes: Attributes,
}

impl CallContext {
    pub fn new(metadata: Metadata, properties: CallProperties) -> Self {
        Self {
            metadata,
            properties,
            attributes: Attributes::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn properties(&self) -> &CallProperties {
        &self.properties
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Typed read of a named attribute.
    pub fn attribute<V: 'static>(&self, name: &str) -> Option<&V> {
        self.attributes.get::<V>(name)
    }
}

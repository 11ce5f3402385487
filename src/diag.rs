//! Diagnostic channel for suppressed verification failures.

use std::error::Error as StdError;

use crate::context::CallProperties;

/// Fixed marker emitted when a presented credential fails verification.
pub const INVALID_TOKEN: &str = "Invalid Token";

/// Side channel for failures the pipeline absorbs.
///
/// A credential that fails verification degrades to "absent" instead of
/// surfacing as an error, so this sink is the only place the underlying
/// failure is visible. Implementations must not panic.
pub trait DiagnosticSink: Send + Sync {
    /// A presented credential failed verification.
    fn invalid_token(&self, properties: &CallProperties, error: &(dyn StdError + 'static));
}

/// Default sink: a structured `tracing` event at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn invalid_token(&self, properties: &CallProperties, error: &(dyn StdError + 'static)) {
        tracing::warn!(properties = %properties, error = %error, "{}", INVALID_TOKEN);
    }
}

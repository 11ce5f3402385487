//! Token verification contract.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque verification options forwarded from configuration to the verifier.
///
/// The pipeline never interprets these. Each verifier documents the keys it
/// recognizes and ignores the rest, so unrelated keys are harmless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifyOptions {
    options: BTreeMap<String, Value>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// The value under `key`, when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// The value under `key`, when it is a non-negative integer.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.options.get(key).and_then(Value::as_u64)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Collaborator that decodes and validates a bearer credential.
///
/// Construct-or-fail: success yields the decoded token value, any malformed
/// or unverifiable input is an error. The pipeline depends only on this
/// contract and stays agnostic of token format and algorithm.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Decoded token value attached to the call on success.
    type Token: Send + Sync + 'static;
    /// Verification failure, reported through the diagnostic channel.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode and validate `credential` under `options`.
    async fn verify(
        &self,
        credential: &str,
        options: &VerifyOptions,
    ) -> Result<Self::Token, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let options = VerifyOptions::new()
            .with("issuer", "auth.internal")
            .with("leeway_secs", 30u64);

        assert_eq!(options.get_str("issuer"), Some("auth.internal"));
        assert_eq!(options.get_u64("leeway_secs"), Some(30));
        assert_eq!(options.get_str("leeway_secs"), None);
        assert_eq!(options.get("audience"), None);
    }

    #[test]
    fn test_serializes_as_bare_map() {
        let options = VerifyOptions::new().with("audience", "api");
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"audience":"api"}"#);

        let parsed: VerifyOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);
    }
}

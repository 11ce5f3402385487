//! Interceptor configuration.
//!
//! Callers hand over a partial [`GuardOptions`]; construction resolves it
//! against built-in defaults exactly once, into the [`GuardConfig`] every
//! call then reads. Caller-set fields always win over defaults.

use std::sync::Arc;

use crate::diag::{DiagnosticSink, TracingSink};
use crate::hooks::{BearerExtractor, NeverRevoked, RevocationChecker, TokenExtractor};
use crate::verify::{TokenVerifier, VerifyOptions};

/// Default name of the context attribute that receives the resolved token.
pub const DEFAULT_PROPERTY_NAME: &str = "token";

/// Caller-supplied options, all optional.
///
/// `T` is the decoded token type the hooks agree on. The setters consume and
/// return `self` so options chain:
///
/// ```
/// use callguard::{Claims, GuardOptions};
///
/// let options = GuardOptions::<Claims>::new()
///     .property_name("claims")
///     .passthrough(true)
///     .verify_option("issuer", "auth.internal");
/// ```
pub struct GuardOptions<T> {
    pub(crate) property_name: Option<String>,
    pub(crate) passthrough: Option<bool>,
    pub(crate) extractor: Option<Arc<dyn TokenExtractor<T>>>,
    pub(crate) revocation: Option<Arc<dyn RevocationChecker<T>>>,
    pub(crate) verify: VerifyOptions,
    pub(crate) diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl<T> Default for GuardOptions<T> {
    fn default() -> Self {
        Self {
            property_name: None,
            passthrough: None,
            extractor: None,
            revocation: None,
            verify: VerifyOptions::new(),
            diagnostics: None,
        }
    }
}

impl<T> GuardOptions<T> {
    /// Empty options; everything resolves to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the context attribute the resolved token is attached to.
    ///
    /// Defaults to [`DEFAULT_PROPERTY_NAME`].
    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    /// Let denied calls proceed instead of rejecting them.
    ///
    /// The hooks still run and the token attribute is still written; only
    /// the rejection is skipped. Defaults to `false`.
    pub fn passthrough(mut self, enabled: bool) -> Self {
        self.passthrough = Some(enabled);
        self
    }

    /// Replace the built-in bearer extraction entirely.
    ///
    /// The configured verifier and diagnostic sink are not consulted when a
    /// replacement extractor is set; the hook owns the whole decision of
    /// what counts as a credential.
    pub fn extractor(mut self, hook: impl TokenExtractor<T> + 'static) -> Self {
        self.extractor = Some(Arc::new(hook));
        self
    }

    /// Replace the built-in revocation check (which never revokes).
    pub fn revocation(mut self, hook: impl RevocationChecker<T> + 'static) -> Self {
        self.revocation = Some(Arc::new(hook));
        self
    }

    /// Add one opaque verification option, forwarded to the extraction hook
    /// on every call.
    pub fn verify_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.verify.set(key, value);
        self
    }

    /// Replace the whole verification options bag.
    pub fn verify_options(mut self, options: VerifyOptions) -> Self {
        self.verify = options;
        self
    }

    /// Sink that receives suppressed verification failures.
    ///
    /// Consumed by the default extraction hook; defaults to [`TracingSink`].
    pub fn diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Some(Arc::new(sink));
        self
    }
}

/// Effective configuration, resolved once and shared by all clones of an
/// interceptor. Never mutated after construction.
pub(crate) struct GuardConfig<T> {
    pub(crate) property_name: String,
    pub(crate) passthrough: bool,
    pub(crate) extractor: Arc<dyn TokenExtractor<T>>,
    pub(crate) revocation: Arc<dyn RevocationChecker<T>>,
    pub(crate) verify: VerifyOptions,
}

impl<T> Clone for GuardConfig<T> {
    fn clone(&self) -> Self {
        Self {
            property_name: self.property_name.clone(),
            passthrough: self.passthrough,
            extractor: self.extractor.clone(),
            revocation: self.revocation.clone(),
            verify: self.verify.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> GuardOptions<T> {
    /// Resolve unset fields to their defaults, wiring `verifier` into the
    /// default extraction hook.
    pub(crate) fn resolve<V>(self, verifier: V) -> GuardConfig<T>
    where
        V: TokenVerifier<Token = T> + 'static,
    {
        let diagnostics = self.diagnostics.unwrap_or_else(|| Arc::new(TracingSink));
        let extractor = self
            .extractor
            .unwrap_or_else(|| Arc::new(BearerExtractor::with_diagnostics(verifier, diagnostics)));

        GuardConfig {
            property_name: self
                .property_name
                .unwrap_or_else(|| DEFAULT_PROPERTY_NAME.to_string()),
            passthrough: self.passthrough.unwrap_or(false),
            extractor,
            revocation: self.revocation.unwrap_or_else(|| Arc::new(NeverRevoked)),
            verify: self.verify,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use async_trait::async_trait;

    use super::*;

    struct EchoVerifier;

    #[async_trait]
    impl TokenVerifier for EchoVerifier {
        type Token = String;
        type Error = Infallible;

        async fn verify(
            &self,
            credential: &str,
            _options: &VerifyOptions,
        ) -> Result<String, Infallible> {
            Ok(credential.to_string())
        }
    }

    #[test]
    fn test_empty_options_resolve_to_defaults() {
        let config = GuardOptions::<String>::new().resolve(EchoVerifier);
        assert_eq!(config.property_name, DEFAULT_PROPERTY_NAME);
        assert!(!config.passthrough);
        assert!(config.verify.is_empty());
    }

    #[test]
    fn test_caller_fields_take_precedence() {
        let config = GuardOptions::<String>::new()
            .property_name("myjwt")
            .passthrough(true)
            .resolve(EchoVerifier);
        assert_eq!(config.property_name, "myjwt");
        assert!(config.passthrough);
    }

    #[test]
    fn test_verify_options_forwarded() {
        let config = GuardOptions::<String>::new()
            .verify_option("issuer", "auth.internal")
            .verify_option("leeway_secs", 30u64)
            .resolve(EchoVerifier);
        assert_eq!(config.verify.get_str("issuer"), Some("auth.internal"));
        assert_eq!(config.verify.get_u64("leeway_secs"), Some(30));
    }

    #[test]
    fn test_verify_options_replaced_wholesale() {
        let config = GuardOptions::<String>::new()
            .verify_option("issuer", "auth.internal")
            .verify_options(VerifyOptions::new().with("audience", "api"))
            .resolve(EchoVerifier);
        assert_eq!(config.verify.get_str("issuer"), None);
        assert_eq!(config.verify.get_str("audience"), Some("api"));
    }
}

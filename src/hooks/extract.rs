//! Token extraction hooks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::{CallContext, AUTHORIZATION};
use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::BoxError;
use crate::verify::{TokenVerifier, VerifyOptions};

/// Scheme prefix stripped from the credential. Case-sensitive.
const BEARER_PREFIX: &str = "Bearer ";

/// Extraction hook: turns an incoming call into a decoded token or absence.
///
/// `Ok(None)` means "no usable credential" and is an ordinary outcome, not an
/// error. An `Err` is an extractor failure and surfaces to the pipeline
/// caller unchanged.
#[async_trait]
pub trait TokenExtractor<T>: Send + Sync {
    async fn extract(
        &self,
        ctx: &CallContext,
        options: &VerifyOptions,
    ) -> Result<Option<T>, BoxError>;
}

/// Default extraction hook.
///
/// Reads the first `authorization` metadata value, strips an optional
/// `Bearer ` prefix and hands the rest to the configured [`TokenVerifier`].
/// Verification failures are absorbed: the sink is told and the credential is
/// treated as absent, so a forged token degrades to "unauthenticated" instead
/// of a server error.
pub struct BearerExtractor<V> {
    verifier: V,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<V> BearerExtractor<V> {
    /// Extractor reporting through the default [`TracingSink`].
    pub fn new(verifier: V) -> Self {
        Self::with_diagnostics(verifier, Arc::new(TracingSink))
    }

    /// Extractor reporting through the supplied sink.
    pub fn with_diagnostics(verifier: V, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            verifier,
            diagnostics,
        }
    }
}

#[async_trait]
impl<V> TokenExtractor<V::Token> for BearerExtractor<V>
where
    V: TokenVerifier,
{
    async fn extract(
        &self,
        ctx: &CallContext,
        options: &VerifyOptions,
    ) -> Result<Option<V::Token>, BoxError> {
        let raw = match ctx.metadata().first(AUTHORIZATION) {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };

        let credential = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);

        match self.verifier.verify(credential, options).await {
            Ok(token) => Ok(Some(token)),
            Err(error) => {
                self.diagnostics.invalid_token(ctx.properties(), &error);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::context::{CallProperties, Metadata};

    #[derive(Debug, thiserror::Error)]
    #[error("credential rejected")]
    struct VerifyFailed;

    /// Records every credential it sees; accepts or rejects them all.
    #[derive(Clone)]
    struct RecordingVerifier {
        accept: bool,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingVerifier {
        fn new(accept: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    accept,
                    seen: seen.clone(),
                },
                seen,
            )
        }
    }

    #[async_trait]
    impl TokenVerifier for RecordingVerifier {
        type Token = String;
        type Error = VerifyFailed;

        async fn verify(
            &self,
            credential: &str,
            _options: &VerifyOptions,
        ) -> Result<String, VerifyFailed> {
            self.seen.lock().unwrap().push(credential.to_string());
            if self.accept {
                Ok(credential.to_string())
            } else {
                Err(VerifyFailed)
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn invalid_token(
            &self,
            properties: &CallProperties,
            error: &(dyn std::error::Error + 'static),
        ) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{properties}: {error}"));
        }
    }

    fn ctx_with_authorization(value: &str) -> CallContext {
        let mut metadata = Metadata::new();
        metadata.append(AUTHORIZATION, value);
        CallContext::new(
            metadata,
            CallProperties {
                method: Some("/billing.Invoices/Create".into()),
                peer: None,
            },
        )
    }

    #[tokio::test]
    async fn test_missing_entry_yields_absent() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let extractor = BearerExtractor::new(verifier);

        let token = extractor
            .extract(&CallContext::default(), &VerifyOptions::new())
            .await
            .unwrap();

        assert!(token.is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_value_yields_absent_without_verification() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let sink = RecordingSink::default();
        let extractor = BearerExtractor::with_diagnostics(verifier, Arc::new(sink.clone()));

        let token = extractor
            .extract(&ctx_with_authorization(""), &VerifyOptions::new())
            .await
            .unwrap();

        assert!(token.is_none());
        assert!(seen.lock().unwrap().is_empty());
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_prefix_stripped() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let extractor = BearerExtractor::new(verifier);

        let token = extractor
            .extract(&ctx_with_authorization("Bearer abc123"), &VerifyOptions::new())
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("abc123"));
        assert_eq!(*seen.lock().unwrap(), ["abc123"]);
    }

    #[tokio::test]
    async fn test_raw_credential_passes_unchanged() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let extractor = BearerExtractor::new(verifier);

        let token = extractor
            .extract(&ctx_with_authorization("abc123"), &VerifyOptions::new())
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("abc123"));
        assert_eq!(*seen.lock().unwrap(), ["abc123"]);
    }

    #[tokio::test]
    async fn test_lowercase_scheme_is_not_stripped() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let extractor = BearerExtractor::new(verifier);

        extractor
            .extract(&ctx_with_authorization("bearer abc123"), &VerifyOptions::new())
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), ["bearer abc123"]);
    }

    #[tokio::test]
    async fn test_first_metadata_value_wins() {
        let (verifier, seen) = RecordingVerifier::new(true);
        let extractor = BearerExtractor::new(verifier);

        let mut ctx = ctx_with_authorization("Bearer first");
        ctx.metadata_mut().append(AUTHORIZATION, "Bearer second");

        extractor.extract(&ctx, &VerifyOptions::new()).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), ["first"]);
    }

    #[tokio::test]
    async fn test_verification_failure_absorbed_and_reported() {
        let (verifier, _) = RecordingVerifier::new(false);
        let sink = RecordingSink::default();
        let extractor = BearerExtractor::with_diagnostics(verifier, Arc::new(sink.clone()));

        let token = extractor
            .extract(&ctx_with_authorization("Bearer forged"), &VerifyOptions::new())
            .await
            .unwrap();

        assert!(token.is_none());
        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].contains("/billing.Invoices/Create"));
        assert!(events[0].contains("credential rejected"));
    }
}

//! Revocation check hooks.

use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::BoxError;

/// Revocation hook: classifies an extracted token as revoked or not.
///
/// Runs on every call, including calls where extraction produced nothing;
/// `token` is `None` in that case. An `Err` surfaces to the pipeline caller
/// unchanged, it is not a revocation verdict.
#[async_trait]
pub trait RevocationChecker<T>: Send + Sync {
    async fn is_revoked(&self, ctx: &CallContext, token: Option<&T>) -> Result<bool, BoxError>;
}

/// Default revocation hook: nothing is ever revoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRevoked;

#[async_trait]
impl<T: Send + Sync> RevocationChecker<T> for NeverRevoked {
    async fn is_revoked(&self, _ctx: &CallContext, _token: Option<&T>) -> Result<bool, BoxError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_revoked() {
        let ctx = CallContext::default();
        let token = String::from("abc");

        let verdict = NeverRevoked.is_revoked(&ctx, Some(&token)).await.unwrap();
        assert!(!verdict);

        let verdict = NeverRevoked
            .is_revoked(&ctx, None::<&String>)
            .await
            .unwrap();
        assert!(!verdict);
    }
}

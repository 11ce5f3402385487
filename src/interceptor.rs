//! The per-call authentication pipeline.

use std::future::Future;

use crate::config::{GuardConfig, GuardOptions};
use crate::context::CallContext;
use crate::error::{GuardError, GuardResult, Status};
use crate::verify::TokenVerifier;

/// Authentication interceptor for RPC call handling.
///
/// Sits in front of a service handler. For each call it runs the extraction
/// hook, then the revocation hook, then decides: a call with no token or a
/// revoked one is denied. Denied calls are rejected with the uniform
/// [`Status::unauthenticated`] unless passthrough is enabled; calls that
/// proceed get the resolved token attached to their context under the
/// configured attribute name.
///
/// Cloning is cheap and clones share the resolved configuration, so one
/// interceptor instance serves any number of concurrent calls.
pub struct AuthInterceptor<T> {
    config: GuardConfig<T>,
}

impl<T> Clone for AuthInterceptor<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> AuthInterceptor<T> {
    /// Interceptor with default options: bearer extraction backed by
    /// `verifier`, no revocation, rejection on denial.
    pub fn new<V>(verifier: V) -> Self
    where
        V: TokenVerifier<Token = T> + 'static,
    {
        Self::with_options(verifier, GuardOptions::new())
    }

    /// Interceptor with caller-supplied options, resolved over defaults.
    ///
    /// `verifier` backs the default extraction hook and is not consulted
    /// when `options` carries a replacement extractor.
    pub fn with_options<V>(verifier: V, options: GuardOptions<T>) -> Self
    where
        V: TokenVerifier<Token = T> + 'static,
    {
        Self {
            config: options.resolve(verifier),
        }
    }

    /// Run the pipeline against one borrowed call context.
    ///
    /// `Ok(())` means the call may proceed; the attribute named by the
    /// configured property then holds the resolved `Option` token. Under
    /// passthrough a denied call proceeds with `None` in that attribute. On
    /// rejection the context is left untouched.
    ///
    /// # Errors
    ///
    /// [`GuardError::Unauthenticated`] when the call is denied and
    /// passthrough is off; [`GuardError::Hook`] when a hook fails.
    pub async fn authenticate(&self, ctx: &mut CallContext) -> GuardResult<()> {
        let config = &self.config;

        let token = config
            .extractor
            .extract(ctx, &config.verify)
            .await
            .map_err(GuardError::Hook)?;
        tracing::debug!(
            properties = %ctx.properties(),
            token_present = token.is_some(),
            "credential extraction complete"
        );

        let revoked = config
            .revocation
            .is_revoked(ctx, token.as_ref())
            .await
            .map_err(GuardError::Hook)?;
        tracing::debug!(
            properties = %ctx.properties(),
            revoked,
            "revocation check complete"
        );

        let denied = token.is_none() || revoked;
        if denied && !config.passthrough {
            tracing::debug!(properties = %ctx.properties(), "call rejected");
            return Err(GuardError::Unauthenticated(Status::unauthenticated()));
        }

        ctx.attributes_mut()
            .insert(config.property_name.clone(), token);
        Ok(())
    }

    /// Authenticate, then hand the context to `next` exactly once.
    ///
    /// The continuation never runs on the rejecting path. This is the shape
    /// to reach for when the surrounding framework passes contexts by value;
    /// wrappers that hold a borrowed context call [`authenticate`] directly.
    ///
    /// [`authenticate`]: AuthInterceptor::authenticate
    pub async fn call<F, Fut, R>(&self, mut ctx: CallContext, next: F) -> GuardResult<R>
    where
        F: FnOnce(CallContext) -> Fut,
        Fut: Future<Output = R>,
    {
        self.authenticate(&mut ctx).await?;
        Ok(next(ctx).await)
    }
}

//! Bearer-token authentication for RPC call handling.
//!
//! [`AuthInterceptor`] runs in front of a service handler. For each incoming
//! call it reads the `authorization` metadata entry, resolves whether the
//! call is authenticated through pluggable extraction and revocation hooks,
//! and either lets the call proceed with the resolved token attached to its
//! [`CallContext`] or rejects it with the conventional `Unauthenticated`
//! status (code 16). Invalid credentials are absorbed rather than echoed
//! back: the client sees the same uniform rejection as for a missing
//! credential, and the underlying failure goes to a [`DiagnosticSink`].
//!
//! Credential decoding itself lives behind the [`TokenVerifier`] contract;
//! [`JwtVerifier`] adapts the `jsonwebtoken` crate to it.
//!
//! # Example
//!
//! ```
//! use callguard::{AuthInterceptor, CallContext, GuardOptions, JwtVerifier};
//!
//! # async fn demo(mut ctx: CallContext) -> Result<(), callguard::GuardError> {
//! let verifier: JwtVerifier = JwtVerifier::from_secret(b"shared-secret");
//! let guard = AuthInterceptor::with_options(
//!     verifier,
//!     GuardOptions::new().property_name("claims"),
//! );
//!
//! // Inside the server loop, once per call:
//! guard.authenticate(&mut ctx).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod diag;
pub mod error;
pub mod hooks;
pub mod interceptor;
pub mod jwt;
pub mod verify;

pub use config::{GuardOptions, DEFAULT_PROPERTY_NAME};
pub use context::{Attributes, CallContext, CallProperties, Metadata, AUTHORIZATION};
pub use diag::{DiagnosticSink, TracingSink, INVALID_TOKEN};
pub use error::{BoxError, Code, GuardError, GuardResult, Status};
pub use hooks::{BearerExtractor, NeverRevoked, RevocationChecker, TokenExtractor};
pub use interceptor::AuthInterceptor;
pub use jwt::{Claims, JwtVerifier};
pub use verify::{TokenVerifier, VerifyOptions};

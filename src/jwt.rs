//! JWT-backed token verifier.
//!
//! Thin adapter putting the `jsonwebtoken` crate behind the
//! [`TokenVerifier`] contract. Verification only; this crate never issues
//! tokens.

use std::marker::PhantomData;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::verify::{TokenVerifier, VerifyOptions};

/// Registered JWT claims plus any extra payload fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller identity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Not before (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Remaining payload fields, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Bearer-credential verifier backed by `jsonwebtoken`.
///
/// The claims type defaults to [`Claims`] and can be any `Deserialize` type.
/// Per-call [`VerifyOptions`] are layered over the base validation; the
/// recognized keys are `"issuer"`, `"audience"` and `"leeway_secs"`, anything
/// else is ignored.
pub struct JwtVerifier<C = Claims> {
    decoding_key: DecodingKey,
    validation: Validation,
    _claims: PhantomData<fn() -> C>,
}

impl<C> JwtVerifier<C> {
    /// Verifier with an explicit decoding key and base validation.
    pub fn new(decoding_key: DecodingKey, validation: Validation) -> Self {
        Self {
            decoding_key,
            validation,
            _claims: PhantomData,
        }
    }

    /// HMAC-SHA256 verifier over a shared secret, with default validation.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(
            DecodingKey::from_secret(secret),
            Validation::new(Algorithm::HS256),
        )
    }

    /// Replace the base validation.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }
}

impl<C> Clone for JwtVerifier<C> {
    fn clone(&self) -> Self {
        Self {
            decoding_key: self.decoding_key.clone(),
            validation: self.validation.clone(),
            _claims: PhantomData,
        }
    }
}

#[async_trait]
impl<C> TokenVerifier for JwtVerifier<C>
where
    C: DeserializeOwned + Send + Sync + 'static,
{
    type Token = C;
    type Error = jsonwebtoken::errors::Error;

    async fn verify(&self, credential: &str, options: &VerifyOptions) -> Result<C, Self::Error> {
        let mut validation = self.validation.clone();
        if let Some(issuer) = options.get_str("issuer") {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = options.get_str("audience") {
            validation.set_audience(&[audience]);
        }
        if let Some(leeway) = options.get_u64("leeway_secs") {
            validation.leeway = leeway;
        }

        decode::<C>(credential, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

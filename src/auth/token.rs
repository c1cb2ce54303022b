//! Bearer-token verification for identity-provider issued JWTs.

use super::{Actor, EmailAddress, Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by identity-provider tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity-provider user identifier.
    pub sub: String,
    /// Primary email address of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role from the user's public metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Errors returned while encoding or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, expiry or structure validation failed.
    #[error("token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),
}

/// Verifies HS256 bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier from the shared signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Verifies a token and maps its claims to an [`Actor`].
    ///
    /// A malformed `email` claim is dropped rather than failing the token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Rejected`] for invalid, expired or tampered
    /// tokens.
    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;
        let email = claims.email.and_then(|raw| EmailAddress::new(raw).ok());
        let role = Role::from_claim(claims.role.as_deref());
        Ok(Actor::new(claims.sub, email, role))
    }
}

/// Signs claims with the shared secret. Used by tests and local tooling; the
/// identity provider issues production tokens.
///
/// # Errors
///
/// Returns [`TokenError::Rejected`] when encoding fails.
pub fn sign_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let token = jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

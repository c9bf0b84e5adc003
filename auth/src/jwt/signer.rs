use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::claims::AUDIENCE;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Settings a [`TokenSigner`] reads on every call.
///
/// Lifetimes are in seconds.
pub trait SigningConfig: Send + Sync {
    fn secret_key(&self) -> &[u8];

    fn access_expires_in(&self) -> i64;

    fn refresh_expires_in(&self) -> i64;

    /// Lifetime for the given token kind.
    fn expires_in(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_expires_in(),
            TokenKind::Refresh => self.refresh_expires_in(),
        }
    }
}

/// JWT signer and verifier.
///
/// Uses HS256 (HMAC with SHA-256). The issue instant is always supplied by the
/// caller so expiry arithmetic never samples the wall clock here.
pub struct TokenSigner<C> {
    config: C,
    algorithm: Algorithm,
}

impl<C: SigningConfig> TokenSigner<C> {
    /// Create a new signer.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(config: C) -> Self {
        Self {
            config,
            algorithm: Algorithm::HS256,
        }
    }

    fn secret(&self) -> Result<&[u8], JwtError> {
        let secret = self.config.secret_key();
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }
        Ok(secret)
    }

    /// Sign a token of `kind` carrying `claims`.
    ///
    /// # Arguments
    /// * `kind` - Access or Refresh; selects subject and lifetime
    /// * `claims` - Custom payload embedded under the `claims` key
    /// * `now` - Issue instant (`iat` and `nbf`)
    ///
    /// # Returns
    /// Compact JWT string (header.payload.signature)
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret configured
    /// * `InvalidLifetime` - Configured lifetime for `kind` is unusable
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign<T: Serialize>(
        &self,
        kind: TokenKind,
        claims: &T,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let secret = self.secret()?;
        let payload = TokenClaims::new(kind, claims, now, self.config.expires_in(kind))?;

        encode(
            &Header::new(self.algorithm),
            &payload,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token of `kind`.
    ///
    /// Checks signature, issuer, audience, subject and expiry.
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret configured
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature, issuer, audience or subject mismatch
    /// * `DecodingFailed` - Token is malformed
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<TokenClaims<T>, JwtError> {
        let secret = self.secret()?;

        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&AUDIENCE);
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        validation.sub = Some(kind.subject().to_string());

        decode::<TokenClaims<T>>(token, &DecodingKey::from_secret(secret), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::InvalidSubject => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}

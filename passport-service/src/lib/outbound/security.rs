use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SigningConfig;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::TokenPair;
use crate::domain::user::models::UserClaims;
use crate::domain::user::ports::Clock;
use crate::domain::user::ports::PasswordHasher;
use crate::domain::user::ports::TokenIssuer;
use crate::user::errors::UserError;

/// Argon2id hashing on tokio's blocking pool.
///
/// Hashing is CPU-bound and deliberately slow, so it never runs on an async worker.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    inner: auth::PasswordHasher,
}

impl Argon2PasswordHasher {
    pub fn new(inner: auth::PasswordHasher) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, UserError> {
        let hasher = self.inner.clone();
        let plaintext = plaintext.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| UserError::Hashing(format!("Task join error: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, UserError> {
        let hasher = self.inner.clone();
        let plaintext = plaintext.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| UserError::Hashing(format!("Task join error: {}", e)))?
            .map_err(UserError::from)
    }
}

/// Issues token pairs through the shared [`Authenticator`].
pub struct JwtTokenIssuer<C> {
    authenticator: Arc<Authenticator<C>>,
}

impl<C: SigningConfig> JwtTokenIssuer<C> {
    pub fn new(authenticator: Arc<Authenticator<C>>) -> Self {
        Self { authenticator }
    }
}

impl<C: SigningConfig + 'static> TokenIssuer for JwtTokenIssuer<C> {
    fn issue_pair(&self, claims: &UserClaims, now: DateTime<Utc>) -> Result<TokenPair, UserError> {
        self.authenticator
            .issue_pair(claims, now)
            .map(TokenPair::from)
            .map_err(|e| {
                tracing::error!(error = %e, "Token signing failed");
                UserError::from(e)
            })
    }
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

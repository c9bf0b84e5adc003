use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::SigningConfig;
use crate::jwt::TokenClaims;
use crate::jwt::TokenKind;
use crate::jwt::TokenSigner;

/// Issues and validates access/refresh token pairs.
pub struct Authenticator<C> {
    token_signer: TokenSigner<C>,
}

/// Access and refresh tokens signed from the same claims and instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl<C: SigningConfig> Authenticator<C> {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_config` - Secret and token lifetimes
    pub fn new(signing_config: C) -> Self {
        Self {
            token_signer: TokenSigner::new(signing_config),
        }
    }

    /// Sign an access token and a refresh token for the same claims.
    ///
    /// Both tokens share `now` as their issue instant. Either both are
    /// returned or neither is.
    ///
    /// # Errors
    /// * `JwtError` - Signing failed for either token
    pub fn issue_pair<T: Serialize>(
        &self,
        claims: &T,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        let access_token = self.token_signer.sign(TokenKind::Access, claims, now)?;
        let refresh_token = self.token_signer.sign(TokenKind::Refresh, claims, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate and decode a token of the given kind.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token<T: DeserializeOwned>(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<TokenClaims<T>, JwtError> {
        self.token_signer.verify(token, kind)
    }
}

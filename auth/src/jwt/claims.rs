use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Issuer stamped into every token.
pub const ISSUER: &str = "kawaiishop-api";

/// Consumers allowed to accept a token. Identical for every kind.
pub const AUDIENCE: [&str; 2] = ["customer", "admin"];

/// Kind of token being issued.
///
/// The kind fixes the `sub` claim and selects which lifetime applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Subject claim for this kind.
    pub fn subject(&self) -> &'static str {
        match self {
            TokenKind::Access => "access-token",
            TokenKind::Refresh => "refresh-token",
        }
    }
}

/// Token payload: caller-defined `claims` plus RFC 7519 registered claims.
///
/// Registered fields are derived from the token kind and the issue time only;
/// none of them are taken from caller input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims<T> {
    /// Service-specific identity payload
    pub claims: T,

    /// Issuer
    pub iss: String,

    /// Subject ("access-token" or "refresh-token")
    pub sub: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl<T> TokenClaims<T> {
    /// Build the payload for a token of `kind` issued at `issued_at`.
    ///
    /// # Arguments
    /// * `kind` - Token kind, fixes the subject
    /// * `claims` - Custom identity payload
    /// * `issued_at` - Issue instant, used for both `iat` and `nbf`
    /// * `expires_in` - Lifetime in seconds
    ///
    /// # Errors
    /// * `InvalidLifetime` - `expires_in` is not positive, or the expiry falls
    ///   outside the representable date range
    pub fn new(
        kind: TokenKind,
        claims: T,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Result<Self, JwtError> {
        let expires_at = Some(expires_in)
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or(JwtError::InvalidLifetime(expires_in))?;

        Ok(Self {
            claims,
            iss: ISSUER.to_string(),
            sub: kind.subject().to_string(),
            aud: AUDIENCE.iter().map(|a| a.to_string()).collect(),
            exp: expires_at.timestamp(),
            nbf: issued_at.timestamp(),
            iat: issued_at.timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_subject_is_fixed_per_kind() {
        let access = TokenClaims::new(TokenKind::Access, (), issued_at(), 60).unwrap();
        let refresh = TokenClaims::new(TokenKind::Refresh, (), issued_at(), 60).unwrap();

        assert_eq!(access.sub, "access-token");
        assert_eq!(refresh.sub, "refresh-token");
    }

    #[test]
    fn test_registered_claims() {
        let claims = TokenClaims::new(TokenKind::Access, "payload", issued_at(), 900).unwrap();

        assert_eq!(claims.iss, "kawaiishop-api");
        assert_eq!(claims.aud, vec!["customer".to_string(), "admin".to_string()]);
        assert_eq!(claims.iat, issued_at().timestamp());
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp, issued_at().timestamp() + 900);
    }

    #[test]
    fn test_rejects_unusable_lifetimes() {
        for expires_in in [0, -1, i64::MAX, i64::MAX / 1000] {
            let result = TokenClaims::new(TokenKind::Refresh, (), issued_at(), expires_in);
            assert!(
                matches!(result, Err(JwtError::InvalidLifetime(secs)) if secs == expires_in),
                "lifetime {} was accepted",
                expires_in
            );
        }
    }

    #[test]
    fn test_payload_layout() {
        let claims = TokenClaims::new(
            TokenKind::Access,
            serde_json::json!({ "id": "U000001", "roleId": 1 }),
            issued_at(),
            900,
        )
        .unwrap();

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["claims"]["id"], "U000001");
        assert_eq!(value["claims"]["roleId"], 1);
        assert_eq!(value["iss"], "kawaiishop-api");
        assert_eq!(value["sub"], "access-token");
        assert_eq!(value["aud"], serde_json::json!(["customer", "admin"]));
        assert_eq!(value["exp"], issued_at().timestamp() + 900);
    }
}

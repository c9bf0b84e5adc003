use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;

/// User record as owned by the credential store.
///
/// Read-only to the passport service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role identifier carried in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub i32);

impl RoleId {
    pub const CUSTOMER: RoleId = RoleId(1);
    pub const ADMIN: RoleId = RoleId(2);

    /// Role assigned to a newly inserted user.
    pub fn for_new_user(is_admin: bool) -> Self {
        if is_admin {
            Self::ADMIN
        } else {
            Self::CUSTOMER
        }
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity payload embedded in every issued token.
///
/// Only the user id and role id; nothing else about the user leaves in a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub id: UserId,
    pub role_id: RoleId,
}

impl From<&User> for UserClaims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role_id: user.role_id,
        }
    }
}

/// Email and plaintext password presented at sign-in.
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to register a new user.
///
/// The email is validated by the service, not at construction. A requested
/// role is advisory; self-registration always yields a customer.
pub struct RegisterUserCommand {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role_id: Option<RoleId>,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Raw email address
    /// * `username` - Desired username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: String, username: String, password: String) -> Self {
        Self {
            email,
            username,
            password,
            role_id: None,
        }
    }

    pub fn with_role_id(mut self, role_id: RoleId) -> Self {
        self.role_id = Some(role_id);
        self
    }
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Registration after validation and hashing; what the store receives.
///
/// Has no plaintext field, so a password cannot reach storage unhashed.
#[derive(Debug, Clone)]
pub struct HashedRegistration {
    pub email: EmailAddress,
    pub username: String,
    pub password_hash: String,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub role_id: RoleId,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            username: user.username.clone(),
            role_id: user.role_id,
        }
    }
}

/// Access and refresh token strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<auth::TokenPair> for TokenPair {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Result of registration (no token) or authentication (with token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passport {
    pub user: UserView,
    pub token: Option<TokenPair>,
}

impl Passport {
    /// Passport for a freshly registered user.
    pub fn identity_only(user: UserView) -> Self {
        Self { user, token: None }
    }

    /// Passport for an authenticated session.
    pub fn with_token(user: UserView, token: TokenPair) -> Self {
        Self {
            user,
            token: Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: UserId::new(),
            username: "alice".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role_id: RoleId::CUSTOMER,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_claims_are_minimal() {
        let user = alice();
        let claims = UserClaims::from(&user);

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.role_id, RoleId::CUSTOMER);

        let value = serde_json::to_value(claims).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["id"], user.id.to_string());
        assert_eq!(object["roleId"], 1);
    }

    #[test]
    fn test_user_view_hides_hash() {
        let user = alice();
        let view = UserView::from(&user);

        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.username, "alice");
        assert!(!format!("{:?}", view).contains("argon2"));
    }

    #[test]
    fn test_role_for_new_user() {
        assert_eq!(RoleId::for_new_user(false), RoleId::CUSTOMER);
        assert_eq!(RoleId::for_new_user(true), RoleId::ADMIN);
    }

    #[test]
    fn test_debug_redacts_password() {
        let credential = Credential::new("a@x.com".to_string(), "Secr3t!".to_string());
        let command = RegisterUserCommand::new(
            "a@x.com".to_string(),
            "alice".to_string(),
            "Secr3t!".to_string(),
        );

        assert!(!format!("{:?}", credential).contains("Secr3t!"));
        assert!(!format!("{:?}", command).contains("Secr3t!"));
    }
}

use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for registration and authentication.
///
/// Every failure the core can produce maps to exactly one variant; callers
/// match on the variant, never on the message.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Client-correctable
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found with email: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Internal faults
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl UserError {
    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UserError::InvalidEmail(_)
                | UserError::UsernameAlreadyExists(_)
                | UserError::EmailAlreadyExists(_)
                | UserError::NotFound(_)
                | UserError::InvalidCredentials
        )
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        UserError::Signing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(UserError::InvalidCredentials.is_client_error());
        assert!(UserError::NotFound("a@x.com".to_string()).is_client_error());
        assert!(UserError::EmailAlreadyExists("a@x.com".to_string()).is_client_error());
        assert!(!UserError::Signing("no secret".to_string()).is_client_error());
        assert!(!UserError::Database("connection reset".to_string()).is_client_error());
    }

    #[test]
    fn test_signing_error_is_not_swallowed() {
        let err: UserError = auth::JwtError::MissingSecret.into();
        assert!(matches!(err, UserError::Signing(_)));
    }
}

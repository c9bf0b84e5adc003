use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::HashedRegistration;
use crate::domain::user::models::Passport;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserClaims;
use crate::user::errors::UserError;

/// Port for passport operations.
#[async_trait]
pub trait PassportServicePort: Send + Sync + 'static {
    /// Register a new customer.
    ///
    /// # Arguments
    /// * `command` - Email, username and plaintext password
    ///
    /// # Returns
    /// Passport with the public user view and no token
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is malformed
    /// * `Hashing` - Password hashing failed
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Passport, UserError>;

    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `credential` - Email and plaintext password
    ///
    /// # Returns
    /// Passport with the public user view and a recorded token pair
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Hashing` - Stored hash could not be checked
    /// * `Signing` - Token signing failed
    /// * `Database` - Lookup or session persistence failed
    async fn authenticate(&self, credential: Credential) -> Result<Passport, UserError>;
}

/// User lookup, uniqueness enforcement and session persistence.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Database` - Database operation failed
    async fn find_one_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;

    /// Persist a new user. Username and email are unique independently.
    ///
    /// # Arguments
    /// * `registration` - Validated registration with hashed password
    /// * `is_admin` - Assign the admin role instead of customer
    ///
    /// # Returns
    /// Passport with the stored user's public view and no token
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn insert_user(
        &self,
        registration: HashedRegistration,
        is_admin: bool,
    ) -> Result<Passport, UserError>;

    /// Record an issued passport as a session.
    ///
    /// # Errors
    /// * `Database` - Passport has no token or the insert failed
    async fn insert_oauth(&self, passport: &Passport) -> Result<(), UserError>;
}

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync + 'static {
    /// Salted hash of `plaintext`.
    ///
    /// # Errors
    /// * `Hashing` - Hashing operation failed
    async fn hash(&self, plaintext: &str) -> Result<String, UserError>;

    /// Constant-time check of `plaintext` against `hash`.
    ///
    /// # Errors
    /// * `Hashing` - `hash` is malformed
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, UserError>;
}

/// Signs access and refresh tokens together.
pub trait TokenIssuer: Send + Sync + 'static {
    /// # Errors
    /// * `Signing` - Either token could not be signed
    fn issue_pair(&self, claims: &UserClaims, now: DateTime<Utc>) -> Result<TokenPair, UserError>;
}

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

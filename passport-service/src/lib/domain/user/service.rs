use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::HashedRegistration;
use crate::domain::user::models::Passport;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::UserClaims;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;
use crate::user::ports::Clock;
use crate::user::ports::CredentialStore;
use crate::user::ports::PassportServicePort;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenIssuer;

/// Domain service implementation for registration and authentication.
///
/// Stateless between calls; every collaborator is injected.
pub struct PassportService<CS, PH, TI, CL>
where
    CS: CredentialStore,
    PH: PasswordHasher,
    TI: TokenIssuer,
    CL: Clock,
{
    store: Arc<CS>,
    password_hasher: Arc<PH>,
    token_issuer: Arc<TI>,
    clock: Arc<CL>,
}

impl<CS, PH, TI, CL> PassportService<CS, PH, TI, CL>
where
    CS: CredentialStore,
    PH: PasswordHasher,
    TI: TokenIssuer,
    CL: Clock,
{
    /// Create a new passport service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User lookup and session persistence
    /// * `password_hasher` - Password hashing implementation
    /// * `token_issuer` - Access/refresh token signing
    /// * `clock` - Time source for token issue instants
    pub fn new(
        store: Arc<CS>,
        password_hasher: Arc<PH>,
        token_issuer: Arc<TI>,
        clock: Arc<CL>,
    ) -> Self {
        Self {
            store,
            password_hasher,
            token_issuer,
            clock,
        }
    }
}

#[async_trait]
impl<CS, PH, TI, CL> PassportServicePort for PassportService<CS, PH, TI, CL>
where
    CS: CredentialStore,
    PH: PasswordHasher,
    TI: TokenIssuer,
    CL: Clock,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Passport, UserError> {
        let email = EmailAddress::new(command.email)?;

        if let Some(requested) = command.role_id.filter(|r| *r != RoleId::CUSTOMER) {
            tracing::warn!(
                requested_role_id = requested.0,
                "Requested role ignored on self-registration"
            );
        }

        let password_hash = self.password_hasher.hash(&command.password).await?;

        let registration = HashedRegistration {
            email,
            username: command.username,
            password_hash,
        };

        let passport = self.store.insert_user(registration, false).await?;

        tracing::info!(
            user_id = %passport.user.id,
            username = %passport.user.username,
            "User registered"
        );

        Ok(passport)
    }

    async fn authenticate(&self, credential: Credential) -> Result<Passport, UserError> {
        let email = EmailAddress::new(credential.email)
            .map_err(|e| UserError::NotFound(e.to_string()))?;

        let user = self.store.find_one_user_by_email(&email).await?;

        if !self
            .password_hasher
            .verify(&credential.password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let claims = UserClaims::from(&user);
        let token = self.token_issuer.issue_pair(&claims, self.clock.now())?;
        let passport = Passport::with_token(UserView::from(&user), token);

        self.store.insert_oauth(&passport).await?;

        tracing::info!(user_id = %user.id, "Passport issued");

        Ok(passport)
    }
}

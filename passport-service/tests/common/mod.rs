use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use passport_service::config::JwtConfig;
use passport_service::domain::user::errors::UserError;
use passport_service::domain::user::models::EmailAddress;
use passport_service::domain::user::models::HashedRegistration;
use passport_service::domain::user::models::Passport;
use passport_service::domain::user::models::RoleId;
use passport_service::domain::user::models::TokenPair;
use passport_service::domain::user::models::User;
use passport_service::domain::user::models::UserId;
use passport_service::domain::user::models::UserView;
use passport_service::domain::user::ports::Clock;
use passport_service::domain::user::ports::CredentialStore;
use passport_service::domain::user::service::PassportService;
use passport_service::inbound::http::router::create_router;
use passport_service::outbound::security::Argon2PasswordHasher;
use passport_service::outbound::security::JwtTokenIssuer;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_EXPIRES_SECS: i64 = 900;
pub const REFRESH_EXPIRES_SECS: i64 = 604_800;

/// Stored sessions, one per successful sign-in.
#[derive(Debug, Clone)]
pub struct OauthRecord {
    pub user_id: UserId,
    pub token: TokenPair,
}

/// Credential store kept in memory, enforcing the same uniqueness rules as Postgres.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<UserId, User>>,
    oauth: Mutex<Vec<OauthRecord>>,
}

impl InMemoryCredentialStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn oauth_records(&self) -> Vec<OauthRecord> {
        self.oauth.lock().unwrap().clone()
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_one_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn insert_user(
        &self,
        registration: HashedRegistration,
        is_admin: bool,
    ) -> Result<Passport, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.username == registration.username) {
            return Err(UserError::UsernameAlreadyExists(registration.username));
        }
        if users.values().any(|u| u.email == registration.email) {
            return Err(UserError::EmailAlreadyExists(
                registration.email.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId::new(),
            username: registration.username,
            email: registration.email,
            password_hash: registration.password_hash,
            role_id: RoleId::for_new_user(is_admin),
            created_at: Utc::now(),
        };
        let passport = Passport::identity_only(UserView::from(&user));
        users.insert(user.id, user);

        Ok(passport)
    }

    async fn insert_oauth(&self, passport: &Passport) -> Result<(), UserError> {
        let token = passport
            .token
            .clone()
            .ok_or_else(|| UserError::Database("passport has no token to record".to_string()))?;

        self.oauth.lock().unwrap().push(OauthRecord {
            user_id: passport.user.id,
            token,
        });

        Ok(())
    }
}

/// Clock pinned to a whole second so expiry arithmetic is exact.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryCredentialStore>,
    pub authenticator: Arc<Authenticator<JwtConfig>>,
    pub issued_at: DateTime<Utc>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_secret(JWT_SECRET).await
    }

    /// Spawn with a specific signing secret (empty to simulate a missing secret)
    pub async fn spawn_with_secret(secret: &str) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt_config = JwtConfig {
            secret: secret.to_string(),
            access_expires_secs: ACCESS_EXPIRES_SECS,
            refresh_expires_secs: REFRESH_EXPIRES_SECS,
        };

        let password_hasher =
            auth::PasswordHasher::with_params(8 * 1024, 1, 1).expect("Invalid Argon2 params");
        let authenticator = Arc::new(Authenticator::new(jwt_config));

        let issued_at = Utc
            .timestamp_opt(Utc::now().timestamp(), 0)
            .single()
            .expect("Invalid timestamp");
        let store = Arc::new(InMemoryCredentialStore::default());

        let passport_service = Arc::new(PassportService::new(
            Arc::clone(&store),
            Arc::new(Argon2PasswordHasher::new(password_hasher)),
            Arc::new(JwtTokenIssuer::new(Arc::clone(&authenticator))),
            Arc::new(FixedClock(issued_at)),
        ));

        let router = create_router(passport_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            authenticator,
            issued_at,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub async fn sign_up(&self, email: &str, username: &str, password: &str) -> reqwest::Response {
        self.post("/users/signup")
            .json(&serde_json::json!({
                "email": email,
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/users/signin")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

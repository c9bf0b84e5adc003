use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::HashedRegistration;
use crate::domain::user::models::Passport;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::Database(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<User, UserError> {
    let id: Uuid = row.try_get("id").map_err(database_error)?;
    let email: String = row.try_get("email").map_err(database_error)?;
    let role_id: i32 = row.try_get("role_id").map_err(database_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;

    Ok(User {
        id: UserId(id),
        username: row.try_get("username").map_err(database_error)?,
        email: EmailAddress::new(email).map_err(|e| UserError::Database(e.to_string()))?,
        password_hash: row.try_get("password").map_err(database_error)?,
        role_id: RoleId(role_id),
        created_at,
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_one_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password, role_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => user_from_row(&r),
            None => Err(UserError::NotFound(email.to_string())),
        }
    }

    async fn insert_user(
        &self,
        registration: HashedRegistration,
        is_admin: bool,
    ) -> Result<Passport, UserError> {
        let id = UserId::new();
        let role_id = RoleId::for_new_user(is_admin);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password, role_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.0)
        .bind(&registration.username)
        .bind(registration.email.as_str())
        .bind(&registration.password_hash)
        .bind(role_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(registration.username.clone());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(
                            registration.email.as_str().to_string(),
                        );
                    }
                }
            }
            UserError::Database(e.to_string())
        })?;

        Ok(Passport::identity_only(UserView {
            id,
            email: registration.email.as_str().to_string(),
            username: registration.username,
            role_id,
        }))
    }

    async fn insert_oauth(&self, passport: &Passport) -> Result<(), UserError> {
        let token = passport.token.as_ref().ok_or_else(|| {
            UserError::Database("passport has no token to record".to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO oauth (id, user_id, access_token, refresh_token)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(passport.user.id.0)
        .bind(&token.access_token)
        .bind(&token.refresh_token)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}

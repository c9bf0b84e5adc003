use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::Passport;
use crate::user::errors::UserError;

pub mod health_check;
pub mod sign_in;
pub mod sign_up;

const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Unknown email and wrong password produce the same response so the
/// endpoint cannot be used to enumerate accounts. Internal faults are logged
/// and reported without detail.
impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "Request rejected");
        } else {
            tracing::error!(error = %err, "Request failed");
        }

        match err {
            UserError::InvalidEmail(_) => ApiError::BadRequest(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::NotFound(_) | UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            UserError::Hashing(_) | UserError::Signing(_) | UserError::Database(_) => {
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Passport as returned by both sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassportResponseData {
    pub user: UserData,
    pub token: Option<TokenData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<Passport> for PassportResponseData {
    fn from(passport: Passport) -> Self {
        Self {
            user: UserData {
                id: passport.user.id.to_string(),
                email: passport.user.email,
                username: passport.user.username,
                role_id: passport.user.role_id.0,
            },
            token: passport.token.map(|token| TokenData {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::EmailError;

    #[test]
    fn test_not_found_and_invalid_credentials_look_the_same() {
        let not_found = ApiError::from(UserError::NotFound("a@x.com".to_string()));
        let mismatch = ApiError::from(UserError::InvalidCredentials);

        assert_eq!(not_found, mismatch);
        assert_eq!(
            not_found,
            ApiError::Unauthorized("invalid email or password".to_string())
        );
    }

    #[test]
    fn test_duplicates_are_conflicts_naming_the_field() {
        let username = ApiError::from(UserError::UsernameAlreadyExists("alice".to_string()));
        let email = ApiError::from(UserError::EmailAlreadyExists("a@x.com".to_string()));

        assert_eq!(
            username,
            ApiError::Conflict("Username already exists: alice".to_string())
        );
        assert_eq!(
            email,
            ApiError::Conflict("Email already exists: a@x.com".to_string())
        );
    }

    #[test]
    fn test_invalid_email_is_bad_request() {
        let err = ApiError::from(UserError::InvalidEmail(EmailError::InvalidFormat(
            "Missing separator character '@'.".to_string(),
        )));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        for err in [
            UserError::Hashing("entropy".to_string()),
            UserError::Signing("Signing secret is missing".to_string()),
            UserError::Database("relation \"users\" does not exist".to_string()),
        ] {
            assert_eq!(
                ApiError::from(err),
                ApiError::InternalServerError("internal server error".to_string())
            );
        }
    }
}

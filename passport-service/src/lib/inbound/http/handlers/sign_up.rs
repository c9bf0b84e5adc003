use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PassportResponseData;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RoleId;
use crate::domain::user::ports::PassportServicePort;
use crate::inbound::http::router::AppState;

pub async fn sign_up<PS: PassportServicePort>(
    State(state): State<AppState<PS>>,
    Json(body): Json<SignUpRequestBody>,
) -> Result<ApiSuccess<PassportResponseData>, ApiError> {
    state
        .passport_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|passport| ApiSuccess::new(StatusCode::CREATED, passport.into()))
}

/// HTTP request body for sign-up (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequestBody {
    email: String,
    username: String,
    password: String,
    #[serde(default)]
    role_id: Option<i32>,
}

impl SignUpRequestBody {
    fn into_command(self) -> RegisterUserCommand {
        let command = RegisterUserCommand::new(self.email, self.username, self.password);

        match self.role_id {
            Some(role_id) => command.with_role_id(RoleId(role_id)),
            None => command,
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PassportResponseData;
use crate::domain::user::models::Credential;
use crate::domain::user::ports::PassportServicePort;
use crate::inbound::http::router::AppState;

pub async fn sign_in<PS: PassportServicePort>(
    State(state): State<AppState<PS>>,
    Json(body): Json<SignInRequestBody>,
) -> Result<ApiSuccess<PassportResponseData>, ApiError> {
    let passport = state
        .passport_service
        .authenticate(Credential::new(body.email, body.password))
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, passport.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    email: String,
    password: String,
}

use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health_check() -> ApiSuccess<HealthCheckData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthCheckData {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckData {
    pub name: String,
    pub version: String,
}

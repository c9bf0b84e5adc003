use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health_check::health_check;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use crate::domain::user::ports::PassportServicePort;

pub struct AppState<PS: PassportServicePort> {
    pub passport_service: Arc<PS>,
}

impl<PS: PassportServicePort> Clone for AppState<PS> {
    fn clone(&self) -> Self {
        Self {
            passport_service: Arc::clone(&self.passport_service),
        }
    }
}

pub fn create_router<PS: PassportServicePort>(passport_service: Arc<PS>) -> Router {
    let state = AppState { passport_service };

    let user_routes = Router::new()
        .route("/users/signup", post(sign_up::<PS>))
        .route("/users/signin", post(sign_in::<PS>));

    // Headers stay out of the span so bearer tokens never reach the logs.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(health_check))
        .merge(user_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

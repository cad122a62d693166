pub mod routes;

use crate::errors::JournalError;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/trades", get(routes::get_trades))
        .route("/api/metrics", get(routes::get_metrics))
        .route("/api/calendar", get(routes::get_calendar))
        .route("/api/mentor/{share_id}/students", get(routes::get_students))
        .route(
            "/api/mentor/{share_id}/students/{student_id}",
            get(routes::get_student),
        )
        .route("/api/profile", get(routes::get_profile))
        .route("/api/counters", get(routes::get_counters))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        let status = match &self {
            JournalError::InvalidMonth(_)
            | JournalError::InvalidDate(_)
            | JournalError::InvalidRecord(_)
            | JournalError::Parse(_) => StatusCode::BAD_REQUEST,
            JournalError::NotFound(_) => StatusCode::NOT_FOUND,
            JournalError::Fixture(_) | JournalError::Config(_) | JournalError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resume_parser": if state.resume_service.is_remote_enabled() { "remote" } else { "local" },
    });
    (StatusCode::OK, Json(body))
}

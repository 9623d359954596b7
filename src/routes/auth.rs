use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::dto::auth_dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::error::Result;
use crate::models::session::Session;
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    Ok(Json(state.session_service.login(credentials).await?))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let result = state.session_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> impl IntoResponse {
    state.session_service.logout(session.id).await;
    Json(json!({ "message": "Logged out" }))
}

pub async fn me(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::dto::application_dto::CreateDraftRequest;
use crate::error::Result;
use crate::models::draft::{ApplicationDraft, DraftFieldsPatch};
use crate::routes::resumes::read_resume_field;
use crate::AppState;

pub async fn create_draft(
    State(state): State<AppState>,
    Json(payload): Json<CreateDraftRequest>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.create(payload.job_id).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

pub async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationDraft>> {
    Ok(Json(state.draft_service.get(id).await?))
}

pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftFieldsPatch>,
) -> Result<Json<ApplicationDraft>> {
    Ok(Json(state.draft_service.update_fields(id, patch).await?))
}

pub async fn upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationDraft>> {
    // 404 before reading the body
    state.draft_service.get(id).await?;
    let file = read_resume_field(&mut multipart).await?;
    Ok(Json(state.draft_service.upload_resume(id, file).await?))
}

pub async fn cancel_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationDraft>> {
    Ok(Json(state.draft_service.cancel_resume(id).await?))
}

pub async fn submit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let result = state.draft_service.submit(id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted successfully",
            "result": result,
        })),
    ))
}

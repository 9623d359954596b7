use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::dto::application_dto::{
    ApplicantListQuery, ApplicantView, StatusUpdateRequest, StatusUpdateResponse, TrackingEntry,
};
use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;
use crate::services::analytics_service::{self, ApplicationAnalytics};
use crate::services::applicant_service;
use crate::services::export_service::{ExportService, XLSX_CONTENT_TYPE};
use crate::AppState;

/// Applicants ranked by match, best first.
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicantListQuery>,
) -> Result<Json<Vec<ApplicantView>>> {
    let applications = state.hr_api.list_applications().await?;
    let ranked = applicant_service::ranked(applications, query.job_title.as_deref());
    Ok(Json(ranked.iter().map(ApplicantView::from).collect()))
}

pub async fn job_titles(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let applications = state.hr_api.list_applications().await?;
    Ok(Json(applicant_service::job_titles(&applications)))
}

pub async fn analytics(State(state): State<AppState>) -> Result<Json<ApplicationAnalytics>> {
    let applications = state.hr_api.list_applications().await?;
    Ok(Json(analytics_service::summarize(&applications)))
}

pub async fn tracking(State(state): State<AppState>) -> Result<Json<Vec<TrackingEntry>>> {
    let applications = state.hr_api.list_applications().await?;
    Ok(Json(applications.iter().map(TrackingEntry::from).collect()))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>> {
    let next = ApplicationStatus::parse(&payload.status)
        .ok_or_else(|| Error::BadRequest(format!("Unknown status: {}", payload.status)))?;

    let current = state
        .hr_api
        .list_applications()
        .await?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))?
        .pipeline_status();
    if !current.can_transition_to(next) {
        return Err(Error::BadRequest(format!(
            "Application is already {}",
            current
        )));
    }

    state.hr_api.update_status(&id, next).await?;
    info!(application_id = %id, from = %current, to = %next, "Application status updated");
    Ok(Json(StatusUpdateResponse {
        id,
        status: next,
        progress_percent: next.progress_percent(),
    }))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.hr_api.delete_application(&id).await?;
    info!(application_id = %id, "Application deleted");
    Ok(Json(json!({ "message": "Application deleted", "id": id })))
}

pub async fn export_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicantListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.hr_api.list_applications().await?;
    let ranked = applicant_service::ranked(applications, query.job_title.as_deref());
    let views: Vec<ApplicantView> = ranked.iter().map(ApplicantView::from).collect();

    let buffer = ExportService::generate_applicants_xlsx(&views)?;
    let filename = ExportService::export_filename(query.job_title.as_deref());
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

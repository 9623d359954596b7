use axum::{extract::State, Json};

use crate::dto::interview_dto::{
    BulkScheduleRequest, BulkScheduleSummary, ScheduleInterviewRequest, ScheduleInterviewResponse,
};
use crate::error::Result;
use crate::utils::validation::validate;
use crate::AppState;

pub async fn schedule_interview(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleInterviewRequest>,
) -> Result<Json<ScheduleInterviewResponse>> {
    let response = state
        .scheduling_service
        .schedule_one(&payload.application_id, payload.date.as_deref())
        .await?;
    Ok(Json(response))
}

pub async fn schedule_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkScheduleRequest>,
) -> Result<Json<BulkScheduleSummary>> {
    validate(&payload)?;
    Ok(Json(state.scheduling_service.schedule_bulk(&payload).await?))
}

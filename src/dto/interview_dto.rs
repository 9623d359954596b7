use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Body sent to the HR Desk scheduling endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewInvite {
    pub email: String,
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub application_id: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleInterviewResponse {
    pub application_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_match_range"))]
pub struct BulkScheduleRequest {
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_match: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_match: f64,
    #[validate(length(min = 1, message = "Interview date is required."))]
    pub date: String,
    #[serde(default)]
    pub job_title: Option<String>,
}

fn validate_match_range(req: &BulkScheduleRequest) -> Result<(), validator::ValidationError> {
    if req.min_match > req.max_match {
        let mut err = validator::ValidationError::new("match_range");
        err.message = Some("min_match must not exceed max_match".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkScheduleFailure {
    pub application_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkScheduleSummary {
    pub targeted: usize,
    pub scheduled: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<BulkScheduleFailure>,
}

/// Per-field problems that keep an application from being scheduled.
pub type ScheduleFieldErrors = BTreeMap<&'static str, &'static str>;

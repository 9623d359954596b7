use std::sync::Arc;

use crate::dto::interview_dto::{
    BulkScheduleFailure, BulkScheduleRequest, BulkScheduleSummary, InterviewInvite,
    ScheduleFieldErrors, ScheduleInterviewResponse,
};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::services::applicant_service;
use crate::services::hr_api_service::HrApi;
use crate::utils::time::is_valid_interview_date;
use tracing::{error, info, warn};

const DEFAULT_SCHEDULED_MESSAGE: &str = "Interview scheduled!";

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Checks what the scheduling endpoint needs: an email, a full name and a date.
pub fn validate_schedule_fields(app: &Application, date: Option<&str>) -> ScheduleFieldErrors {
    let mut errors = ScheduleFieldErrors::new();
    if !non_blank(&app.email) {
        errors.insert("email", "Email is required.");
    }
    if !non_blank(&app.first_name) || !non_blank(&app.last_name) {
        errors.insert("name", "Full name is required.");
    }
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => {
            errors.insert("date", "Interview date is required.");
        }
        Some(d) if !is_valid_interview_date(d) => {
            errors.insert("date", "Interview date is invalid.");
        }
        Some(_) => {}
    }
    errors
}

fn invite_for(app: &Application, date: &str) -> InterviewInvite {
    InterviewInvite {
        email: app.email.clone().unwrap_or_default().trim().to_string(),
        name: format!(
            "{} {}",
            app.first_name.as_deref().unwrap_or_default().trim(),
            app.last_name.as_deref().unwrap_or_default().trim()
        ),
        date: date.trim().to_string(),
    }
}

/// Applications with a match score inside `[min, max]`, optionally limited
/// to one job title.
pub fn select_bulk_targets(
    applications: Vec<Application>,
    min_match: f64,
    max_match: f64,
    job_title: Option<&str>,
) -> Vec<Application> {
    applicant_service::filter_by_job_title(applications, job_title)
        .into_iter()
        .filter(|app| {
            app.match_percentage
                .map(|m| m >= min_match && m <= max_match)
                .unwrap_or(false)
        })
        .collect()
}

#[derive(Clone)]
pub struct SchedulingService {
    hr_api: Arc<dyn HrApi>,
}

impl SchedulingService {
    pub fn new(hr_api: Arc<dyn HrApi>) -> Self {
        Self { hr_api }
    }

    pub async fn schedule_one(
        &self,
        application_id: &str,
        date: Option<&str>,
    ) -> Result<ScheduleInterviewResponse> {
        let applications = self.hr_api.list_applications().await?;
        let app = applications
            .into_iter()
            .find(|a| a.id == application_id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", application_id)))?;

        let errors = validate_schedule_fields(&app, date);
        if !errors.is_empty() {
            let message = errors.values().copied().collect::<Vec<_>>().join(" ");
            return Err(Error::BadRequest(message));
        }

        let invite = invite_for(&app, date.unwrap_or_default());
        let response = self.hr_api.schedule_interview(invite).await.map_err(|e| {
            error!(application_id, error = %e, "Scheduling error");
            e
        })?;

        Ok(ScheduleInterviewResponse {
            application_id: app.id,
            message: response
                .message
                .unwrap_or_else(|| DEFAULT_SCHEDULED_MESSAGE.to_string()),
        })
    }

    /// Schedules every eligible application in the match range, one call at
    /// a time. Per-application failures are counted, never propagated.
    pub async fn schedule_bulk(&self, request: &BulkScheduleRequest) -> Result<BulkScheduleSummary> {
        let applications = self.hr_api.list_applications().await?;
        let targets = select_bulk_targets(
            applications,
            request.min_match,
            request.max_match,
            request.job_title.as_deref(),
        );

        let mut summary = BulkScheduleSummary {
            targeted: targets.len(),
            ..Default::default()
        };

        for app in &targets {
            let errors = validate_schedule_fields(app, Some(&request.date));
            if !errors.is_empty() {
                warn!(application_id = %app.id, ?errors, "Skipping application in bulk scheduling");
                summary.skipped += 1;
                continue;
            }

            match self.hr_api.schedule_interview(invite_for(app, &request.date)).await {
                Ok(_) => summary.scheduled += 1,
                Err(e) => {
                    error!(application_id = %app.id, error = %e, "Bulk scheduling failed for application");
                    summary.failed += 1;
                    summary.failures.push(BulkScheduleFailure {
                        application_id: app.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            targeted = summary.targeted,
            scheduled = summary.scheduled,
            failed = summary.failed,
            skipped = summary.skipped,
            "Bulk interview scheduling finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::interview_dto::ScheduleResponse;
    use crate::services::hr_api_service::MockHrApi;

    fn applicant(id: &str, score: Option<f64>, email: Option<&str>) -> Application {
        Application {
            id: id.to_string(),
            first_name: Some("Kiran".into()),
            last_name: Some("Rao".into()),
            email: email.map(str::to_string),
            match_percentage: score,
            job_title: Some("QA ENGINEER".into()),
            ..Default::default()
        }
    }

    fn request(min: f64, max: f64) -> BulkScheduleRequest {
        BulkScheduleRequest {
            min_match: min,
            max_match: max,
            date: "2025-04-01T10:00".into(),
            job_title: None,
        }
    }

    #[test]
    fn validation_reports_each_missing_field() {
        let mut app = applicant("1", None, None);
        app.last_name = None;
        let errors = validate_schedule_fields(&app, None);
        assert_eq!(errors.get("email"), Some(&"Email is required."));
        assert_eq!(errors.get("name"), Some(&"Full name is required."));
        assert_eq!(errors.get("date"), Some(&"Interview date is required."));
    }

    #[test]
    fn bulk_targets_use_inclusive_bounds() {
        let apps = vec![
            applicant("low", Some(49.9), Some("a@x.io")),
            applicant("min", Some(50.0), Some("b@x.io")),
            applicant("mid", Some(60.0), Some("c@x.io")),
            applicant("max", Some(75.0), Some("d@x.io")),
            applicant("high", Some(75.1), Some("e@x.io")),
            applicant("none", None, Some("f@x.io")),
        ];
        let ids: Vec<String> = select_bulk_targets(apps, 50.0, 75.0, None)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["min", "mid", "max"]);
    }

    #[tokio::test]
    async fn bulk_counts_scheduled_skipped_and_failed() {
        let mut api = MockHrApi::new();
        api.expect_list_applications().returning(|| {
            Ok(vec![
                applicant("ok", Some(80.0), Some("ok@x.io")),
                applicant("no-email", Some(85.0), None),
                applicant("boom", Some(90.0), Some("boom@x.io")),
                applicant("out", Some(10.0), Some("out@x.io")),
            ])
        });
        api.expect_schedule_interview()
            .times(2)
            .returning(|invite| {
                if invite.email == "boom@x.io" {
                    Err(Error::Upstream {
                        status: 500,
                        message: "mailer down".into(),
                    })
                } else {
                    Ok(ScheduleResponse {
                        message: Some("sent".into()),
                    })
                }
            });

        let service = SchedulingService::new(Arc::new(api));
        let summary = service.schedule_bulk(&request(75.0, 100.0)).await.unwrap();

        assert_eq!(summary.targeted, 3);
        assert_eq!(summary.scheduled, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].application_id, "boom");
    }

    #[tokio::test]
    async fn single_schedule_sends_full_name() {
        let mut api = MockHrApi::new();
        api.expect_list_applications()
            .returning(|| Ok(vec![applicant("a1", Some(70.0), Some("kiran@x.io"))]));
        api.expect_schedule_interview()
            .withf(|invite| invite.name == "Kiran Rao" && invite.date == "2025-04-01T10:00")
            .times(1)
            .returning(|_| Ok(ScheduleResponse { message: None }));

        let service = SchedulingService::new(Arc::new(api));
        let response = service
            .schedule_one("a1", Some("2025-04-01T10:00"))
            .await
            .unwrap();
        assert_eq!(response.message, DEFAULT_SCHEDULED_MESSAGE);
    }

    #[tokio::test]
    async fn single_schedule_without_date_never_calls_api() {
        let mut api = MockHrApi::new();
        api.expect_list_applications()
            .returning(|| Ok(vec![applicant("a1", Some(70.0), Some("kiran@x.io"))]));
        api.expect_schedule_interview().times(0);

        let service = SchedulingService::new(Arc::new(api));
        let err = service.schedule_one("a1", None).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }
}

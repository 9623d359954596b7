use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus, MatchBand};
use crate::models::draft::ApplicationDraft;
use crate::models::resume::{ParsedResume, ResumeFile};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDraftRequest {
    pub job_id: i64,
}

/// A fully filled-in application, ready for the HR Desk API.
#[derive(Debug, Clone, Validate)]
pub struct ApplicationSubmission {
    #[validate(required(message = "Please upload your resume."))]
    pub resume: Option<ResumeFile>,
    pub job_id: i64,
    pub job_title: String,
    pub job_description: String,
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required."))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Year of graduation is required."))]
    pub year_of_graduation: String,
    #[validate(length(min = 1, message = "Gender is required."))]
    pub gender: String,
    #[validate(length(min = 1, message = "Experience is required."))]
    pub experience: String,
    #[validate(length(min = 1, message = "Skills are required."))]
    pub skills: String,
    #[validate(length(min = 1, message = "Location is required."))]
    pub location: String,
    #[validate(length(min = 1, message = "Pincode is required."))]
    pub pincode: String,
    pub parsed_resume: Option<ParsedResume>,
}

impl From<&ApplicationDraft> for ApplicationSubmission {
    fn from(draft: &ApplicationDraft) -> Self {
        let f = &draft.fields;
        Self {
            resume: draft.resume.clone(),
            job_id: draft.job_id,
            job_title: draft.job_title.clone(),
            job_description: draft.job_description.clone(),
            first_name: f.first_name.trim().to_string(),
            last_name: f.last_name.trim().to_string(),
            email: f.email.trim().to_string(),
            phone_number: f.phone_number.trim().to_string(),
            year_of_graduation: f.year_of_graduation.trim().to_string(),
            gender: f.gender.trim().to_string(),
            experience: f.experience.trim().to_string(),
            skills: f.skills.trim().to_string(),
            location: f.location.trim().to_string(),
            pincode: f.pincode.trim().to_string(),
            parsed_resume: draft.parsed_resume.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateResponse {
    pub id: String,
    pub status: ApplicationStatus,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantListQuery {
    pub job_title: Option<String>,
}

/// Display projection of an application for dashboard cards.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantView {
    pub id: String,
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone_number: String,
    pub year_of_graduation: String,
    pub gender: String,
    pub experience: String,
    pub location: String,
    pub pincode: String,
    pub skills: String,
    pub resume: String,
    pub status: String,
    pub match_percentage: Option<f64>,
    pub match_label: String,
    pub match_band: MatchBand,
    pub applied_on: Option<String>,
}

impl From<&Application> for ApplicantView {
    fn from(app: &Application) -> Self {
        fn or_na(value: &Option<String>) -> String {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        }

        Self {
            id: app.id.clone(),
            full_name: app.full_name(),
            job_title: or_na(&app.job_title),
            email: or_na(&app.email),
            phone_number: or_na(&app.phone_number),
            year_of_graduation: or_na(&app.year_of_graduation),
            gender: or_na(&app.gender),
            experience: or_na(&app.experience),
            location: or_na(&app.location),
            pincode: or_na(&app.pincode),
            skills: or_na(&app.skills),
            resume: or_na(&app.resume),
            status: app
                .status
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Pending".to_string()),
            match_percentage: app.match_percentage,
            match_label: app
                .match_percentage
                .map(|m| format!("{}%", m))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            match_band: app.match_band(),
            applied_on: app.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingEntry {
    pub id: String,
    pub full_name: String,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub progress_percent: f64,
    pub completed_steps: Vec<ApplicationStatus>,
}

impl From<&Application> for TrackingEntry {
    fn from(app: &Application) -> Self {
        let status = app.pipeline_status();
        Self {
            id: app.id.clone(),
            full_name: app.full_name(),
            job_title: app.job_title.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status,
            progress_percent: status.progress_percent(),
            completed_steps: ApplicationStatus::ALL[..=status.index()].to_vec(),
        }
    }
}

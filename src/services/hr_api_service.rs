use crate::dto::application_dto::ApplicationSubmission;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::interview_dto::{InterviewInvite, ScheduleResponse};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde_json::{json, Value as JsonValue};
use tracing::{error, info};
use url::Url;

/// Operations the portal needs from the HR Desk API, which owns every
/// application record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn list_applications(&self) -> Result<Vec<Application>>;
    async fn submit_application(&self, submission: ApplicationSubmission) -> Result<JsonValue>;
    async fn schedule_interview(&self, invite: InterviewInvite) -> Result<ScheduleResponse>;
    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<()>;
    async fn delete_application(&self, id: &str) -> Result<()>;
    async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse>;
    async fn register(&self, payload: RegisterRequest) -> Result<JsonValue>;
}

#[derive(Clone)]
pub struct HrApiClient {
    client: Client,
    base_url: Url,
}

impl HrApiClient {
    pub fn new(base_url: &str, client: Client) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::Config(format!("Invalid HR_API_BASE_URL {}: {}", base_url, e)))?;
        info!("HR Desk API at {}", base_url);
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Internal(format!("Bad HR API path {}: {}", path, e)))
    }
}

/// Passes successful responses through; turns anything else into
/// `Error::Upstream` carrying the server's own message when it sent one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<JsonValue>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            }
        });
    error!(status = status.as_u16(), %message, "HR API request failed");
    Err(Error::Upstream {
        status: status.as_u16(),
        message,
    })
}

/// Some endpoints answer 2xx with an empty body.
async fn json_or_null(response: Response) -> Result<JsonValue> {
    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(JsonValue::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl HrApi for HrApiClient {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        let url = self.endpoint("api/jobapplications")?;
        let response = self.client.get(url).send().await?;
        let applications = ensure_success(response)
            .await?
            .json::<Vec<Application>>()
            .await?;
        info!("Fetched {} applications", applications.len());
        Ok(applications)
    }

    async fn submit_application(&self, submission: ApplicationSubmission) -> Result<JsonValue> {
        let resume = submission
            .resume
            .ok_or_else(|| Error::BadRequest("Please upload your resume.".into()))?;
        let parsed_resume = serde_json::to_string(&submission.parsed_resume)?;

        let mut resume_part =
            multipart::Part::bytes(resume.bytes.to_vec()).file_name(resume.file_name.clone());
        if !resume.content_type.is_empty() {
            resume_part = resume_part.mime_str(&resume.content_type)?;
        }

        let form = multipart::Form::new()
            .part("resume", resume_part)
            .text("jobId", submission.job_id.to_string())
            .text("jobDescription", submission.job_description)
            .text("firstName", submission.first_name)
            .text("lastName", submission.last_name)
            .text("email", submission.email)
            .text("phoneNumber", submission.phone_number)
            .text("yearOfGraduation", submission.year_of_graduation)
            .text("gender", submission.gender)
            .text("jobTitle", submission.job_title)
            .text("experience", submission.experience)
            .text("skills", submission.skills)
            .text("location", submission.location)
            .text("pincode", submission.pincode)
            .text("parsedResume", parsed_resume);

        let url = self.endpoint("api/jobapplications")?;
        info!(job_id = submission.job_id, resume = %resume.file_name, "Submitting application");
        let response = self.client.post(url).multipart(form).send().await?;
        json_or_null(ensure_success(response).await?).await
    }

    async fn schedule_interview(&self, invite: InterviewInvite) -> Result<ScheduleResponse> {
        let url = self.endpoint("api/schedule")?;
        info!(email = %invite.email, date = %invite.date, "Scheduling interview");
        let response = self.client.post(url).json(&invite).send().await?;
        let body = json_or_null(ensure_success(response).await?).await?;
        Ok(serde_json::from_value(body).unwrap_or_default())
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<()> {
        let url = self.endpoint(&format!("api/jobapplications/{}/status", id))?;
        info!(application_id = id, status = %status, "Updating application status");
        let response = self
            .client
            .patch(url)
            .json(&json!({ "status": status.label() }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_application(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/jobapplications/{}", id))?;
        info!(application_id = id, "Deleting application");
        let response = self.client.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse> {
        let url = self.endpoint("api/auth/login")?;
        let response = self.client.post(url).json(&credentials).send().await?;
        let login = ensure_success(response).await?.json::<LoginResponse>().await?;
        Ok(login)
    }

    async fn register(&self, payload: RegisterRequest) -> Result<JsonValue> {
        let url = self.endpoint("api/auth/register")?;
        let response = self.client.post(url).json(&payload).send().await?;
        json_or_null(ensure_success(response).await?).await
    }
}

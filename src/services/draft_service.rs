use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::application_dto::ApplicationSubmission;
use crate::error::{Error, Result};
use crate::models::draft::{ApplicationDraft, DraftFieldsPatch};
use crate::models::job;
use crate::models::resume::ResumeFile;
use crate::services::hr_api_service::HrApi;
use crate::services::resume_service::ResumeService;
use crate::utils::validation::messages;

/// Application forms in progress. Drafts live in memory until they are
/// submitted or go stale.
#[derive(Clone)]
pub struct DraftService {
    drafts: Arc<RwLock<HashMap<Uuid, ApplicationDraft>>>,
    resume_service: ResumeService,
    hr_api: Arc<dyn HrApi>,
    ttl: Duration,
}

impl DraftService {
    pub fn new(resume_service: ResumeService, hr_api: Arc<dyn HrApi>, ttl_minutes: i64) -> Self {
        Self {
            drafts: Arc::new(RwLock::new(HashMap::new())),
            resume_service,
            hr_api,
            ttl: Duration::minutes(ttl_minutes.max(1)),
        }
    }

    pub async fn create(&self, job_id: i64) -> Result<ApplicationDraft> {
        let job = job::find(job_id)
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", job_id)))?;
        let draft = ApplicationDraft::new(job.id, job.title, job.description);
        info!(draft_id = %draft.id, job_id, "Application draft created");
        self.drafts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }

    pub async fn get(&self, id: Uuid) -> Result<ApplicationDraft> {
        self.drafts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Draft not found".into()))
    }

    async fn with_draft<T>(&self, id: Uuid, f: impl FnOnce(&mut ApplicationDraft) -> T) -> Result<T> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Draft not found".into()))?;
        Ok(f(draft))
    }

    /// Attaches a resume and fills the form from it. The extraction runs
    /// without holding the store lock; if another upload or a cancel lands in
    /// the meantime this result is dropped.
    pub async fn upload_resume(&self, id: Uuid, file: ResumeFile) -> Result<ApplicationDraft> {
        let generation = self.with_draft(id, |d| d.begin_upload(file.clone())).await?;
        info!(draft_id = %id, generation, file = %file.file_name, "Parsing uploaded resume");

        let parsed = self.resume_service.extract(&file).await;

        self.with_draft(id, |d| {
            if !d.apply_parsed(generation, parsed) {
                warn!(draft_id = %id, generation, "Discarding superseded resume parse");
            }
            d.clone()
        })
        .await
    }

    pub async fn cancel_resume(&self, id: Uuid) -> Result<ApplicationDraft> {
        self.with_draft(id, |d| {
            d.cancel_resume();
            d.clone()
        })
        .await
    }

    pub async fn update_fields(&self, id: Uuid, patch: DraftFieldsPatch) -> Result<ApplicationDraft> {
        self.with_draft(id, |d| {
            d.apply_patch(patch);
            d.clone()
        })
        .await
    }

    /// Validates locally, then posts to the HR Desk API. A draft that fails
    /// validation never reaches the network.
    pub async fn submit(&self, id: Uuid) -> Result<JsonValue> {
        let draft = self.get(id).await?;
        let submission = ApplicationSubmission::from(&draft);
        if let Err(errors) = submission.validate() {
            warn!(draft_id = %id, problems = ?messages(&errors), "Application failed validation");
            return Err(Error::Validation(errors));
        }

        let response = self.hr_api.submit_application(submission).await?;
        self.drafts.write().await.remove(&id);
        info!(draft_id = %id, "Application submitted");
        Ok(response)
    }

    pub async fn purge_stale(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| d.updated_at > cutoff);
        let purged = before - drafts.len();
        if purged > 0 {
            info!(purged, "Purged stale application drafts");
        }
        purged
    }
}

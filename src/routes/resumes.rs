use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::models::resume::{ParsedResume, ResumeFile};
use crate::AppState;

const RESUME_FIELD: &str = "resume";

/// Pulls the `resume` file part out of a multipart body. Other parts are
/// ignored.
pub(crate) async fn read_resume_field(multipart: &mut Multipart) -> Result<ResumeFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .inspect_err(|e| error!("Failed to get next field: {}", e))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .inspect_err(|e| error!("Failed to read resume bytes: {}", e))?;
        if bytes.is_empty() {
            return Err(Error::BadRequest("Uploaded resume is empty".into()));
        }
        info!(file = %file_name, size = bytes.len(), "Resume upload received");
        return Ok(ResumeFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(Error::BadRequest("No resume file provided".into()))
}

/// Stateless extraction: returns whatever could be read from the file.
pub async fn parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>> {
    let file = read_resume_field(&mut multipart).await?;
    Ok(Json(state.resume_service.extract(&file).await))
}

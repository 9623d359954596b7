use axum::{extract::Path, Json};

use crate::error::{Error, Result};
use crate::models::job::{self, Job};

pub async fn list_jobs() -> Json<Vec<Job>> {
    Json(job::catalog())
}

pub async fn get_job(Path(id): Path<i64>) -> Result<Json<Job>> {
    job::find(id)
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
}

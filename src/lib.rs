pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use reqwest::Client;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::middleware::rate_limit::{rps_middleware, RateLimiter};
use crate::services::{
    draft_service::DraftService,
    hr_api_service::{HrApi, HrApiClient},
    resume_service::ResumeService,
    scheduling_service::SchedulingService,
    session_service::SessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub hr_api: Arc<dyn HrApi>,
    pub resume_service: ResumeService,
    pub draft_service: DraftService,
    pub scheduling_service: SchedulingService,
    pub session_service: SessionService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let hr_api = HrApiClient::new(&config.hr_api_base_url, http_client.clone())?;
        let resume_service = ResumeService::new(
            config.affinda_api_url.clone(),
            config.affinda_api_key.clone(),
            http_client,
        );
        Ok(Self::from_parts(Arc::new(hr_api), resume_service, config))
    }

    /// Wires the services around an existing HR Desk client.
    pub fn from_parts(hr_api: Arc<dyn HrApi>, resume_service: ResumeService, config: &Config) -> Self {
        let draft_service = DraftService::new(
            resume_service.clone(),
            hr_api.clone(),
            config.draft_ttl_minutes,
        );
        let scheduling_service = SchedulingService::new(hr_api.clone());
        let session_service = SessionService::new(
            hr_api.clone(),
            config.session_secret.clone(),
            config.session_ttl_minutes,
        );

        Self {
            hr_api,
            resume_service,
            draft_service,
            scheduling_service,
            session_service,
        }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let public_api = Router::new()
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .route("/api/resumes/parse", post(routes::resumes::parse_resume))
        .route(
            "/api/applications/drafts",
            post(routes::applications::create_draft),
        )
        .route(
            "/api/applications/drafts/:id",
            get(routes::applications::get_draft).patch(routes::applications::update_draft),
        )
        .route(
            "/api/applications/drafts/:id/resume",
            post(routes::applications::upload_resume).delete(routes::applications::cancel_resume),
        )
        .route(
            "/api/applications/drafts/:id/submit",
            post(routes::applications::submit_draft),
        )
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new("public", config.public_rps),
            rps_middleware,
        ));

    let dashboard_api = Router::new()
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/dashboard/applications",
            get(routes::dashboard::list_applications),
        )
        .route(
            "/api/dashboard/applications/export",
            get(routes::dashboard::export_applications),
        )
        .route(
            "/api/dashboard/applications/:id",
            axum::routing::delete(routes::dashboard::delete_application),
        )
        .route(
            "/api/dashboard/applications/:id/status",
            patch(routes::dashboard::update_status),
        )
        .route("/api/dashboard/job-titles", get(routes::dashboard::job_titles))
        .route("/api/dashboard/analytics", get(routes::dashboard::analytics))
        .route("/api/dashboard/tracking", get(routes::dashboard::tracking))
        .route(
            "/api/dashboard/interviews",
            post(routes::interviews::schedule_interview),
        )
        .route(
            "/api/dashboard/interviews/bulk",
            post(routes::interviews::schedule_bulk),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new("dashboard", config.dashboard_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(dashboard_api)
        .with_state(state)
        .layer(crate::middleware::cors::portal_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_mb.max(1) * 1024 * 1024))
}

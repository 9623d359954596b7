#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use mockall::mock;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

use hr_desk_portal::config::Config;
use hr_desk_portal::dto::application_dto::ApplicationSubmission;
use hr_desk_portal::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use hr_desk_portal::dto::interview_dto::{InterviewInvite, ScheduleResponse};
use hr_desk_portal::error::Result;
use hr_desk_portal::models::application::{Application, ApplicationStatus};
use hr_desk_portal::models::session::SessionUser;
use hr_desk_portal::services::hr_api_service::HrApi;
use hr_desk_portal::services::resume_service::ResumeService;
use hr_desk_portal::{build_router, AppState};

mock! {
    pub HrDesk {}

    #[async_trait]
    impl HrApi for HrDesk {
        async fn list_applications(&self) -> Result<Vec<Application>>;
        async fn submit_application(&self, submission: ApplicationSubmission) -> Result<JsonValue>;
        async fn schedule_interview(&self, invite: InterviewInvite) -> Result<ScheduleResponse>;
        async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<()>;
        async fn delete_application(&self, id: &str) -> Result<()>;
        async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse>;
        async fn register(&self, payload: RegisterRequest) -> Result<JsonValue>;
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        session_secret: "test_secret_key".into(),
        hr_api_base_url: "http://127.0.0.1:9".into(),
        affinda_api_key: None,
        affinda_api_url: "http://127.0.0.1:9/resumes".into(),
        session_ttl_minutes: 60,
        draft_ttl_minutes: 60,
        http_timeout_secs: 5,
        public_rps: 100,
        dashboard_rps: 100,
        max_upload_mb: 2,
    }
}

pub fn app(hr_api: MockHrDesk) -> Router {
    let config = test_config();
    let resume_service = ResumeService::new(
        config.affinda_api_url.clone(),
        None,
        reqwest::Client::new(),
    );
    let state = AppState::from_parts(Arc::new(hr_api), resume_service, &config);
    build_router(state, &config)
}

pub fn expect_hr_login(api: &mut MockHrDesk) {
    api.expect_login().returning(|creds| {
        Ok(LoginResponse {
            token: "upstream-token".into(),
            user: SessionUser {
                id: Some("u1".into()),
                name: "Priya Nair".into(),
                email: creds.email,
                role: Some("hr".into()),
                avatar: None,
            },
        })
    });
}

pub fn applicant(id: &str, job: &str, score: Option<f64>, email: Option<&str>) -> Application {
    Application {
        id: id.into(),
        first_name: Some("Dev".into()),
        last_name: Some(id.to_uppercase()),
        email: email.map(str::to_string),
        job_title: Some(job.into()),
        match_percentage: score,
        ..Default::default()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &JsonValue) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub const BOUNDARY: &str = "portal-test-boundary";

pub fn resume_upload(uri: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn read_json(resp: Response) -> (StatusCode, JsonValue) {
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    // extractor rejections come back as plain text
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

pub async fn login(app: &Router) -> String {
    let body = serde_json::json!({ "email": "priya@example.com", "password": "hunter22" });
    let (status, json) = read_json(send(app, json_request("POST", "/api/auth/login", None, &body)).await).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", json);
    json["token"].as_str().unwrap().to_string()
}

/// Minimal text PDF, one `Tj` line per page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

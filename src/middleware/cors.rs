use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// The portal's browser front end may be served from any origin; it sends
/// bearer tokens, never cookies.
pub fn portal_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_origin(Any)
}

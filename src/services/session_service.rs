use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::error::{Error, Result};
use crate::models::session::{Session, SessionClaims};
use crate::services::hr_api_service::HrApi;
use crate::utils::validation::validate;

/// Holds who is signed in to the portal. A session exists from `login` until
/// `logout` or expiry; tokens for removed sessions stop working immediately.
#[derive(Clone)]
pub struct SessionService {
    hr_api: Arc<dyn HrApi>,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    secret: String,
    ttl: Duration,
}

impl SessionService {
    pub fn new(hr_api: Arc<dyn HrApi>, secret: String, ttl_minutes: i64) -> Self {
        Self {
            hr_api,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            secret,
            ttl: Duration::minutes(ttl_minutes.max(1)),
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<SessionResponse> {
        validate(&credentials)?;
        let email = credentials.email.clone();
        let login = self.hr_api.login(credentials).await.map_err(|e| match e {
            Error::Upstream { status, message } if status == 400 || status == 401 => {
                Error::Unauthorized(message)
            }
            other => other,
        })?;

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            api_token: login.token,
            user: login.user,
            created_at: now,
            expires_at: now + self.ttl,
        };
        let token = self.issue_token(&session)?;

        info!(session_id = %session.id, %email, "Session started");
        let response = SessionResponse {
            token,
            expires_at: session.expires_at,
            user: session.user.clone(),
        };
        self.sessions.write().await.insert(session.id, session);
        Ok(response)
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<JsonValue> {
        validate(&payload)?;
        self.hr_api.register(payload).await
    }

    pub async fn logout(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&session_id).is_some();
        if removed {
            info!(%session_id, "Session ended");
        }
        removed
    }

    /// Resolves a bearer token to its live session.
    pub async fn resolve(&self, token: &str) -> Result<Session> {
        let session_id = self.verify_token(token)?;
        self.current(session_id).await
    }

    pub async fn current(&self, session_id: Uuid) -> Result<Session> {
        let session = self
            .sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| Error::Unauthorized("session_not_found".into()))?;

        if session.is_expired_at(Utc::now()) {
            self.sessions.write().await.remove(&session_id);
            return Err(Error::Unauthorized("session_expired".into()));
        }
        Ok(session)
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, "Purged expired sessions");
        }
        purged
    }

    fn issue_token(&self, session: &Session) -> Result<String> {
        let claims = SessionClaims {
            sub: session.id.to_string(),
            exp: session.expires_at.timestamp().max(0) as usize,
            role: session.user.role.clone(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign session token: {}", e)))
    }

    fn verify_token(&self, token: &str) -> Result<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            warn!(error = %e, "Rejected session token");
            Error::Unauthorized("invalid_token".into())
        })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| Error::Unauthorized("invalid_token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::auth_dto::LoginResponse;
    use crate::models::session::SessionUser;
    use crate::services::hr_api_service::MockHrApi;

    fn api_accepting_login() -> MockHrApi {
        let mut api = MockHrApi::new();
        api.expect_login().returning(|creds| {
            Ok(LoginResponse {
                token: "upstream-token".into(),
                user: SessionUser {
                    name: "Meera".into(),
                    email: creds.email,
                    role: Some("hr".into()),
                    ..Default::default()
                },
            })
        });
        api
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "meera@example.com".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn login_resolve_logout_lifecycle() {
        let service = SessionService::new(Arc::new(api_accepting_login()), "test-secret".into(), 60);
        let started = service.login(credentials()).await.unwrap();

        let session = service.resolve(&started.token).await.unwrap();
        assert_eq!(session.user.name, "Meera");
        assert_eq!(session.api_token, "upstream-token");

        assert!(service.logout(session.id).await);
        assert!(matches!(
            service.resolve(&started.token).await,
            Err(Error::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn tokens_signed_with_another_secret_are_rejected() {
        let issuer = SessionService::new(Arc::new(api_accepting_login()), "one".into(), 60);
        let verifier = SessionService::new(Arc::new(MockHrApi::new()), "two".into(), 60);
        let started = issuer.login(credentials()).await.unwrap();
        assert!(verifier.resolve(&started.token).await.is_err());
    }

    #[tokio::test]
    async fn invalid_credentials_are_unauthorized() {
        let mut api = MockHrApi::new();
        api.expect_login().returning(|_| {
            Err(Error::Upstream {
                status: 401,
                message: "Invalid credentials".into(),
            })
        });
        let service = SessionService::new(Arc::new(api), "s".into(), 60);
        assert!(matches!(
            service.login(credentials()).await,
            Err(Error::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn malformed_email_fails_before_upstream() {
        let mut api = MockHrApi::new();
        api.expect_login().times(0);
        let service = SessionService::new(Arc::new(api), "s".into(), 60);
        let result = service
            .login(LoginRequest {
                email: "not-an-email".into(),
                password: "x".into(),
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}

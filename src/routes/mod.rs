// Route exports
pub mod auth;
pub mod extractors;
pub mod health;
pub mod matches;
pub mod mentees;
pub mod mentors;
pub mod surveys;

use crate::config::MatchingSettings;
use crate::core::{Matcher, ScoringError};
use crate::models::{ErrorResponse, Mentee, Mentor, Role};
use crate::services::{AuthError, PostgresClient, PostgresError, RankingCache, RankingScope, TokenService};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use std::sync::Arc;
use thiserror::Error;

pub use extractors::AuthenticatedUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// Absent when Redis was unreachable at startup
    pub cache: Option<Arc<RankingCache>>,
    pub tokens: Arc<TokenService>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Drop cached rankings in `scope`; failures only degrade freshness
    pub async fn invalidate_rankings(&self, scope: RankingScope) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate(scope).await {
                tracing::warn!("Failed to invalidate cached rankings {:?}: {}", scope, e);
            }
        }
    }

    /// Load the profile belonging to the caller's role
    pub async fn caller_profile(&self, auth: &AuthenticatedUser) -> Result<CallerProfile, ApiError> {
        match auth.role {
            Role::Mentor => self
                .postgres
                .get_mentor_by_user(auth.user_id)
                .await?
                .map(CallerProfile::Mentor)
                .ok_or_else(|| ApiError::NotFound("Mentor profile not found".to_string())),
            Role::Mentee => self
                .postgres
                .get_mentee_by_user(auth.user_id)
                .await?
                .map(CallerProfile::Mentee)
                .ok_or_else(|| ApiError::NotFound("Mentee profile not found".to_string())),
        }
    }
}

/// The caller's own mentor or mentee profile
#[derive(Debug, Clone)]
pub enum CallerProfile {
    Mentor(Mentor),
    Mentee(Mentee),
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(auth::configure)
            .configure(mentors::configure)
            .configure(mentees::configure)
            .configure(matches::configure)
            .configure(surveys::configure),
    );
}

/// Error returned by every handler, rendered as an `ErrorResponse` body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidJson(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::InvalidInput(_)
            | ApiError::InvalidJson(_)
            | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidInput(msg) => ApiError::InvalidInput(msg),
        }
    }
}

impl From<PostgresError> for ApiError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::NotFound(msg) => ApiError::NotFound(msg),
            PostgresError::Conflict(msg) => ApiError::Conflict(msg),
            PostgresError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(msg) => {
                tracing::error!("Password hashing failed: {}", msg);
                ApiError::Internal("Could not process credentials".to_string())
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Validation failed: {}", errors))
    }
}

impl From<error::BlockingError> for ApiError {
    fn from(err: error::BlockingError) -> Self {
        tracing::error!("Blocking task failed: {}", err);
        ApiError::Internal("Worker pool unavailable".to_string())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidQuery(format!("Invalid query: {}", err)).into()
}

use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{MenteeProfileRequest, MenteeResponse, Role};
use crate::routes::{ApiError, AppState, AuthenticatedUser};
use crate::services::RankingScope;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/mentees/profile", web::post().to(upsert_profile))
        .route("/mentees/profile", web::get().to(get_own_profile));
}

/// Create or partially update the caller's mentee profile
///
/// POST /api/v1/mentees/profile
async fn upsert_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<MenteeProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(Role::Mentee)?;
    req.validate()?;

    let mentee = state.postgres.upsert_mentee_profile(auth.user_id, &req).await?;
    state.invalidate_rankings(RankingScope::Mentee(mentee.id)).await;

    tracing::info!("Saved mentee profile {} for user {}", mentee.id, auth.user_id);
    Ok(HttpResponse::Ok().json(MenteeResponse { mentee }))
}

/// GET /api/v1/mentees/profile
async fn get_own_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let mentee = state
        .postgres
        .get_mentee_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentee profile not found".to_string()))?;

    Ok(HttpResponse::Ok().json(MenteeResponse { mentee }))
}

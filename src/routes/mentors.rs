use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{
    AvailabilityRequest, AvailabilityStatus, MentorListResponse, MentorProfileRequest,
    MentorResponse, Role,
};
use crate::routes::{ApiError, AppState, AuthenticatedUser};
use crate::services::RankingScope;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Static segments first so "profile" is never taken for an id
    cfg
        .route("/mentors", web::get().to(list_mentors))
        .route("/mentors/profile", web::post().to(upsert_profile))
        .route("/mentors/profile", web::get().to(get_own_profile))
        .route("/mentors/availability", web::put().to(update_availability))
        .route("/mentors/{mentor_id}", web::get().to(get_mentor));
}

/// List mentors currently accepting matches
///
/// GET /api/v1/mentors
async fn list_mentors(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let mentors = state.postgres.list_available_mentors().await?;
    tracing::debug!("Listing {} available mentors", mentors.len());

    Ok(HttpResponse::Ok().json(MentorListResponse { mentors }))
}

/// GET /api/v1/mentors/{mentor_id}
async fn get_mentor(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let mentor_id = path.into_inner();
    let mentor = state
        .postgres
        .get_mentor(mentor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mentor {} not found", mentor_id)))?;

    Ok(HttpResponse::Ok().json(MentorResponse { mentor }))
}

/// Create or partially update the caller's mentor profile
///
/// POST /api/v1/mentors/profile
async fn upsert_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<MentorProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(Role::Mentor)?;
    req.validate()?;

    let mentor = state.postgres.upsert_mentor_profile(auth.user_id, &req).await?;

    // Any mentee's ranking may include this mentor
    state.invalidate_rankings(RankingScope::All).await;

    tracing::info!("Saved mentor profile {} for user {}", mentor.id, auth.user_id);
    Ok(HttpResponse::Ok().json(MentorResponse { mentor }))
}

/// GET /api/v1/mentors/profile
async fn get_own_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let mentor = state
        .postgres
        .get_mentor_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentor profile not found".to_string()))?;

    Ok(HttpResponse::Ok().json(MentorResponse { mentor }))
}

/// PUT /api/v1/mentors/availability
async fn update_availability(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(Role::Mentor)?;

    let status: AvailabilityStatus = req.status.parse().map_err(ApiError::BadRequest)?;
    let mentor = state.postgres.update_availability(auth.user_id, status).await?;

    state.invalidate_rankings(RankingScope::All).await;

    tracing::info!("Mentor {} availability set to {:?}", mentor.id, status);
    Ok(HttpResponse::Ok().json(MentorResponse { mentor }))
}

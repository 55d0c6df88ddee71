use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{SurveyAnswerRequest, SurveyResponseList};
use crate::routes::{ApiError, AppState, AuthenticatedUser, CallerProfile};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/surveys", web::post().to(submit_answer))
        .route("/surveys/mine", web::get().to(list_own_answers));
}

fn owner_ids(profile: &CallerProfile) -> (Option<i64>, Option<i64>) {
    match profile {
        CallerProfile::Mentor(mentor) => (Some(mentor.id), None),
        CallerProfile::Mentee(mentee) => (None, Some(mentee.id)),
    }
}

/// Store one survey answer against the caller's profile
///
/// POST /api/v1/surveys
async fn submit_answer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<SurveyAnswerRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (mentor_id, mentee_id) = owner_ids(&state.caller_profile(&auth).await?);
    let response = state
        .postgres
        .insert_survey_response(mentor_id, mentee_id, &req.question_id, &req.response_data)
        .await?;

    tracing::debug!("Stored survey answer {} for user {}", req.question_id, auth.user_id);
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/surveys/mine
async fn list_own_answers(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let (mentor_id, mentee_id) = owner_ids(&state.caller_profile(&auth).await?);
    let responses = state.postgres.list_survey_responses(mentor_id, mentee_id).await?;

    Ok(HttpResponse::Ok().json(SurveyResponseList { responses }))
}

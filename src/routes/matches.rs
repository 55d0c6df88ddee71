use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::models::{
    CompatibilityResponse, FindForMenteeQuery, FindMatchesRequest, FindMatchesResponse, Match,
    MatchListResponse, MatchResponse, MatchStatus, MatchStatusRequest, Mentee, MenteeProfile,
    Mentor, MentorProfile, PairRequest, Role, ScoreProfilesRequest,
};
use crate::core::ScoringError;
use crate::routes::{ApiError, AppState, AuthenticatedUser, CallerProfile};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/find-for-mentee/{mentee_id}", web::get().to(find_for_mentee))
        .route("/matches/calculate", web::post().to(calculate_compatibility))
        .route("/matches/score", web::post().to(score_profiles))
        .route("/matches/my-matches", web::get().to(my_matches))
        .route("/matches", web::post().to(create_match))
        .route("/matches/{match_id}/status", web::put().to(update_match_status));
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "limit": 10,
///   "exclude_mentor_ids": [3, 7]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(Role::Mentee)?;

    let mentee = state
        .postgres
        .get_mentee_by_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentee profile not found".to_string()))?;

    let limit = resolve_limit(req.limit, &state.matching);
    tracing::info!("Finding matches for mentee {}, limit: {}", mentee.id, limit);

    let response = rank_for_mentee(&state, &mentee, &req.exclude_mentor_ids, limit).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Rank mentors on behalf of a mentee id
///
/// GET /api/v1/matches/find-for-mentee/{mentee_id}?limit=10
async fn find_for_mentee(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<FindForMenteeQuery>,
) -> Result<HttpResponse, ApiError> {
    let mentee_id = path.into_inner();
    let mentee = state
        .postgres
        .get_mentee(mentee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mentee {} not found", mentee_id)))?;

    let limit = resolve_limit(query.limit, &state.matching);
    tracing::info!("Finding matches for mentee {}, limit: {}", mentee_id, limit);

    let mut response = rank_for_mentee(&state, &mentee, &[], limit).await?;
    response.mentee = Some(mentee);
    Ok(HttpResponse::Ok().json(response))
}

/// Full compatibility for a stored pair
///
/// POST /api/v1/matches/calculate
async fn calculate_compatibility(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (mentee, mentor) = load_pair(&state, &req).await?;
    let compatibility = state
        .matcher
        .score_pair(&MenteeProfile::from(&mentee), &MentorProfile::from(&mentor));

    Ok(HttpResponse::Ok().json(CompatibilityResponse {
        mentee: Some(mentee),
        mentor: Some(mentor),
        compatibility,
    }))
}

/// Score two profiles supplied inline, without touching storage
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "mentee": {
///     "careers_interested_in": ["Software Engineering"],
///     "concentrations_interested_in": ["Systems"],
///     "technical_courses_taken": ["CS 3110"]
///   },
///   "mentor": {
///     "professional_experiences": ["Software Engineering"],
///     "info_concentration": "Systems",
///     "technical_courses": ["CS 3110", "CS 4410"]
///   }
/// }
/// ```
async fn score_profiles(
    state: web::Data<AppState>,
    req: web::Json<ScoreProfilesRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    let mentee_input = req
        .mentee
        .ok_or_else(|| ScoringError::InvalidInput("mentee profile is required".to_string()))?;
    let mentor_input = req
        .mentor
        .ok_or_else(|| ScoringError::InvalidInput("mentor profile is required".to_string()))?;

    let mentee = MenteeProfile::try_from(mentee_input)?;
    let mentor = MentorProfile::try_from(mentor_input)?;

    let compatibility = state.matcher.score_pair(&mentee, &mentor);
    tracing::debug!("Scored ad-hoc profiles: {:.2}", compatibility.score);

    Ok(HttpResponse::Ok().json(CompatibilityResponse {
        mentee: None,
        mentor: None,
        compatibility,
    }))
}

/// Persist a pending match with its computed score
///
/// POST /api/v1/matches
async fn create_match(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    req: web::Json<PairRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (mentee, mentor) = load_pair(&state, &req).await?;
    let compatibility = state
        .matcher
        .score_pair(&MenteeProfile::from(&mentee), &MentorProfile::from(&mentor));

    let record = state
        .postgres
        .create_match(mentor.id, mentee.id, compatibility.score)
        .await?;

    Ok(HttpResponse::Created().json(MatchResponse {
        message: "Match created successfully".to_string(),
        match_record: record,
    }))
}

/// GET /api/v1/matches/my-matches
async fn my_matches(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let matches = match state.caller_profile(&auth).await? {
        CallerProfile::Mentor(mentor) => state.postgres.list_matches_for_mentor(mentor.id).await?,
        CallerProfile::Mentee(mentee) => state.postgres.list_matches_for_mentee(mentee.id).await?,
    };

    Ok(HttpResponse::Ok().json(MatchListResponse { matches }))
}

/// Move a match through its lifecycle
///
/// PUT /api/v1/matches/{match_id}/status
async fn update_match_status(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    req: web::Json<MatchStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    let status: MatchStatus = req.status.parse().map_err(ApiError::BadRequest)?;

    let existing = state
        .postgres
        .get_match(match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Match {} not found", match_id)))?;

    let caller = state.caller_profile(&auth).await?;
    if !is_participant(&caller, &existing) {
        return Err(ApiError::Forbidden("Not a participant in this match".to_string()));
    }

    let record = state
        .postgres
        .update_match_status(match_id, status, req.meeting_date)
        .await?;

    tracing::info!("Match {} moved to {:?}", match_id, status);
    Ok(HttpResponse::Ok().json(MatchResponse {
        message: "Match status updated".to_string(),
        match_record: record,
    }))
}

/// Requested limit, falling back to the default and capped by the maximum
fn resolve_limit(requested: Option<u16>, settings: &MatchingSettings) -> usize {
    requested
        .unwrap_or(settings.default_limit)
        .clamp(1, settings.max_limit.max(1)) as usize
}

fn is_participant(caller: &CallerProfile, record: &Match) -> bool {
    match caller {
        CallerProfile::Mentor(mentor) => record.mentor_id == mentor.id,
        CallerProfile::Mentee(mentee) => record.mentee_id == mentee.id,
    }
}

async fn load_pair(state: &AppState, req: &PairRequest) -> Result<(Mentee, Mentor), ApiError> {
    let mentee = state
        .postgres
        .get_mentee(req.mentee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mentee {} not found", req.mentee_id)))?;
    let mentor = state
        .postgres
        .get_mentor(req.mentor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Mentor {} not found", req.mentor_id)))?;

    Ok((mentee, mentor))
}

/// Rank available mentors for `mentee`, reading and filling the cache when
/// the caller supplied no exclusions
async fn rank_for_mentee(
    state: &AppState,
    mentee: &Mentee,
    exclude_mentor_ids: &[i64],
    limit: usize,
) -> Result<FindMatchesResponse, ApiError> {
    let cache = state.cache.as_ref().filter(|_| exclude_mentor_ids.is_empty());

    // The generation is observed before candidates load, so a profile change
    // racing with this request retires whatever is stored below
    let generation = match cache {
        Some(cache) => match cache.generation(mentee.id).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                tracing::warn!("Cache generation read failed for mentee {}: {}", mentee.id, e);
                None
            }
        },
        None => None,
    };
    let cache = cache.zip(generation);

    if let Some((cache, generation)) = cache {
        match cache.get(mentee.id, generation, limit).await {
            Ok(Some(cached)) => {
                tracing::debug!("Serving cached ranking for mentee {}", mentee.id);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read failed for mentee {}: {}", mentee.id, e),
        }
    }

    let candidates = state.postgres.list_available_mentors().await?;
    tracing::debug!("Found {} candidates for mentee {}", candidates.len(), mentee.id);

    let result = state.matcher.rank_mentors(
        &MenteeProfile::from(mentee),
        candidates,
        exclude_mentor_ids,
        limit,
    );

    let response = FindMatchesResponse {
        mentee: None,
        matches: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} matches for mentee {} (from {} candidates)",
        response.matches.len(),
        mentee.id,
        response.total_candidates
    );

    if let Some((cache, generation)) = cache {
        if let Err(e) = cache.put(mentee.id, generation, limit, &response).await {
            tracing::warn!("Failed to cache ranking for mentee {}: {}", mentee.id, e);
        }
    }

    Ok(response)
}

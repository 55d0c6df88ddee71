use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{
    AccessTokenResponse, AuthResponse, LoginRequest, RefreshRequest, RegisterMenteeRequest,
    RegisterMentorRequest, RegisterRequest, RegistrationResponse, User, UserResponse,
};
use crate::routes::{ApiError, AppState, AuthenticatedUser};
use crate::services::{hash_password, verify_password, AuthError, RankingScope, TokenKind};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/auth/register", web::post().to(register))
        .route("/auth/register-mentee", web::post().to(register_mentee))
        .route("/auth/register-mentor", web::post().to(register_mentor))
        .route("/auth/login", web::post().to(login))
        .route("/auth/refresh", web::post().to(refresh))
        .route("/auth/me", web::get().to(me));
}

/// Register endpoint
///
/// POST /api/v1/auth/register
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    let password_hash = hash_off_thread(&req.account.password).await?;

    let user = state
        .postgres
        .create_user(&req.account, req.role, &password_hash)
        .await?;

    let response = issue_tokens(&state, user, "User registered successfully")?;
    Ok(HttpResponse::Created().json(response))
}

/// Create a mentee account together with its profile
///
/// POST /api/v1/auth/register-mentee
async fn register_mentee(
    state: web::Data<AppState>,
    req: web::Json<RegisterMenteeRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    require_graduating_year(req.profile.graduating_year)?;
    let req = req.into_inner();

    let password_hash = hash_off_thread(&req.account.password).await?;
    let (user, mentee) = state
        .postgres
        .register_mentee(&req.account, &password_hash, &req.profile)
        .await?;

    state.invalidate_rankings(RankingScope::Mentee(mentee.id)).await;

    let response = issue_registration(&state, user, mentee.id, "Mentee registered successfully")?;
    Ok(HttpResponse::Created().json(response))
}

/// Create a mentor account together with its profile
///
/// POST /api/v1/auth/register-mentor
async fn register_mentor(
    state: web::Data<AppState>,
    req: web::Json<RegisterMentorRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    require_graduating_year(req.profile.graduating_year)?;
    let req = req.into_inner();

    let password_hash = hash_off_thread(&req.account.password).await?;
    let (user, mentor) = state
        .postgres
        .register_mentor(&req.account, &password_hash, &req.profile)
        .await?;

    // A new mentor can enter any mentee's ranking
    state.invalidate_rankings(RankingScope::All).await;

    let response = issue_registration(&state, user, mentor.id, "Mentor registered successfully")?;
    Ok(HttpResponse::Created().json(response))
}

/// Login endpoint
///
/// POST /api/v1/auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    let user = state
        .postgres
        .find_user_by_net_id(&req.net_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let stored_hash = user.password_hash.clone();
    let valid = web::block(move || verify_password(&req.password, &stored_hash)).await?;
    if !valid {
        tracing::info!("Rejected login for {}", user.net_id);
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!("User {} logged in", user.id);
    let response = issue_tokens(&state, user, "Login successful")?;
    Ok(HttpResponse::Ok().json(response))
}

/// Exchange a refresh token for a new access token
///
/// POST /api/v1/auth/refresh
async fn refresh(
    state: web::Data<AppState>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let claims = state.tokens.validate(&req.refresh_token, TokenKind::Refresh)?;
    let user = state
        .postgres
        .get_user(claims.user_id()?)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = state.tokens.issue_access_token(user.id, user.role)?;
    Ok(HttpResponse::Ok().json(AccessTokenResponse { access_token }))
}

/// Current user endpoint
///
/// GET /api/v1/auth/me
async fn me(state: web::Data<AppState>, auth: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    let user = state
        .postgres
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

// Argon2 is CPU-bound; keep it off the async workers
async fn hash_off_thread(password: &str) -> Result<String, ApiError> {
    let password = password.to_string();
    Ok(web::block(move || hash_password(&password)).await??)
}

fn require_graduating_year(year: Option<i32>) -> Result<i32, ApiError> {
    year.ok_or_else(|| ApiError::BadRequest("graduating_year is required".to_string()))
}

fn issue_registration(
    state: &AppState,
    user: User,
    profile_id: i64,
    message: &str,
) -> Result<RegistrationResponse, ApiError> {
    let access_token = state.tokens.issue_access_token(user.id, user.role)?;
    let refresh_token = state.tokens.issue_refresh_token(user.id, user.role)?;

    Ok(RegistrationResponse {
        message: message.to_string(),
        user,
        profile_id,
        access_token,
        refresh_token,
    })
}

fn issue_tokens(state: &AppState, user: User, message: &str) -> Result<AuthResponse, ApiError> {
    let access_token = state.tokens.issue_access_token(user.id, user.role)?;
    let refresh_token = state.tokens.issue_refresh_token(user.id, user.role)?;

    Ok(AuthResponse {
        message: message.to_string(),
        user,
        access_token,
        refresh_token,
    })
}

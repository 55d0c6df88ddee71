use crate::models::domain::{AvailabilityStatus, Role};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Credentials and identity shared by every registration route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountRequest {
    #[validate(length(min = 1, max = 20))]
    pub net_id: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: AccountRequest,
    pub role: Role,
}

/// Create a mentee account and its profile in one call.
///
/// `graduating_year` is required here even though the profile type allows
/// partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterMenteeRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: AccountRequest,
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: MenteeProfileRequest,
}

/// Create a mentor account and its profile in one call
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterMentorRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: AccountRequest,
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: MentorProfileRequest,
}

/// Request to exchange credentials for tokens
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub net_id: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to mint a new access token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Create or partially update the caller's mentor profile.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MentorProfileRequest {
    #[validate(range(min = 1900, max = 2200))]
    pub graduating_year: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub info_concentration: Option<String>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub preferred_communication: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub advising_topics: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub professional_experiences: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub technical_courses: Option<Vec<String>>,
    #[validate(length(max = 100))]
    pub career_pursuing: Option<String>,
    pub bio: Option<String>,
    #[validate(url)]
    pub calendly_link: Option<String>,
    pub availability_status: Option<AvailabilityStatus>,
}

/// Create or partially update the caller's mentee profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenteeProfileRequest {
    #[validate(range(min = 1900, max = 2200))]
    pub graduating_year: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub info_concentration: Option<String>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub preferred_communication: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub advising_needs: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub careers_interested_in: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub concentrations_interested_in: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub technical_courses_taken: Option<Vec<String>>,
    #[validate(custom(function = "no_blank_tokens"))]
    pub field_interests: Option<Vec<String>>,
    pub bio: Option<String>,
}

/// Request to change mentor availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub status: String,
}

/// Request to rank mentors for the calling mentee
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindMatchesRequest {
    pub limit: Option<u16>,
    #[serde(default)]
    pub exclude_mentor_ids: Vec<i64>,
}

/// Query for ranking mentors on behalf of a mentee id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindForMenteeQuery {
    pub limit: Option<u16>,
}

/// Identifies a (mentee, mentor) pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairRequest {
    #[validate(range(min = 1))]
    pub mentee_id: i64,
    #[validate(range(min = 1))]
    pub mentor_id: i64,
}

/// Mentee scoring fields as submitted by a client.
///
/// Every list is required; an empty list is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenteeProfileInput {
    pub careers_interested_in: Option<Vec<String>>,
    pub concentrations_interested_in: Option<Vec<String>>,
    pub technical_courses_taken: Option<Vec<String>>,
}

/// Mentor scoring fields as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentorProfileInput {
    pub professional_experiences: Option<Vec<String>>,
    pub info_concentration: Option<String>,
    pub technical_courses: Option<Vec<String>>,
}

/// Score two ad-hoc profiles without touching storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreProfilesRequest {
    pub mentee: Option<MenteeProfileInput>,
    pub mentor: Option<MentorProfileInput>,
}

/// Request to move a match through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatusRequest {
    pub status: String,
    pub meeting_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// One survey answer from the caller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurveyAnswerRequest {
    #[validate(length(min = 1, max = 50))]
    pub question_id: String,
    pub response_data: serde_json::Value,
}

fn no_blank_tokens(values: &Vec<String>) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_token"));
    }
    Ok(())
}

use serde::{Deserialize, Serialize};
use crate::models::domain::{
    CompatibilityScore, Match, Mentee, Mentor, ScoredMentor, SurveyResponse, User,
};

/// Response carrying freshly issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for the combined account and profile registration routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub user: User,
    pub profile_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for token refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Response wrapping one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorResponse {
    pub mentor: Mentor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorListResponse {
    pub mentors: Vec<Mentor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenteeResponse {
    pub mentee: Mentee,
}

/// Response for find matches endpoints
///
/// `mentee` is only filled in by `find-for-mentee`; cached rankings are
/// stored without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentee: Option<Mentee>,
    pub matches: Vec<ScoredMentor>,
    pub total_candidates: usize,
}

/// Response for scoring a single pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentee: Option<Mentee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor: Option<Mentor>,
    pub compatibility: CompatibilityScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub message: String,
    #[serde(rename = "match")]
    pub match_record: Match,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponseList {
    pub responses: Vec<SurveyResponse>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mentee() -> Mentee {
        Mentee {
            id: 4,
            user_id: 9,
            name: "Ada".to_string(),
            email: "ada@example.edu".to_string(),
            graduating_year: 2027,
            info_concentration: Some("Systems".to_string()),
            preferred_communication: vec![],
            advising_needs: vec![],
            careers_interested_in: vec!["Software Engineering".to_string()],
            concentrations_interested_in: vec!["Systems".to_string()],
            technical_courses_taken: vec![],
            field_interests: vec![],
            bio: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_find_matches_response_includes_mentee_only_when_set() {
        let mut response = FindMatchesResponse {
            mentee: None,
            matches: vec![],
            total_candidates: 2,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("mentee").is_none());
        assert_eq!(json["total_candidates"], 2);

        response.mentee = Some(mentee());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["mentee"]["id"], 4);
        assert_eq!(json["mentee"]["info_concentration"], "Systems");
    }

    #[test]
    fn test_cached_ranking_without_mentee_decodes() {
        let decoded: FindMatchesResponse =
            serde_json::from_str(r#"{"matches": [], "total_candidates": 0}"#).unwrap();
        assert!(decoded.mentee.is_none());
    }
}

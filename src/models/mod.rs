// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilityStatus, CompatibilityScore, Match, MatchQuality, MatchStatus, Mentee, MenteeProfile,
    Mentor, MentorProfile, Role, ScoreBreakdown, ScoredMentor, ScoringWeights, SurveyResponse, User,
};
pub use requests::{
    AccountRequest, AvailabilityRequest, FindForMenteeQuery, FindMatchesRequest, LoginRequest, MatchStatusRequest,
    MenteeProfileInput, MenteeProfileRequest, MentorProfileInput, MentorProfileRequest, PairRequest,
    RefreshRequest, RegisterMenteeRequest, RegisterMentorRequest, RegisterRequest,
    ScoreProfilesRequest, SurveyAnswerRequest,
};
pub use responses::{
    AccessTokenResponse, AuthResponse, CompatibilityResponse, ErrorResponse, FindMatchesResponse,
    HealthResponse, MatchListResponse, MatchResponse, MenteeResponse, MentorListResponse,
    MentorResponse, RegistrationResponse, SurveyResponseList, UserResponse,
};

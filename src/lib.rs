//! PathMatch - mentor/mentee matching service
//!
//! This library provides the compatibility scorer that pairs mentees with
//! mentors from their survey answers, the ranking pipeline built on it, and
//! the actix-web service that exposes both over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_compatibility, score, Matcher, ScoringError};
pub use models::{
    CompatibilityScore, FindMatchesResponse, MenteeProfile, MentorProfile, ScoredMentor,
    ScoringWeights,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let mentee = MenteeProfile::new(["Product Management"], ["HCI"], ["INFO 2450"]);
        let mentor = MentorProfile::new(["Product Management"], Some("HCI"), ["INFO 2450"]);
        assert_eq!(score(&mentee, &mentor), 100.0);
    }
}

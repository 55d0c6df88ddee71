use crate::core::similarity::{jaccard_similarity, overlap_fraction, shared_tokens};
use crate::models::{CompatibilityScore, MatchQuality, MenteeProfile, MentorProfile, ScoreBreakdown, ScoringWeights};
use thiserror::Error;

/// Errors raised while preparing scoring input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Score a mentee against a mentor with the default 40/30/30 weights.
///
/// Always returns a value in [0, 100].
pub fn score(mentee: &MenteeProfile, mentor: &MentorProfile) -> f64 {
    calculate_compatibility(mentee, mentor, &ScoringWeights::default()).score
}

/// Calculate a compatibility score (0-100) for a mentor based on a mentee's interests
///
/// Scoring formula:
/// score = clamp(
///     career_overlap * 40 +        # |interests ∩ experiences| / |interests|
///     concentration_match * 30 +   # mentor concentration in mentee's interests
///     course_jaccard * 30          # |courses ∩| / |courses ∪|
/// , 0, 100)
pub fn calculate_compatibility(
    mentee: &MenteeProfile,
    mentor: &MentorProfile,
    weights: &ScoringWeights,
) -> CompatibilityScore {
    let breakdown = ScoreBreakdown {
        career: career_score(mentee, mentor, weights.career),
        concentration: concentration_score(mentee, mentor, weights.concentration),
        courses: course_score(mentee, mentor, weights.courses),
    };

    // Clamp regardless of the configured weights
    let score = breakdown.total().clamp(0.0, 100.0);

    CompatibilityScore {
        score,
        quality: MatchQuality::from_score(score),
        breakdown,
        reasons: match_reasons(mentee, mentor),
    }
}

/// Career alignment: share of the mentee's career interests the mentor has experience in
#[inline]
fn career_score(mentee: &MenteeProfile, mentor: &MentorProfile, weight: f64) -> f64 {
    overlap_fraction(&mentee.careers_interested_in, &mentor.professional_experiences) * weight
}

/// Concentration alignment: all or nothing
#[inline]
fn concentration_score(mentee: &MenteeProfile, mentor: &MentorProfile, weight: f64) -> f64 {
    match &mentor.info_concentration {
        Some(concentration) if mentee.concentrations_interested_in.contains(concentration) => weight,
        _ => 0.0,
    }
}

/// Course overlap via Jaccard similarity; two empty course lists contribute nothing
#[inline]
fn course_score(mentee: &MenteeProfile, mentor: &MentorProfile, weight: f64) -> f64 {
    jaccard_similarity(&mentee.technical_courses_taken, &mentor.technical_courses) * weight
}

fn match_reasons(mentee: &MenteeProfile, mentor: &MentorProfile) -> Vec<String> {
    let mut reasons = Vec::new();

    let careers = shared_tokens(&mentee.careers_interested_in, &mentor.professional_experiences);
    if !careers.is_empty() {
        reasons.push(format!("Experience in: {}", careers.join(", ")));
    }

    if let Some(concentration) = &mentor.info_concentration {
        if mentee.concentrations_interested_in.contains(concentration) {
            reasons.push(format!("Same concentration: {}", concentration));
        }
    }

    let courses = shared_tokens(&mentee.technical_courses_taken, &mentor.technical_courses);
    if !courses.is_empty() {
        reasons.push(format!("Shared courses: {}", courses.join(", ")));
    }

    if reasons.is_empty() {
        reasons.push("General mentorship available".to_string());
    }

    reasons
}

use crate::core::{filters::is_candidate, scoring::calculate_compatibility};
use crate::models::{CompatibilityScore, MenteeProfile, Mentor, MentorProfile, ScoredMentor, ScoringWeights};

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMentor>,
    pub total_candidates: usize,
}

/// Ranks mentor candidates for a mentee
///
/// # Pipeline Stages
/// 1. Eligibility filtering (availability, caller exclusions)
/// 2. Scoring of every remaining (mentee, mentor) pair
/// 3. Ordering by score, then mentor id
/// 4. Truncation to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single mentee/mentor pair with this matcher's weights
    pub fn score_pair(&self, mentee: &MenteeProfile, mentor: &MentorProfile) -> CompatibilityScore {
        calculate_compatibility(mentee, mentor, &self.weights)
    }

    /// Rank mentors for a mentee
    ///
    /// # Arguments
    /// * `mentee` - The mentee's scoring profile
    /// * `candidates` - Mentor records loaded from storage
    /// * `exclude_mentor_ids` - Mentors the caller does not want to see
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// MatchResult with matches sorted by descending score. Equal scores are
    /// ordered by ascending mentor id so repeated calls agree.
    pub fn rank_mentors(
        &self,
        mentee: &MenteeProfile,
        candidates: Vec<Mentor>,
        exclude_mentor_ids: &[i64],
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut scored: Vec<ScoredMentor> = candidates
            .into_iter()
            // Stage 1: Eligibility
            .filter(|mentor| is_candidate(mentor, exclude_mentor_ids))
            // Stage 2: Scoring
            .map(|mentor| {
                let result = self.score_pair(mentee, &MentorProfile::from(&mentor));

                ScoredMentor {
                    mentor,
                    compatibility_score: result.score,
                    quality: result.quality,
                    breakdown: result.breakdown,
                    reasons: result.reasons,
                }
            })
            .collect();

        // Stage 3: Sort by score (descending) and then by mentor id (ascending)
        scored.sort_by(|a, b| {
            b.compatibility_score
                .total_cmp(&a.compatibility_score)
                .then_with(|| a.mentor.id.cmp(&b.mentor.id))
        });

        // Stage 4: Limit results
        scored.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} mentor candidates (limit {})",
            scored.len(),
            total_candidates,
            limit
        );

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AvailabilityStatus;
    use chrono::Utc;

    fn create_candidate(
        id: i64,
        experiences: &[&str],
        concentration: &str,
        courses: &[&str],
        status: AvailabilityStatus,
    ) -> Mentor {
        Mentor {
            id,
            user_id: id + 1000,
            name: format!("Mentor {}", id),
            email: format!("mentor{}@cornell.edu", id),
            graduating_year: 2025,
            info_concentration: Some(concentration.to_string()),
            preferred_communication: vec!["zoom".to_string()],
            advising_topics: vec![],
            professional_experiences: experiences.iter().map(|s| s.to_string()).collect(),
            technical_courses: courses.iter().map(|s| s.to_string()).collect(),
            career_pursuing: None,
            bio: None,
            calendly_link: None,
            availability_status: status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_mentee() -> MenteeProfile {
        MenteeProfile::new(
            ["Software Engineering"],
            ["Data Science"],
            ["CS2110", "INFO2950"],
        )
    }

    #[test]
    fn test_rank_mentors_basic() {
        let matcher = Matcher::with_default_weights();

        let candidates = vec![
            create_candidate(1, &["Research"], "Behavioral Science", &[], AvailabilityStatus::Available),
            create_candidate(2, &["Software Engineering"], "Data Science", &["CS2110"], AvailabilityStatus::Available),
            create_candidate(3, &["Software Engineering"], "Data Science", &["CS2110", "INFO2950"], AvailabilityStatus::Dnd),
        ];

        let result = matcher.rank_mentors(&create_mentee(), candidates, &[], 10);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].mentor.id, 2);
        assert_eq!(result.matches[1].mentor.id, 1);
    }

    #[test]
    fn test_ties_broken_by_mentor_id() {
        let matcher = Matcher::with_default_weights();

        let candidates = vec![
            create_candidate(9, &["Software Engineering"], "Data Science", &[], AvailabilityStatus::Available),
            create_candidate(4, &["Software Engineering"], "Data Science", &[], AvailabilityStatus::Available),
            create_candidate(6, &["Software Engineering"], "Data Science", &[], AvailabilityStatus::Available),
        ];

        let result = matcher.rank_mentors(&create_mentee(), candidates, &[], 10);
        let ids: Vec<i64> = result.matches.iter().map(|m| m.mentor.id).collect();

        assert_eq!(ids, vec![4, 6, 9]);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();

        let candidates: Vec<Mentor> = (1..=20)
            .map(|i| create_candidate(i, &["Software Engineering"], "Data Science", &[], AvailabilityStatus::Available))
            .collect();

        let result = matcher.rank_mentors(&create_mentee(), candidates, &[], 5);

        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.total_candidates, 20);
    }

    #[test]
    fn test_excluded_mentors_skipped() {
        let matcher = Matcher::with_default_weights();

        let candidates = vec![
            create_candidate(1, &["Software Engineering"], "Data Science", &[], AvailabilityStatus::Available),
            create_candidate(2, &[], "Data Science", &[], AvailabilityStatus::Available),
        ];

        let result = matcher.rank_mentors(&create_mentee(), candidates, &[1], 10);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].mentor.id, 2);
    }

    #[test]
    fn test_custom_weights_applied() {
        let matcher = Matcher::new(ScoringWeights {
            career: 100.0,
            concentration: 0.0,
            courses: 0.0,
        });

        let mentor = MentorProfile::new(["Software Engineering"], Some("Data Science"), ["CS2110"]);
        let result = matcher.score_pair(&create_mentee(), &mentor);

        assert!((result.score - 100.0).abs() < 1e-9);
        assert_eq!(result.breakdown.concentration, 0.0);
    }
}

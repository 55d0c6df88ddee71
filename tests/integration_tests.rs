// Integration tests for PathMatch

use chrono::Utc;
use pathmatch::core::{calculate_compatibility, jaccard_similarity, score, Matcher};
use pathmatch::models::{AvailabilityStatus, MenteeProfile, Mentor, MentorProfile, ScoringWeights};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn create_test_mentor(
    id: i64,
    experiences: &[&str],
    concentration: Option<&str>,
    courses: &[&str],
) -> Mentor {
    Mentor {
        id,
        user_id: id + 1000,
        name: format!("Mentor {}", id),
        email: format!("mentor{}@cornell.edu", id),
        graduating_year: 2024,
        info_concentration: concentration.map(str::to_string),
        preferred_communication: vec![],
        advising_topics: vec![],
        professional_experiences: experiences.iter().map(|s| s.to_string()).collect(),
        technical_courses: courses.iter().map(|s| s.to_string()).collect(),
        career_pursuing: None,
        bio: None,
        calendly_link: None,
        availability_status: AvailabilityStatus::Available,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_test_mentee() -> MenteeProfile {
    MenteeProfile::new(
        ["Software Engineering", "Product Management"],
        ["Data Science", "HCI"],
        ["CS2110", "INFO2950"],
    )
}

#[test]
fn test_integration_end_to_end_ranking() {
    let matcher = Matcher::with_default_weights();
    let mentee = create_test_mentee();

    let mut unavailable = create_test_mentor(5, &["Software Engineering"], Some("HCI"), &["CS2110"]);
    unavailable.availability_status = AvailabilityStatus::Dnd;

    let candidates = vec![
        create_test_mentor(1, &["Consulting"], Some("Finance"), &[]),                 // 0
        create_test_mentor(2, &["Software Engineering"], Some("Data Science"), &["CS2110", "INFO2950"]), // 20 + 30 + 30
        create_test_mentor(3, &["Product Management"], Some("HCI"), &["CS2110"]),     // 20 + 30 + 15
        create_test_mentor(4, &["Software Engineering", "Product Management"], None, &[]), // 40
        unavailable,
        create_test_mentor(6, &["Software Engineering"], Some("Data Science"), &["CS2110", "INFO2950"]), // ties with 2
    ];

    let result = matcher.rank_mentors(&mentee, candidates, &[], 10);

    assert_eq!(result.total_candidates, 6);
    let ids: Vec<i64> = result.matches.iter().map(|m| m.mentor.id).collect();
    assert_eq!(ids, vec![2, 6, 3, 4, 1]);

    assert!((result.matches[0].compatibility_score - 80.0).abs() < 1e-9);
    assert!((result.matches[2].compatibility_score - 65.0).abs() < 1e-9);
    assert!((result.matches[3].compatibility_score - 40.0).abs() < 1e-9);
    assert_eq!(result.matches[4].compatibility_score, 0.0);
}

#[test]
fn test_integration_limit_and_exclusions() {
    let matcher = Matcher::with_default_weights();
    let mentee = create_test_mentee();

    let candidates: Vec<Mentor> = (1..=20)
        .map(|id| create_test_mentor(id, &["Software Engineering"], Some("HCI"), &["CS2110"]))
        .collect();

    let result = matcher.rank_mentors(&mentee, candidates, &[1, 2, 3], 5);

    assert_eq!(result.matches.len(), 5);
    let ids: Vec<i64> = result.matches.iter().map(|m| m.mentor.id).collect();
    assert_eq!(ids, vec![4, 5, 6, 7, 8]);
}

#[test]
fn test_integration_custom_weights() {
    let weights = ScoringWeights {
        career: 60.0,
        concentration: 20.0,
        courses: 20.0,
    };
    assert!(weights.validate().is_ok());

    let matcher = Matcher::new(weights);
    let mentee = MenteeProfile::new(["Consulting"], Vec::<String>::new(), Vec::<String>::new());
    let mentor = MentorProfile::new(["Consulting"], None, Vec::<String>::new());

    let result = matcher.score_pair(&mentee, &mentor);
    assert!((result.score - 60.0).abs() < 1e-9);
}

#[test]
fn test_integration_empty_candidates() {
    let matcher = Matcher::with_default_weights();
    let result = matcher.rank_mentors(&create_test_mentee(), vec![], &[], 10);

    assert!(result.matches.is_empty());
    assert_eq!(result.total_candidates, 0);
}

// Property tests

fn token_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-E]{1,2}", 0..6)
}

fn non_empty_token_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-E]{1,2}", 1..6)
}

fn mentee_profile() -> impl Strategy<Value = MenteeProfile> {
    (token_set(), token_set(), token_set()).prop_map(|(careers, concentrations, courses)| {
        MenteeProfile {
            careers_interested_in: careers,
            concentrations_interested_in: concentrations,
            technical_courses_taken: courses,
        }
    })
}

fn mentor_profile() -> impl Strategy<Value = MentorProfile> {
    (token_set(), prop::option::of("[A-E]{1,2}"), token_set()).prop_map(
        |(experiences, concentration, courses)| MentorProfile {
            professional_experiences: experiences,
            info_concentration: concentration,
            technical_courses: courses,
        },
    )
}

fn prefixed(set: &BTreeSet<String>, prefix: &str) -> BTreeSet<String> {
    set.iter().map(|token| format!("{}{}", prefix, token)).collect()
}

proptest! {
    #[test]
    fn prop_score_is_bounded(mentee in mentee_profile(), mentor in mentor_profile()) {
        let s = score(&mentee, &mentor);
        prop_assert!((0.0..=100.0).contains(&s));
    }

    #[test]
    fn prop_score_is_deterministic(mentee in mentee_profile(), mentor in mentor_profile()) {
        let first = calculate_compatibility(&mentee, &mentor, &ScoringWeights::default());
        let second = calculate_compatibility(&mentee, &mentor, &ScoringWeights::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_disjoint_profiles_score_zero(
        careers in token_set(),
        experiences in token_set(),
        concentrations in token_set(),
        mentee_courses in token_set(),
        mentor_courses in token_set(),
    ) {
        let mentee = MenteeProfile {
            careers_interested_in: prefixed(&careers, "mentee-"),
            concentrations_interested_in: prefixed(&concentrations, "mentee-"),
            technical_courses_taken: prefixed(&mentee_courses, "mentee-"),
        };
        let mentor = MentorProfile {
            professional_experiences: prefixed(&experiences, "mentor-"),
            info_concentration: Some("mentor-concentration".to_string()),
            technical_courses: prefixed(&mentor_courses, "mentor-"),
        };

        prop_assert_eq!(score(&mentee, &mentor), 0.0);
    }

    #[test]
    fn prop_full_alignment_scores_hundred(
        careers in non_empty_token_set(),
        extra_experiences in token_set(),
        concentrations in non_empty_token_set(),
        courses in non_empty_token_set(),
    ) {
        let concentration = concentrations.iter().next().cloned();
        let experiences = careers.union(&extra_experiences).cloned().collect();

        let mentee = MenteeProfile {
            careers_interested_in: careers,
            concentrations_interested_in: concentrations,
            technical_courses_taken: courses.clone(),
        };
        let mentor = MentorProfile {
            professional_experiences: experiences,
            info_concentration: concentration,
            technical_courses: courses,
        };

        prop_assert!((score(&mentee, &mentor) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn prop_jaccard_is_symmetric(a in token_set(), b in token_set()) {
        prop_assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
    }

    #[test]
    fn prop_empty_courses_contribute_zero(mentee in mentee_profile(), mentor in mentor_profile()) {
        let mentee = MenteeProfile { technical_courses_taken: BTreeSet::new(), ..mentee };
        let mentor = MentorProfile { technical_courses: BTreeSet::new(), ..mentor };

        let result = calculate_compatibility(&mentee, &mentor, &ScoringWeights::default());
        prop_assert_eq!(result.breakdown.courses, 0.0);
    }

    #[test]
    fn prop_ranking_is_order_independent(
        mentee in mentee_profile(),
        mentors in prop::collection::vec(mentor_profile(), 0..12),
        limit in 1usize..15,
    ) {
        let candidates: Vec<Mentor> = mentors
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                let mut mentor = create_test_mentor(i as i64 + 1, &[], None, &[]);
                mentor.professional_experiences = profile.professional_experiences.iter().cloned().collect();
                mentor.info_concentration = profile.info_concentration.clone();
                mentor.technical_courses = profile.technical_courses.iter().cloned().collect();
                mentor
            })
            .collect();
        let mut reversed = candidates.clone();
        reversed.reverse();

        let matcher = Matcher::with_default_weights();
        let forward = matcher.rank_mentors(&mentee, candidates, &[], limit);
        let backward = matcher.rank_mentors(&mentee, reversed, &[], limit);

        let forward_ids: Vec<i64> = forward.matches.iter().map(|m| m.mentor.id).collect();
        let backward_ids: Vec<i64> = backward.matches.iter().map(|m| m.mentor.id).collect();
        prop_assert_eq!(&forward_ids, &backward_ids);
        prop_assert!(forward_ids.len() <= limit);

        for pair in forward.matches.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.compatibility_score > b.compatibility_score
                    || (a.compatibility_score == b.compatibility_score && a.mentor.id < b.mentor.id)
            );
        }
    }
}

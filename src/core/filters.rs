use crate::models::{AvailabilityStatus, Mentor};

/// Check if a mentor can take new mentees
///
/// Mentors marked dnd or unavailable never appear in rankings.
#[inline]
pub fn is_available(mentor: &Mentor) -> bool {
    mentor.availability_status == AvailabilityStatus::Available
}

/// Check if a mentor was excluded by the caller
#[inline]
pub fn is_excluded(mentor: &Mentor, exclude_mentor_ids: &[i64]) -> bool {
    exclude_mentor_ids.contains(&mentor.id)
}

/// Check if a mentor is a valid ranking candidate
#[inline]
pub fn is_candidate(mentor: &Mentor, exclude_mentor_ids: &[i64]) -> bool {
    is_available(mentor) && !is_excluded(mentor, exclude_mentor_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_mentor(id: i64, status: AvailabilityStatus) -> Mentor {
        Mentor {
            id,
            user_id: id + 100,
            name: format!("Mentor {}", id),
            email: format!("mentor{}@cornell.edu", id),
            graduating_year: 2025,
            info_concentration: Some("Data Science".to_string()),
            preferred_communication: vec![],
            advising_topics: vec![],
            professional_experiences: vec![],
            technical_courses: vec![],
            career_pursuing: None,
            bio: None,
            calendly_link: None,
            availability_status: status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_mentor_is_candidate() {
        let mentor = create_test_mentor(1, AvailabilityStatus::Available);
        assert!(is_candidate(&mentor, &[]));
    }

    #[test]
    fn test_dnd_and_unavailable_filtered() {
        assert!(!is_available(&create_test_mentor(1, AvailabilityStatus::Dnd)));
        assert!(!is_available(&create_test_mentor(2, AvailabilityStatus::Unavailable)));
    }

    #[test]
    fn test_excluded_mentor_filtered() {
        let mentor = create_test_mentor(7, AvailabilityStatus::Available);
        assert!(is_excluded(&mentor, &[3, 7]));
        assert!(!is_candidate(&mentor, &[3, 7]));
    }
}

use crate::core::ScoringError;
use crate::models::requests::{MenteeProfileInput, MentorProfileInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }
}

/// Mentor availability for new matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Dnd,
    Unavailable,
}

impl FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(AvailabilityStatus::Available),
            "dnd" => Ok(AvailabilityStatus::Dnd),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            other => Err(format!(
                "Invalid availability status '{}': expected available, dnd or unavailable",
                other
            )),
        }
    }
}

/// Lifecycle of a mentor/mentee pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "confirmed" => Ok(MatchStatus::Confirmed),
            "completed" => Ok(MatchStatus::Completed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            other => Err(format!("Invalid match status '{}'", other)),
        }
    }
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub net_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mentor profile joined with the owning user's name and email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub graduating_year: i32,
    pub info_concentration: Option<String>,
    #[serde(default)]
    pub preferred_communication: Vec<String>,
    #[serde(default)]
    pub advising_topics: Vec<String>,
    #[serde(default)]
    pub professional_experiences: Vec<String>,
    #[serde(default)]
    pub technical_courses: Vec<String>,
    pub career_pursuing: Option<String>,
    pub bio: Option<String>,
    pub calendly_link: Option<String>,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mentee profile joined with the owning user's name and email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentee {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub graduating_year: i32,
    pub info_concentration: Option<String>,
    #[serde(default)]
    pub preferred_communication: Vec<String>,
    #[serde(default)]
    pub advising_needs: Vec<String>,
    #[serde(default)]
    pub careers_interested_in: Vec<String>,
    #[serde(default)]
    pub concentrations_interested_in: Vec<String>,
    #[serde(default)]
    pub technical_courses_taken: Vec<String>,
    #[serde(default)]
    pub field_interests: Vec<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted pairing with the score it was created with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub compatibility_score: f64,
    pub status: MatchStatus,
    pub meeting_scheduled: bool,
    pub meeting_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One answered survey question, owned by either a mentor or a mentee profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: i64,
    pub mentor_id: Option<i64>,
    pub mentee_id: Option<i64>,
    pub question_id: String,
    pub response_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// The slice of a mentee that compatibility scoring reads.
///
/// Tokens are opaque and compared case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenteeProfile {
    pub careers_interested_in: BTreeSet<String>,
    pub concentrations_interested_in: BTreeSet<String>,
    pub technical_courses_taken: BTreeSet<String>,
}

impl MenteeProfile {
    pub fn new<C, K, T>(careers: C, concentrations: K, courses: T) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            careers_interested_in: careers.into_iter().map(Into::into).collect(),
            concentrations_interested_in: concentrations.into_iter().map(Into::into).collect(),
            technical_courses_taken: courses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&Mentee> for MenteeProfile {
    fn from(mentee: &Mentee) -> Self {
        Self::new(
            mentee.careers_interested_in.iter().cloned(),
            mentee.concentrations_interested_in.iter().cloned(),
            mentee.technical_courses_taken.iter().cloned(),
        )
    }
}

impl TryFrom<MenteeProfileInput> for MenteeProfile {
    type Error = ScoringError;

    fn try_from(input: MenteeProfileInput) -> Result<Self, Self::Error> {
        Ok(Self {
            careers_interested_in: token_set("careers_interested_in", input.careers_interested_in)?,
            concentrations_interested_in: token_set(
                "concentrations_interested_in",
                input.concentrations_interested_in,
            )?,
            technical_courses_taken: token_set(
                "technical_courses_taken",
                input.technical_courses_taken,
            )?,
        })
    }
}

/// The slice of a mentor that compatibility scoring reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorProfile {
    pub professional_experiences: BTreeSet<String>,
    pub info_concentration: Option<String>,
    pub technical_courses: BTreeSet<String>,
}

impl MentorProfile {
    pub fn new<E, T>(experiences: E, concentration: Option<&str>, courses: T) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            professional_experiences: experiences.into_iter().map(Into::into).collect(),
            info_concentration: concentration.map(str::to_string),
            technical_courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&Mentor> for MentorProfile {
    fn from(mentor: &Mentor) -> Self {
        Self::new(
            mentor.professional_experiences.iter().cloned(),
            mentor.info_concentration.as_deref(),
            mentor.technical_courses.iter().cloned(),
        )
    }
}

impl TryFrom<MentorProfileInput> for MentorProfile {
    type Error = ScoringError;

    fn try_from(input: MentorProfileInput) -> Result<Self, Self::Error> {
        let info_concentration = match input.info_concentration {
            Some(c) if c.trim().is_empty() => {
                return Err(ScoringError::InvalidInput(
                    "info_concentration must not be blank".to_string(),
                ))
            }
            other => other,
        };

        Ok(Self {
            professional_experiences: token_set(
                "professional_experiences",
                input.professional_experiences,
            )?,
            info_concentration,
            technical_courses: token_set("technical_courses", input.technical_courses)?,
        })
    }
}

/// Build a token set from a required list field, rejecting blank tokens
fn token_set(field: &str, values: Option<Vec<String>>) -> Result<BTreeSet<String>, ScoringError> {
    let values = values.ok_or_else(|| ScoringError::InvalidInput(format!("missing required field `{}`", field)))?;

    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ScoringError::InvalidInput(format!(
            "`{}` contains a blank entry",
            field
        )));
    }

    Ok(values.into_iter().collect())
}

/// Weights of the three compatibility signals, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub career: f64,
    pub concentration: f64,
    pub courses: f64,
}

impl ScoringWeights {
    /// Reject weight sets that could push a score outside 0-100
    pub fn validate(&self) -> Result<(), ScoringError> {
        let weights = [
            ("career", self.career),
            ("concentration", self.concentration),
            ("courses", self.courses),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::InvalidInput(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total = self.career + self.concentration + self.courses;
        if total > 100.0 {
            return Err(ScoringError::InvalidInput(format!(
                "weights sum to {}, expected at most 100",
                total
            )));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            career: 40.0,
            concentration: 30.0,
            courses: 30.0,
        }
    }
}

/// Weighted contribution of each signal to a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub career: f64,
    pub concentration: f64,
    pub courses: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.career + self.concentration + self.courses
    }
}

/// Coarse label shown next to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Moderate Match")]
    Moderate,
    #[serde(rename = "Low Match")]
    Low,
}

impl MatchQuality {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchQuality::Excellent
        } else if score >= 60.0 {
            MatchQuality::Good
        } else if score >= 40.0 {
            MatchQuality::Moderate
        } else {
            MatchQuality::Low
        }
    }
}

/// Result of scoring one mentee against one mentor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub score: f64,
    pub quality: MatchQuality,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
}

/// Ranked mentor candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMentor {
    pub mentor: Mentor,
    pub compatibility_score: f64,
    pub quality: MatchQuality,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
}

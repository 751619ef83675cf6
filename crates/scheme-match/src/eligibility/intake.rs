use serde::{Deserialize, Serialize};

use super::domain::{ProfileFlags, UserProfile};

/// Validation errors raised before a profile reaches the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("age must be between 0 and {max} (found {found})")]
    AgeOutOfRange { max: u32, found: i64 },
    #[error("annual income must be a non-negative number (found {0})")]
    InvalidIncome(f64),
    #[error("profile field '{0}' must not be empty")]
    MissingField(&'static str),
}

const DEFAULT_MAX_AGE: u32 = 130;

/// Raw profile as submitted by a form, API client or CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub age: i64,
    pub gender: String,
    pub occupation: String,
    pub annual_income: f64,
    pub state: String,
    pub category: String,
    #[serde(default)]
    pub is_disabled: Option<bool>,
    #[serde(default)]
    pub is_widow: Option<bool>,
    #[serde(default)]
    pub is_woman: Option<bool>,
    #[serde(default)]
    pub is_farmer: Option<bool>,
    #[serde(default)]
    pub is_student: Option<bool>,
    #[serde(default)]
    pub is_orphan: Option<bool>,
}

/// Guard that turns submissions into well-typed [`UserProfile`] values.
#[derive(Debug, Clone)]
pub struct ProfileGuard {
    max_age: u32,
}

impl Default for ProfileGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

impl ProfileGuard {
    pub fn new(max_age: u32) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<UserProfile, ProfileViolation> {
        let age = u32::try_from(submission.age)
            .ok()
            .filter(|age| *age <= self.max_age)
            .ok_or(ProfileViolation::AgeOutOfRange {
                max: self.max_age,
                found: submission.age,
            })?;

        if !submission.annual_income.is_finite() || submission.annual_income < 0.0 {
            return Err(ProfileViolation::InvalidIncome(submission.annual_income));
        }

        let gender = required_field("gender", &submission.gender)?;
        let occupation = required_field("occupation", &submission.occupation)?;
        let state = required_field("state", &submission.state)?;
        let category = required_field("category", &submission.category)?;

        let is_woman = submission
            .is_woman
            .unwrap_or_else(|| gender.eq_ignore_ascii_case("female"));

        Ok(UserProfile {
            age,
            gender,
            occupation,
            annual_income: submission.annual_income,
            state,
            category,
            flags: ProfileFlags {
                is_disabled: submission.is_disabled.unwrap_or(false),
                is_widow: submission.is_widow.unwrap_or(false),
                is_woman,
                is_farmer: submission.is_farmer.unwrap_or(false),
                is_student: submission.is_student.unwrap_or(false),
                is_orphan: submission.is_orphan.unwrap_or(false),
            },
        })
    }
}

fn required_field(name: &'static str, value: &str) -> Result<String, ProfileViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ProfileViolation::MissingField(name))
    } else {
        Ok(trimmed.to_string())
    }
}

//! Confidence scoring.
//!
//! Two strategies exist and are not interchangeable. The explanatory score is the pass
//! ratio reported alongside an eligibility verdict; the ranking score awards weighted,
//! partial credit so near-miss schemes can still be ordered for search results.

use serde::{Deserialize, Serialize};

use crate::eligibility::domain::{EligibilityCriteria, Scheme, UserProfile, WILDCARD};
use super::rules::evaluate_criteria;

const AGE_POINTS: f64 = 20.0;
const AGE_PENALTY_PER_YEAR: f64 = 2.0;
const INCOME_POINTS: f64 = 20.0;
const CATEGORY_POINTS: f64 = 15.0;
const OCCUPATION_POINTS: f64 = 15.0;
const GENDER_POINTS: f64 = 10.0;
const STATE_POINTS: f64 = 10.0;
const CONDITIONAL_POINTS: f64 = 2.0;

/// Selects which scorer a caller wants without merging their semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrategy {
    Explanatory,
    Ranking,
}

impl ScoreStrategy {
    /// Score a scheme for a profile. Schemes without criteria data score 0 under both.
    pub fn score(self, scheme: &Scheme, profile: &UserProfile) -> u8 {
        let Some(criteria) = scheme.eligibility.as_ref() else {
            return 0;
        };

        match self {
            ScoreStrategy::Explanatory => {
                let facts = evaluate_criteria(criteria, profile);
                explanatory_score(facts.passed_checks(), facts.total_checks())
            }
            ScoreStrategy::Ranking => ranking_score(criteria, profile),
        }
    }
}

/// `round(passed / total * 100)`, or 100 when nothing applies.
pub fn explanatory_score(passed_checks: usize, total_checks: usize) -> u8 {
    if total_checks == 0 {
        return 100;
    }

    let ratio = passed_checks.min(total_checks) as f64 / total_checks as f64;
    (ratio * 100.0).round() as u8
}

/// Weighted factor considered by the ranking scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingFactor {
    Age,
    Income,
    Category,
    Occupation,
    Gender,
    State,
    Conditional,
}

/// Points earned against the points available for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingComponent {
    pub factor: RankingFactor,
    pub earned: f64,
    pub available: f64,
}

/// Per-factor contributions, in a fixed order. Absent criteria contribute nothing.
pub fn ranking_breakdown(
    criteria: &EligibilityCriteria,
    profile: &UserProfile,
) -> Vec<RankingComponent> {
    let mut components = Vec::new();

    if criteria.has_age_bounds() {
        components.push(RankingComponent {
            factor: RankingFactor::Age,
            earned: age_points(criteria.min_age, criteria.max_age, profile.age),
            available: AGE_POINTS,
        });
    }

    if let Some(limit) = criteria.income_limit {
        components.push(RankingComponent {
            factor: RankingFactor::Income,
            earned: income_points(limit, profile.annual_income),
            available: INCOME_POINTS,
        });
    }

    if let Some(categories) = criteria.categories.as_deref() {
        components.push(RankingComponent {
            factor: RankingFactor::Category,
            earned: award(
                allows(categories, &profile.category, true),
                CATEGORY_POINTS,
            ),
            available: CATEGORY_POINTS,
        });
    }

    if let Some(occupations) = criteria.occupation_list() {
        components.push(RankingComponent {
            factor: RankingFactor::Occupation,
            earned: award(
                allows(occupations, &profile.occupation, false),
                OCCUPATION_POINTS,
            ),
            available: OCCUPATION_POINTS,
        });
    }

    if let Some(gender) = criteria.gender.as_deref() {
        components.push(RankingComponent {
            factor: RankingFactor::Gender,
            earned: award(gender_matches(gender, &profile.gender), GENDER_POINTS),
            available: GENDER_POINTS,
        });
    }

    if let Some(states) = criteria.states.as_deref() {
        components.push(RankingComponent {
            factor: RankingFactor::State,
            earned: award(allows(states, &profile.state, true), STATE_POINTS),
            available: STATE_POINTS,
        });
    }

    for flag in criteria.conditionals.required() {
        components.push(RankingComponent {
            factor: RankingFactor::Conditional,
            earned: award(profile.flags.has(flag), CONDITIONAL_POINTS),
            available: CONDITIONAL_POINTS,
        });
    }

    components
}

/// `round(earned / available * 100)` over the weighted factors, or 100 when nothing applies.
pub fn ranking_score(criteria: &EligibilityCriteria, profile: &UserProfile) -> u8 {
    let components = ranking_breakdown(criteria, profile);
    let available: f64 = components.iter().map(|component| component.available).sum();
    if available <= 0.0 {
        return 100;
    }

    let earned: f64 = components.iter().map(|component| component.earned).sum();
    ((earned / available) * 100.0).round().clamp(0.0, 100.0) as u8
}

fn age_points(min: Option<u32>, max: Option<u32>, age: u32) -> f64 {
    let distance = match (min, max) {
        (Some(min), _) if age < min => min - age,
        (_, Some(max)) if age > max => age - max,
        _ => 0,
    };

    (AGE_POINTS - AGE_PENALTY_PER_YEAR * f64::from(distance)).max(0.0)
}

fn income_points(limit: f64, income: f64) -> f64 {
    if income > limit {
        return 0.0;
    }

    if limit <= 0.0 {
        return INCOME_POINTS;
    }

    INCOME_POINTS * (1.0 - 0.5 * (income / limit))
}

fn allows(allowed: &[String], value: &str, wildcard: bool) -> bool {
    allowed
        .iter()
        .any(|entry| entry == value || (wildcard && entry == WILDCARD))
}

fn gender_matches(required: &str, gender: &str) -> bool {
    let required = required.trim();
    required.eq_ignore_ascii_case(WILDCARD)
        || required.eq_ignore_ascii_case("any")
        || required.eq_ignore_ascii_case(gender.trim())
}

fn award(matched: bool, points: f64) -> f64 {
    if matched {
        points
    } else {
        0.0
    }
}

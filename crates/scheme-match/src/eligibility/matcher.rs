use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::SchemeCatalog;
use super::domain::{DocumentStatus, SchemeId, UserProfile};
use super::evaluation::{meets_criteria, EligibilityEngine, EligibilityResult, ScoreStrategy};

/// Ranking score at or above which an ineligible scheme counts as a near miss.
pub const NEAR_MISS_THRESHOLD: u8 = 60;

/// Canonical result order: eligible first, then descending confidence, then scheme id.
pub fn canonical_order(left: &EligibilityResult, right: &EligibilityResult) -> Ordering {
    right
        .is_eligible
        .cmp(&left.is_eligible)
        .then_with(|| right.confidence_score.cmp(&left.confidence_score))
        .then_with(|| left.scheme_id.cmp(&right.scheme_id))
}

/// Evaluate every scheme in the catalog and sort the results canonically.
pub fn evaluate_catalog(
    engine: &EligibilityEngine,
    catalog: &SchemeCatalog,
    profile: &UserProfile,
    documents: &DocumentStatus,
) -> Vec<EligibilityResult> {
    let mut results: Vec<EligibilityResult> = catalog
        .iter()
        .map(|scheme| engine.evaluate(scheme, profile, documents))
        .collect();
    results.sort_by(canonical_order);
    results
}

/// Scheme position in a search ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScheme {
    pub scheme_id: SchemeId,
    pub scheme_name: String,
    pub ranking_score: u8,
    pub is_eligible: bool,
}

/// Order the catalog by the weighted ranking score, keeping entries at or above `min_score`.
pub fn rank_catalog(
    catalog: &SchemeCatalog,
    profile: &UserProfile,
    min_score: u8,
) -> Vec<RankedScheme> {
    let mut ranked: Vec<RankedScheme> = catalog
        .iter()
        .map(|scheme| RankedScheme {
            scheme_id: scheme.id.clone(),
            scheme_name: scheme.name.clone(),
            ranking_score: ScoreStrategy::Ranking.score(scheme, profile),
            is_eligible: meets_criteria(scheme, profile),
        })
        .filter(|entry| entry.ranking_score >= min_score)
        .collect();

    ranked.sort_by(|left, right| {
        right
            .ranking_score
            .cmp(&left.ranking_score)
            .then_with(|| left.scheme_id.cmp(&right.scheme_id))
    });
    ranked
}

/// Headline counts for a catalog scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total_schemes: usize,
    pub eligible: usize,
    pub near_misses: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<SchemeId>,
}

impl MatchSummary {
    /// Summarize canonically sorted results; `ranked` supplies near-miss scores.
    pub fn from_results(results: &[EligibilityResult], ranked: &[RankedScheme]) -> Self {
        let eligible = results.iter().filter(|result| result.is_eligible).count();
        let near_misses = ranked
            .iter()
            .filter(|entry| !entry.is_eligible && entry.ranking_score >= NEAR_MISS_THRESHOLD)
            .count();
        let best_match = results
            .iter()
            .find(|result| result.is_eligible)
            .map(|result| result.scheme_id.clone());

        Self {
            total_schemes: results.len(),
            eligible,
            near_misses,
            best_match,
        }
    }
}

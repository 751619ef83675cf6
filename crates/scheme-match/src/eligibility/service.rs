use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::SchemeCatalog;
use super::domain::{DocumentStatus, SchemeId, UserProfile};
use super::evaluation::{EligibilityEngine, EligibilityResult};
use super::intake::{ProfileGuard, ProfileSubmission, ProfileViolation};
use super::matcher::{evaluate_catalog, rank_catalog, MatchSummary, RankedScheme};

/// Service composing the profile guard, scheme catalog and evaluation engine.
#[derive(Debug, Clone)]
pub struct EligibilityService {
    guard: ProfileGuard,
    engine: EligibilityEngine,
    catalog: SchemeCatalog,
}

impl EligibilityService {
    pub fn new(catalog: SchemeCatalog, engine: EligibilityEngine) -> Self {
        Self::with_guard(ProfileGuard::default(), catalog, engine)
    }

    pub fn with_guard(
        guard: ProfileGuard,
        catalog: SchemeCatalog,
        engine: EligibilityEngine,
    ) -> Self {
        Self {
            guard,
            engine,
            catalog,
        }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Validate a submission and evaluate it against the whole catalog.
    pub fn evaluate_all(
        &self,
        submission: ProfileSubmission,
        documents: DocumentStatus,
    ) -> Result<EligibilityReport, EligibilityServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        Ok(self.match_profile(&profile, &documents))
    }

    /// Evaluate an already validated profile against the whole catalog.
    pub fn match_profile(
        &self,
        profile: &UserProfile,
        documents: &DocumentStatus,
    ) -> EligibilityReport {
        let results = evaluate_catalog(&self.engine, &self.catalog, profile, documents);
        let ranked = rank_catalog(&self.catalog, profile, 0);
        let summary = MatchSummary::from_results(&results, &ranked);

        info!(
            schemes = summary.total_schemes,
            eligible = summary.eligible,
            near_misses = summary.near_misses,
            "evaluated profile against scheme catalog"
        );

        EligibilityReport { summary, results }
    }

    /// Evaluate a single scheme by id.
    pub fn evaluate_scheme(
        &self,
        scheme_id: &SchemeId,
        submission: ProfileSubmission,
        documents: DocumentStatus,
    ) -> Result<EligibilityResult, EligibilityServiceError> {
        let scheme = self
            .catalog
            .get(scheme_id)
            .ok_or_else(|| EligibilityServiceError::UnknownScheme(scheme_id.clone()))?;
        let profile = self.guard.profile_from_submission(submission)?;

        let result = self.engine.evaluate(scheme, &profile, &documents);
        debug!(
            scheme_id = %scheme_id,
            eligible = result.is_eligible,
            confidence = result.confidence_score,
            "evaluated single scheme"
        );
        Ok(result)
    }

    /// Rank the catalog with the weighted partial-credit scorer.
    pub fn rank(
        &self,
        submission: ProfileSubmission,
        min_score: u8,
    ) -> Result<Vec<RankedScheme>, EligibilityServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        Ok(rank_catalog(&self.catalog, &profile, min_score))
    }

    /// Lightweight listing of the catalog for API clients.
    pub fn schemes(&self) -> Vec<SchemeListing> {
        self.catalog
            .iter()
            .map(|scheme| SchemeListing {
                id: scheme.id.clone(),
                name: scheme.name.clone(),
                ministry: scheme.ministry.clone(),
                document_count: scheme.documents.len(),
                has_criteria: scheme.eligibility.is_some(),
            })
            .collect()
    }
}

/// Catalog-wide evaluation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub summary: MatchSummary,
    pub results: Vec<EligibilityResult>,
}

impl EligibilityReport {
    /// Drop results below `min_confidence`; the summary still covers the full catalog.
    pub fn retain_confident(mut self, min_confidence: u8) -> Self {
        self.results
            .retain(|result| result.confidence_score >= min_confidence);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeListing {
    pub id: SchemeId,
    pub name: String,
    pub ministry: String,
    pub document_count: usize,
    pub has_criteria: bool,
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error("unknown scheme '{0}'")]
    UnknownScheme(SchemeId),
}

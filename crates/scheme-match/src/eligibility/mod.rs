//! Welfare scheme eligibility evaluation.
//!
//! The engine (`evaluation`) is a pure, per-scheme function: it never performs I/O and holds
//! no state between calls. The surrounding modules are collaborators that feed it: the
//! immutable scheme catalog, profile intake validation, CSV import, the catalog matcher,
//! the service facade and the HTTP router.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod intake;
pub mod matcher;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, SchemeCatalog};
pub use domain::{
    CanonicalDocument, ConditionalFlag, Conditionals, DocumentStatus, EligibilityCriteria,
    ProfileFlags, Scheme, SchemeId, UserProfile,
};
pub use evaluation::{
    evaluate, meets_criteria, DocumentChecklist, EligibilityEngine, EligibilityResult, ExplanationTemplates,
    GuidanceEntry, GuidanceStatus, ScoreStrategy,
};
pub use import::{ImportedProfile, ProfileImportError, ProfileImporter};
pub use intake::{ProfileGuard, ProfileSubmission, ProfileViolation};
pub use matcher::{evaluate_catalog, rank_catalog, MatchSummary, RankedScheme};
pub use router::{eligibility_router, EvaluationRequest, RankRequest};
pub use service::{EligibilityReport, EligibilityService, EligibilityServiceError, SchemeListing};

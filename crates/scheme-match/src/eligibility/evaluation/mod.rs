mod documents;
mod guidance;
mod rules;
mod scoring;

pub use documents::{classify_document, reconcile_documents, DocumentChecklist};
pub use guidance::{ExplanationTemplates, GuidanceEntry, GuidanceStatus, NO_ACTION};
pub use scoring::{
    explanatory_score, ranking_breakdown, ranking_score, RankingComponent, RankingFactor,
    ScoreStrategy,
};

use super::domain::{DocumentStatus, Scheme, SchemeId, UserProfile};
use guidance::build_guidance;
use rules::evaluate_criteria;
use serde::{Deserialize, Serialize};

/// Failure reason reported for catalog entries without criteria data.
pub const INCOMPLETE_DATA_REASON: &str = "Scheme eligibility data is incomplete";
/// Missing-requirement hint paired with [`INCOMPLETE_DATA_REASON`].
pub const INCOMPLETE_DATA_REQUIREMENT: &str = "eligibility_data";
const INCOMPLETE_DATA_LABEL: &str = "Eligibility data";

/// Stateless evaluator carrying the caller's explanation templates.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    templates: ExplanationTemplates,
}

impl EligibilityEngine {
    pub fn new(templates: ExplanationTemplates) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &ExplanationTemplates {
        &self.templates
    }

    pub fn evaluate(
        &self,
        scheme: &Scheme,
        profile: &UserProfile,
        documents: &DocumentStatus,
    ) -> EligibilityResult {
        evaluate(scheme, profile, documents, &self.templates)
    }
}

/// Evaluation output for one scheme and one profile.
///
/// `is_eligible` holds exactly when `missing_requirements` is empty. The confidence score
/// is a pass ratio and can be high for an ineligible scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub scheme_id: SchemeId,
    pub scheme_name: String,
    pub is_eligible: bool,
    pub confidence_score: u8,
    pub explanation: String,
    pub passed_reasons: Vec<String>,
    pub failed_reasons: Vec<String>,
    /// Legacy combined list; carries failures only.
    pub reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub document_checklist: DocumentChecklist,
    pub improvement_guidance: Vec<GuidanceEntry>,
}

/// Verdict only, skipping documents and prose. Agrees with [`evaluate`]'s `is_eligible`.
pub fn meets_criteria(scheme: &Scheme, profile: &UserProfile) -> bool {
    scheme.eligibility.as_ref().is_some_and(|criteria| {
        evaluate_criteria(criteria, profile)
            .failures()
            .next()
            .is_none()
    })
}

/// Evaluate one scheme against a profile and the citizen's document holdings.
///
/// Pure: identical inputs always produce identical results.
pub fn evaluate(
    scheme: &Scheme,
    profile: &UserProfile,
    documents: &DocumentStatus,
    templates: &ExplanationTemplates,
) -> EligibilityResult {
    let document_checklist = reconcile_documents(&scheme.documents, documents);

    let Some(criteria) = scheme.eligibility.as_ref() else {
        return incomplete_result(scheme, document_checklist, templates);
    };

    let facts = evaluate_criteria(criteria, profile);

    let mut passed_reasons = Vec::new();
    let mut failed_reasons = Vec::new();
    let mut missing_requirements = Vec::new();
    for check in &facts.checks {
        if check.passed {
            passed_reasons.push(check.reason.clone());
        } else {
            failed_reasons.push(check.reason.clone());
        }
    }
    for check in facts.failures() {
        missing_requirements.push(check.criterion.requirement_key().to_string());
    }

    let confidence_score = explanatory_score(facts.passed_checks(), facts.total_checks());
    let missing_labels: Vec<&str> = facts
        .failures()
        .map(|check| check.criterion.label())
        .collect();
    let explanation = templates.render(&scheme.name, confidence_score, &missing_labels);

    EligibilityResult {
        scheme_id: scheme.id.clone(),
        scheme_name: scheme.name.clone(),
        is_eligible: missing_requirements.is_empty(),
        confidence_score,
        explanation,
        passed_reasons,
        reasons: failed_reasons.clone(),
        failed_reasons,
        missing_requirements,
        document_checklist,
        improvement_guidance: build_guidance(&facts),
    }
}

fn incomplete_result(
    scheme: &Scheme,
    document_checklist: DocumentChecklist,
    templates: &ExplanationTemplates,
) -> EligibilityResult {
    let missing_requirements = vec![INCOMPLETE_DATA_REQUIREMENT.to_string()];
    let explanation = templates.render(&scheme.name, 0, &[INCOMPLETE_DATA_LABEL]);

    EligibilityResult {
        scheme_id: scheme.id.clone(),
        scheme_name: scheme.name.clone(),
        is_eligible: false,
        confidence_score: 0,
        explanation,
        passed_reasons: Vec::new(),
        failed_reasons: vec![INCOMPLETE_DATA_REASON.to_string()],
        reasons: vec![INCOMPLETE_DATA_REASON.to_string()],
        missing_requirements,
        document_checklist,
        improvement_guidance: Vec::new(),
    }
}

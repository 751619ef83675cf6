use serde::{Deserialize, Serialize};

use super::rules::{CriteriaFacts, CriterionCheck};

/// Action recorded on guidance entries for criteria that already pass.
pub const NO_ACTION: &str = "none";

/// Caller-supplied sentence templates.
///
/// Placeholders: `{scheme}`, `{score}` and, for `not_eligible`, `{missing}`. The strings
/// are opaque to the engine; localized variants are the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationTemplates {
    pub eligible: String,
    pub not_eligible: String,
    pub missing_separator: String,
}

impl Default for ExplanationTemplates {
    fn default() -> Self {
        Self {
            eligible: "You are eligible for {scheme} ({score}% match).".to_string(),
            not_eligible: "You are not yet eligible for {scheme} ({score}% match). Missing: {missing}."
                .to_string(),
            missing_separator: ", ".to_string(),
        }
    }
}

const MAX_MISSING_IN_SUMMARY: usize = 2;

impl ExplanationTemplates {
    /// Render the sentence; `missing` holds readable labels of the failed criteria.
    pub fn render(&self, scheme_name: &str, score: u8, missing: &[&str]) -> String {
        if missing.is_empty() {
            return self
                .eligible
                .replace("{scheme}", scheme_name)
                .replace("{score}", &score.to_string());
        }

        let missing = missing
            .iter()
            .take(MAX_MISSING_IN_SUMMARY)
            .copied()
            .collect::<Vec<_>>()
            .join(&self.missing_separator);

        self.not_eligible
            .replace("{scheme}", scheme_name)
            .replace("{score}", &score.to_string())
            .replace("{missing}", &missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceStatus {
    Passed,
    Failed,
}

/// Structured "how to become eligible" step for one applicable criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceEntry {
    pub condition: String,
    pub status: GuidanceStatus,
    pub message: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

pub(crate) fn build_guidance(facts: &CriteriaFacts) -> Vec<GuidanceEntry> {
    facts.checks.iter().map(guidance_entry).collect()
}

fn guidance_entry(check: &CriterionCheck) -> GuidanceEntry {
    let condition = check.criterion.label().to_string();
    if check.passed {
        GuidanceEntry {
            condition,
            status: GuidanceStatus::Passed,
            message: check.reason.clone(),
            action: NO_ACTION.to_string(),
            diff: None,
        }
    } else {
        GuidanceEntry {
            condition,
            status: GuidanceStatus::Failed,
            message: check.reason.clone(),
            action: check.action.unwrap_or(NO_ACTION).to_string(),
            diff: check.diff.clone(),
        }
    }
}

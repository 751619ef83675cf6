use serde::{Deserialize, Serialize};

use crate::eligibility::domain::{CanonicalDocument, DocumentStatus};

/// Keyword table in precedence order; the first matching entry wins.
const DOCUMENT_KEYWORDS: [(&str, CanonicalDocument); 5] = [
    ("Aadhaar", CanonicalDocument::Identity),
    ("Bank", CanonicalDocument::BankAccount),
    ("Income", CanonicalDocument::IncomeProof),
    ("Caste", CanonicalDocument::CategoryProof),
    ("Category", CanonicalDocument::CategoryProof),
];

/// Document checklist attached to each eligibility result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    pub required: Vec<String>,
    /// Reserved; always empty today.
    pub optional: Vec<String>,
    pub missing: Vec<String>,
    pub user_has: Vec<String>,
}

/// Map a free-text requirement onto a tracked document type (case-sensitive substring).
pub fn classify_document(requirement: &str) -> Option<CanonicalDocument> {
    DOCUMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| requirement.contains(keyword))
        .map(|(_, document)| *document)
}

/// Compare a scheme's document list with what the citizen holds.
///
/// Untracked documents are always reported missing: the engine cannot know whether the
/// citizen has them.
pub fn reconcile_documents(documents: &[String], status: &DocumentStatus) -> DocumentChecklist {
    let mut checklist = DocumentChecklist::default();

    for document in documents {
        checklist.required.push(document.clone());

        match classify_document(document) {
            Some(kind) if status.holds(kind) => checklist.user_has.push(document.clone()),
            _ => checklist.missing.push(document.clone()),
        }
    }

    checklist
}

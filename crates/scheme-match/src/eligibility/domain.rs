use serde::{Deserialize, Serialize};

/// Wildcard entry accepted in category and state allow-lists.
pub const WILDCARD: &str = "All";

/// Identifier wrapper for catalog schemes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemeId(pub String);

impl SchemeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Welfare program reference data. Loaded once and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    #[serde(default)]
    pub ministry: String,
    /// `None` marks a malformed catalog entry; the evaluator short-circuits on it.
    #[serde(default)]
    pub eligibility: Option<EligibilityCriteria>,
    /// Free-text document requirements in display order.
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
}

/// Eligibility predicates attached to a scheme. Absent fields are not applicable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    /// Only consulted by the ranking scorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub conditionals: Conditionals,
}

impl EligibilityCriteria {
    pub fn has_age_bounds(&self) -> bool {
        self.min_age.is_some() || self.max_age.is_some()
    }

    /// Occupation allow-list, treating an empty list as not applicable.
    pub fn occupation_list(&self) -> Option<&[String]> {
        self.occupations
            .as_deref()
            .filter(|occupations| !occupations.is_empty())
    }
}

/// Boolean conditions a scheme may require. `false` means "not required".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditionals {
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_widow: bool,
    #[serde(default)]
    pub is_woman: bool,
    #[serde(default)]
    pub is_farmer: bool,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_orphan: bool,
}

impl Conditionals {
    pub fn requires(&self, flag: ConditionalFlag) -> bool {
        match flag {
            ConditionalFlag::IsDisabled => self.is_disabled,
            ConditionalFlag::IsWidow => self.is_widow,
            ConditionalFlag::IsWoman => self.is_woman,
            ConditionalFlag::IsFarmer => self.is_farmer,
            ConditionalFlag::IsStudent => self.is_student,
            ConditionalFlag::IsOrphan => self.is_orphan,
        }
    }

    /// Required flags in canonical order.
    pub fn required(&self) -> impl Iterator<Item = ConditionalFlag> + '_ {
        ConditionalFlag::ALL
            .into_iter()
            .filter(move |flag| self.requires(*flag))
    }
}

/// Named boolean flags shared by scheme conditionals and user profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalFlag {
    IsDisabled,
    IsWidow,
    IsWoman,
    IsFarmer,
    IsStudent,
    IsOrphan,
}

impl ConditionalFlag {
    pub const ALL: [ConditionalFlag; 6] = [
        ConditionalFlag::IsDisabled,
        ConditionalFlag::IsWidow,
        ConditionalFlag::IsWoman,
        ConditionalFlag::IsFarmer,
        ConditionalFlag::IsStudent,
        ConditionalFlag::IsOrphan,
    ];

    /// Stable key used in missing-requirement hints.
    pub const fn key(self) -> &'static str {
        match self {
            ConditionalFlag::IsDisabled => "is_disabled",
            ConditionalFlag::IsWidow => "is_widow",
            ConditionalFlag::IsWoman => "is_woman",
            ConditionalFlag::IsFarmer => "is_farmer",
            ConditionalFlag::IsStudent => "is_student",
            ConditionalFlag::IsOrphan => "is_orphan",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConditionalFlag::IsDisabled => "Person with disability",
            ConditionalFlag::IsWidow => "Widow",
            ConditionalFlag::IsWoman => "Woman applicant",
            ConditionalFlag::IsFarmer => "Farmer",
            ConditionalFlag::IsStudent => "Student",
            ConditionalFlag::IsOrphan => "Orphan",
        }
    }
}

/// Boolean attributes of the citizen, mirroring [`Conditionals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFlags {
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_widow: bool,
    #[serde(default)]
    pub is_woman: bool,
    #[serde(default)]
    pub is_farmer: bool,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_orphan: bool,
}

impl ProfileFlags {
    pub fn has(&self, flag: ConditionalFlag) -> bool {
        match flag {
            ConditionalFlag::IsDisabled => self.is_disabled,
            ConditionalFlag::IsWidow => self.is_widow,
            ConditionalFlag::IsWoman => self.is_woman,
            ConditionalFlag::IsFarmer => self.is_farmer,
            ConditionalFlag::IsStudent => self.is_student,
            ConditionalFlag::IsOrphan => self.is_orphan,
        }
    }
}

/// Citizen attributes for a single evaluation.
///
/// Callers validate values before evaluation (see `intake`); the engine assumes a
/// non-negative, finite income and trimmed strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: String,
    pub occupation: String,
    pub annual_income: f64,
    pub state: String,
    pub category: String,
    #[serde(flatten)]
    pub flags: ProfileFlags,
}

/// Canonical document types the engine can track possession of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalDocument {
    Identity,
    BankAccount,
    IncomeProof,
    CategoryProof,
}

/// Which canonical documents the citizen already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    #[serde(default)]
    pub aadhaar: bool,
    #[serde(default)]
    pub bank_account: bool,
    #[serde(default)]
    pub income_certificate: bool,
    #[serde(default)]
    pub caste_certificate: bool,
}

impl DocumentStatus {
    pub fn holds(&self, document: CanonicalDocument) -> bool {
        match document {
            CanonicalDocument::Identity => self.aadhaar,
            CanonicalDocument::BankAccount => self.bank_account,
            CanonicalDocument::IncomeProof => self.income_certificate,
            CanonicalDocument::CategoryProof => self.caste_certificate,
        }
    }
}

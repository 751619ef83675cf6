use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{DocumentStatus, UserProfile};
use super::intake::{ProfileGuard, ProfileSubmission, ProfileViolation};

/// Errors raised while importing a CSV of citizen profiles.
#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read profile export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: column '{column}' has unrecognized yes/no value '{value}'")]
    InvalidFlag {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: {source}")]
    Profile {
        row: usize,
        #[source]
        source: ProfileViolation,
    },
}

/// One validated CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProfile {
    pub name: String,
    pub profile: UserProfile,
    pub documents: DocumentStatus,
}

/// Reads profiles from a CSV export and validates each row through [`ProfileGuard`].
pub struct ProfileImporter {
    guard: ProfileGuard,
}

impl Default for ProfileImporter {
    fn default() -> Self {
        Self::new(ProfileGuard::default())
    }
}

impl ProfileImporter {
    pub fn new(guard: ProfileGuard) -> Self {
        Self { guard }
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<ImportedProfile>, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<Vec<ImportedProfile>, ProfileImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut profiles = Vec::new();

        for (index, record) in csv_reader.deserialize::<ProfileRow>().enumerate() {
            // header is line 1
            let row = index + 2;
            let raw = record?;
            profiles.push(raw.into_imported(row, &self.guard)?);
        }

        Ok(profiles)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    name: String,
    age: i64,
    gender: String,
    occupation: String,
    annual_income: f64,
    state: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_disabled: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_widow: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_woman: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_farmer: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_student: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_orphan: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    aadhaar: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bank_account: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    income_certificate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    caste_certificate: Option<String>,
}

impl ProfileRow {
    fn into_imported(
        self,
        row: usize,
        guard: &ProfileGuard,
    ) -> Result<ImportedProfile, ProfileImportError> {
        let flag = |column: &'static str,
                    value: Option<&str>|
         -> Result<Option<bool>, ProfileImportError> {
            match value {
                None => Ok(None),
                Some(raw) => parse_yes_no(raw).map(Some).ok_or_else(|| {
                    ProfileImportError::InvalidFlag {
                        row,
                        column,
                        value: raw.to_string(),
                    }
                }),
            }
        };

        let documents = DocumentStatus {
            aadhaar: flag("aadhaar", self.aadhaar.as_deref())?.unwrap_or(false),
            bank_account: flag("bank_account", self.bank_account.as_deref())?.unwrap_or(false),
            income_certificate: flag("income_certificate", self.income_certificate.as_deref())?
                .unwrap_or(false),
            caste_certificate: flag("caste_certificate", self.caste_certificate.as_deref())?
                .unwrap_or(false),
        };

        let submission = ProfileSubmission {
            age: self.age,
            gender: self.gender,
            occupation: self.occupation,
            annual_income: self.annual_income,
            state: self.state,
            category: self.category,
            is_disabled: flag("is_disabled", self.is_disabled.as_deref())?,
            is_widow: flag("is_widow", self.is_widow.as_deref())?,
            is_woman: flag("is_woman", self.is_woman.as_deref())?,
            is_farmer: flag("is_farmer", self.is_farmer.as_deref())?,
            is_student: flag("is_student", self.is_student.as_deref())?,
            is_orphan: flag("is_orphan", self.is_orphan.as_deref())?,
        };

        let profile = guard
            .profile_from_submission(submission)
            .map_err(|source| ProfileImportError::Profile { row, source })?;

        let name = if self.name.is_empty() {
            format!("row-{row}")
        } else {
            self.name
        };

        Ok(ImportedProfile {
            name,
            profile,
            documents,
        })
    }
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

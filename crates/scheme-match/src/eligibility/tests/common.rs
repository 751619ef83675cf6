use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::domain::{
    Conditionals, DocumentStatus, EligibilityCriteria, ProfileFlags, Scheme, SchemeId,
    UserProfile,
};
use crate::eligibility::intake::ProfileSubmission;
use crate::eligibility::{
    EligibilityEngine, EligibilityService, ExplanationTemplates, SchemeCatalog,
};

pub(super) fn scheme(id: &str, criteria: EligibilityCriteria) -> Scheme {
    Scheme {
        id: SchemeId(id.to_string()),
        name: format!("Scheme {id}"),
        ministry: "Ministry of Rural Development".to_string(),
        eligibility: Some(criteria),
        documents: vec!["Aadhaar Card".to_string()],
        benefits: None,
    }
}

/// Adult farmers under an income ceiling.
pub(super) fn farmer_scheme() -> Scheme {
    scheme(
        "farmer-support",
        EligibilityCriteria {
            min_age: Some(18),
            income_limit: Some(200_000.0),
            occupations: Some(vec!["farmer".to_string()]),
            ..EligibilityCriteria::default()
        },
    )
}

pub(super) fn widow_pension() -> Scheme {
    scheme(
        "widow-pension",
        EligibilityCriteria {
            min_age: Some(40),
            max_age: Some(79),
            income_limit: Some(100_000.0),
            gender: Some("female".to_string()),
            states: Some(vec!["All".to_string()]),
            conditionals: Conditionals {
                is_widow: true,
                is_woman: true,
                ..Conditionals::default()
            },
            ..EligibilityCriteria::default()
        },
    )
}

pub(super) fn profile(age: u32, income: f64, occupation: &str) -> UserProfile {
    UserProfile {
        age,
        gender: "male".to_string(),
        occupation: occupation.to_string(),
        annual_income: income,
        state: "Odisha".to_string(),
        category: "OBC".to_string(),
        flags: ProfileFlags::default(),
    }
}

pub(super) fn widow_profile() -> UserProfile {
    UserProfile {
        age: 55,
        gender: "female".to_string(),
        occupation: "homemaker".to_string(),
        annual_income: 60_000.0,
        state: "Bihar".to_string(),
        category: "SC".to_string(),
        flags: ProfileFlags {
            is_widow: true,
            is_woman: true,
            ..ProfileFlags::default()
        },
    }
}

pub(super) fn no_documents() -> DocumentStatus {
    DocumentStatus::default()
}

pub(super) fn templates() -> ExplanationTemplates {
    ExplanationTemplates::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(templates())
}

pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        age: 45,
        gender: "male".to_string(),
        occupation: "farmer".to_string(),
        annual_income: 120_000.0,
        state: "Odisha".to_string(),
        category: "OBC".to_string(),
        is_disabled: None,
        is_widow: None,
        is_woman: None,
        is_farmer: Some(true),
        is_student: None,
        is_orphan: None,
    }
}

pub(super) fn catalog() -> SchemeCatalog {
    SchemeCatalog::new(vec![farmer_scheme(), widow_pension()]).expect("fixture catalog is valid")
}

pub(super) fn service() -> Arc<EligibilityService> {
    Arc::new(EligibilityService::new(catalog(), engine()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("valid json")
}

use std::io::Cursor;

use scheme_match::eligibility::{
    evaluate_catalog, DocumentStatus, EligibilityEngine, EligibilityService, ProfileImporter,
    ProfileSubmission, SchemeCatalog, SchemeId,
};

fn standard_service() -> EligibilityService {
    let catalog = SchemeCatalog::standard().expect("bundled catalog parses");
    EligibilityService::new(catalog, EligibilityEngine::default())
}

fn widow_submission() -> ProfileSubmission {
    ProfileSubmission {
        age: 55,
        gender: "female".to_string(),
        occupation: "homemaker".to_string(),
        annual_income: 60_000.0,
        state: "Bihar".to_string(),
        category: "SC".to_string(),
        is_disabled: None,
        is_widow: Some(true),
        is_woman: None,
        is_farmer: None,
        is_student: None,
        is_orphan: None,
    }
}

fn id(raw: &str) -> SchemeId {
    SchemeId(raw.to_string())
}

#[test]
fn widow_matches_pension_and_housing_schemes() {
    let documents = DocumentStatus {
        aadhaar: true,
        bank_account: true,
        ..DocumentStatus::default()
    };

    let report = standard_service()
        .evaluate_all(widow_submission(), documents)
        .expect("profile accepted");

    assert_eq!(report.summary.total_schemes, 10);
    assert_eq!(report.summary.eligible, 2);
    assert_eq!(report.summary.best_match, Some(id("ignwps")));
    // igndps, ignoaps, sukanya-samriddhi, pm-kisan and stand-up-india rank at 60 or above
    assert_eq!(report.summary.near_misses, 5);

    let eligible: Vec<&SchemeId> = report
        .results
        .iter()
        .take_while(|result| result.is_eligible)
        .map(|result| &result.scheme_id)
        .collect();
    assert_eq!(eligible, vec![&id("ignwps"), &id("pm-awas-gramin")]);

    let pension = &report.results[0];
    assert_eq!(pension.confidence_score, 100);
    assert!(pension.missing_requirements.is_empty());
    assert_eq!(
        pension.document_checklist.user_has,
        vec!["Aadhaar Card".to_string(), "Bank Account Details".to_string()]
    );
    assert_eq!(
        pension.document_checklist.missing,
        vec![
            "Death Certificate of Husband".to_string(),
            "Income Certificate".to_string()
        ]
    );
}

#[test]
fn ranking_prefers_comfortable_income_margins() {
    let ranked = standard_service()
        .rank(widow_submission(), 90)
        .expect("profile accepted");

    let scores: Vec<(&str, u8)> = ranked
        .iter()
        .map(|entry| (entry.scheme_id.as_str(), entry.ranking_score))
        .collect();
    assert_eq!(scores, vec![("pm-awas-gramin", 97), ("ignwps", 91)]);
    assert!(ranked.iter().all(|entry| entry.is_eligible));
}

#[test]
fn student_scholarship_requires_student_flag() {
    let mut student = ProfileSubmission {
        age: 20,
        gender: "male".to_string(),
        occupation: "student".to_string(),
        annual_income: 100_000.0,
        state: "Uttar Pradesh".to_string(),
        category: "SC".to_string(),
        is_disabled: None,
        is_widow: None,
        is_woman: None,
        is_farmer: None,
        is_student: Some(true),
        is_orphan: None,
    };
    let service = standard_service();
    let scholarship = id("post-matric-scholarship-sc");

    let result = service
        .evaluate_scheme(&scholarship, student.clone(), DocumentStatus::default())
        .expect("scheme evaluated");
    assert!(result.is_eligible);

    student.is_student = Some(false);
    let result = service
        .evaluate_scheme(&scholarship, student, DocumentStatus::default())
        .expect("scheme evaluated");
    assert!(!result.is_eligible);
    assert_eq!(result.missing_requirements, vec!["is_student".to_string()]);
    assert!(result
        .failed_reasons
        .iter()
        .any(|reason| reason.contains("Student")));
}

#[test]
fn schemes_without_criteria_sort_last_as_incomplete() {
    let catalog = SchemeCatalog::from_json_str(
        r#"[
            {"id": "draft", "name": "Draft Scheme", "documents": ["Aadhaar Card"]},
            {"id": "open", "name": "Open Scheme", "eligibility": {}}
        ]"#,
    )
    .expect("catalog parses");
    let profile = scheme_match::eligibility::ProfileGuard::default()
        .profile_from_submission(widow_submission())
        .expect("profile accepted");

    let results = evaluate_catalog(
        &EligibilityEngine::default(),
        &catalog,
        &profile,
        &DocumentStatus::default(),
    );

    assert_eq!(results[0].scheme_id, id("open"));
    assert!(results[0].is_eligible);
    let draft = &results[1];
    assert!(!draft.is_eligible);
    assert_eq!(draft.confidence_score, 0);
    assert_eq!(draft.missing_requirements, vec!["eligibility_data".to_string()]);
    assert_eq!(
        draft.failed_reasons,
        vec!["Scheme eligibility data is incomplete".to_string()]
    );
    assert_eq!(draft.document_checklist.missing, vec!["Aadhaar Card".to_string()]);
}

#[test]
fn imported_profiles_flow_through_the_service() {
    let csv = "name,age,gender,occupation,annual_income,state,category,is_disabled,is_widow,is_woman,is_farmer,is_student,is_orphan,aadhaar,bank_account,income_certificate,caste_certificate\n\
Ramesh,45,male,farmer,120000,Odisha,OBC,,,,yes,,,yes,yes,,\n\
Kamala,55,female,homemaker,60000,Bihar,SC,,yes,,,,,yes,,,\n";

    let rows = ProfileImporter::default()
        .import_reader(Cursor::new(csv))
        .expect("import succeeds");
    let service = standard_service();

    let best: Vec<Option<SchemeId>> = rows
        .iter()
        .map(|row| {
            service
                .match_profile(&row.profile, &row.documents)
                .summary
                .best_match
        })
        .collect();
    assert_eq!(best, vec![Some(id("kalia-odisha")), Some(id("ignwps"))]);
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use scheme_match::eligibility::{
    EligibilityEngine, EligibilityService, EvaluationRequest, SchemeCatalog,
};
use scheme_match::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the service over the configured catalog, or the bundled one when no path is set.
pub(crate) fn build_service(catalog_path: Option<&Path>) -> Result<EligibilityService, AppError> {
    let catalog = SchemeCatalog::load(catalog_path)?;
    Ok(EligibilityService::new(
        catalog,
        EligibilityEngine::default(),
    ))
}

/// Profile files share the body shape of `POST /api/v1/eligibility`.
pub(crate) fn load_profile_request(path: &Path) -> Result<EvaluationRequest, AppError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        AppError::Input(format!(
            "failed to parse profile file '{}' ({err})",
            path.display()
        ))
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

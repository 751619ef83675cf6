use crate::infra::{build_service, load_profile_request, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use scheme_match::eligibility::{
    EligibilityReport, EligibilityResult, GuidanceStatus, MatchSummary, ProfileImporter,
    RankedScheme,
};
use scheme_match::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON file holding `profile`, optional `documents` and optional `min_confidence`
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scheme catalog JSON to use instead of the bundled catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Only print the first N results
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding the profile to rank schemes for
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scheme catalog JSON to use instead of the bundled catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Hide schemes ranked below this score
    #[arg(long, default_value_t = 0)]
    pub(crate) min_score: u8,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of citizen profiles
    #[arg(long)]
    pub(crate) profiles: PathBuf,
    /// Scheme catalog JSON to use instead of the bundled catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        catalog,
        top,
        today,
        json,
    } = args;

    let service = build_service(catalog.as_deref())?;
    let request = load_profile_request(&profile)?;
    let mut report = service
        .evaluate_all(request.profile, request.documents)
        .map_err(|err| AppError::Input(err.to_string()))?;
    if let Some(min_confidence) = request.min_confidence {
        report = report.retain_confident(min_confidence);
    }

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Input(format!("failed to render report ({err})")))?;
        println!("{rendered}");
        return Ok(());
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    for line in render_match_report(&report, top, today) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        profile,
        catalog,
        min_score,
    } = args;

    let service = build_service(catalog.as_deref())?;
    let request = load_profile_request(&profile)?;
    let ranked = service
        .rank(request.profile, min_score)
        .map_err(|err| AppError::Input(err.to_string()))?;

    println!("Scheme ranking (min score {min_score})");
    if ranked.is_empty() {
        println!("- no schemes at or above the minimum score");
    }
    for entry in &ranked {
        println!("{}", render_ranked_entry(entry));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { profiles, catalog } = args;

    let service = build_service(catalog.as_deref())?;
    let imported = ProfileImporter::default().import_path(&profiles)?;

    println!(
        "Batch eligibility run: {} profiles against {} schemes",
        imported.len(),
        service.catalog().len()
    );
    for row in &imported {
        let report = service.match_profile(&row.profile, &row.documents);
        println!("{}", render_batch_line(&row.name, &report.summary));
    }
    Ok(())
}

pub(crate) fn render_match_report(
    report: &EligibilityReport,
    top: Option<usize>,
    today: NaiveDate,
) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![
        format!("Scheme eligibility report ({today})"),
        format!(
            "- evaluated {} | eligible {} | near misses {}",
            summary.total_schemes, summary.eligible, summary.near_misses
        ),
        format!(
            "- Best match: {}",
            summary
                .best_match
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string())
        ),
        "Results:".to_string(),
    ];

    let limit = top.unwrap_or(report.results.len());
    for result in report.results.iter().take(limit) {
        lines.extend(render_result(result));
    }
    lines
}

fn render_result(result: &EligibilityResult) -> Vec<String> {
    let verdict = if result.is_eligible {
        "eligible"
    } else {
        "not eligible"
    };
    let mut lines = vec![
        format!(
            "  [{verdict}] {} ({}%) {}",
            result.scheme_id, result.confidence_score, result.scheme_name
        ),
        format!("    {}", result.explanation),
    ];

    let missing = &result.document_checklist.missing;
    if !missing.is_empty() {
        lines.push(format!("    Documents to arrange: {}", missing.join(", ")));
    }

    let failed: Vec<_> = result
        .improvement_guidance
        .iter()
        .filter(|entry| entry.status == GuidanceStatus::Failed)
        .collect();
    if !failed.is_empty() {
        lines.push("    Next steps:".to_string());
        for entry in failed {
            match &entry.diff {
                Some(diff) => lines.push(format!(
                    "      - {}: {} ({diff})",
                    entry.condition, entry.action
                )),
                None => lines.push(format!("      - {}: {}", entry.condition, entry.action)),
            }
        }
    }
    lines
}

fn render_ranked_entry(entry: &RankedScheme) -> String {
    let marker = if entry.is_eligible { " [eligible]" } else { "" };
    format!(
        "  {:>3}  {}  {}{marker}",
        entry.ranking_score, entry.scheme_id, entry.scheme_name
    )
}

fn render_batch_line(name: &str, summary: &MatchSummary) -> String {
    let best = summary
        .best_match
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "- {name}: eligible {}/{} | near misses {} | best match {best}",
        summary.eligible, summary.total_schemes, summary.near_misses
    )
}

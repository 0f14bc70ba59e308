//! Report Aggregator — derives the overall score, completeness, work estimate
//! and summary from the per-section assessments.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use super::evaluator::SectionAssessment;
use super::parser::Severity;
use super::sections::RequiredSection;

/// Days from analysis to the suggested submission-readiness target.
const TARGET_DATE_WINDOW_DAYS: i64 = 90;

/// The full analysis report returned by POST /api/analyze.
/// Built once per request, returned, and discarded; never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub overall_score: u32,
    pub sections_found: String,
    pub completeness: String,
    pub critical_issues: usize,
    pub analysis_time: String,
    pub sections: Vec<SectionAssessment>,
    pub summary_data: SummaryData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub headline: String,
    pub details: String,
    pub estimated_work: String,
    pub target_date: String,
    pub priority_actions: Vec<String>,
}

/// Aggregates assessments into the final report. `found_count` is how many
/// required sections the matcher located; `elapsed` is wall time since the
/// upload arrived.
pub fn build_report(
    assessments: Vec<SectionAssessment>,
    found_count: usize,
    elapsed: Duration,
) -> Report {
    let total = RequiredSection::ALL.len();

    let scores: Vec<u32> = assessments
        .iter()
        .filter_map(|a| a.score.map(u32::from))
        .collect();
    let overall_score = if scores.is_empty() {
        0
    } else {
        (scores.iter().sum::<u32>() as f64 / scores.len() as f64).round() as u32
    };

    let critical_issues = count_severity(&assessments, Severity::Critical);

    let summary_data = SummaryData {
        headline: headline(overall_score).to_string(),
        details: summary_details(critical_issues),
        estimated_work: estimated_work(&assessments),
        target_date: target_date(),
        priority_actions: priority_actions(&assessments),
    };

    Report {
        overall_score,
        sections_found: format!("{found_count}/{total}"),
        completeness: format!("{:.1}%", found_count as f64 / total as f64 * 100.0),
        critical_issues,
        analysis_time: format!("{}s", elapsed.as_secs()),
        sections: assessments,
        summary_data,
    }
}

fn count_severity(assessments: &[SectionAssessment], severity: Severity) -> usize {
    assessments.iter().filter(|a| a.severity == severity).count()
}

fn headline(score: u32) -> &'static str {
    if score >= 80 {
        "Your submission is in good shape"
    } else if score >= 60 {
        "Your submission needs improvements"
    } else {
        "Your submission has critical gaps"
    }
}

fn summary_details(critical: usize) -> String {
    if critical > 0 {
        format!("Critical gaps identified in {critical} section(s). Address these before submission.")
    } else {
        "Focus on highlighted sections to improve your submission.".to_string()
    }
}

/// Rough remediation estimate: 2h per critical section, 1h per high, floor 1h.
fn estimated_work(assessments: &[SectionAssessment]) -> String {
    let critical = count_severity(assessments, Severity::Critical);
    let high = count_severity(assessments, Severity::High);
    let hours = (critical * 2 + high).max(1);
    format!("{hours} hours")
}

fn target_date() -> String {
    (Utc::now() + chrono::Duration::days(TARGET_DATE_WINDOW_DAYS))
        .format("%b %-d, %Y")
        .to_string()
}

/// Up to the first three critical sections, in enumeration order.
fn priority_actions(assessments: &[SectionAssessment]) -> Vec<String> {
    assessments
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .take(3)
        .map(|a| format!("Complete {} section", a.section.title()))
        .collect()
}

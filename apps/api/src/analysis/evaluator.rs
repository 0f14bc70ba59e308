//! Section Evaluator — scores each required section, either by asking the
//! model about the extracted span or by synthesizing missing-section guidance.
//!
//! Present sections are evaluated concurrently: calls are independent, so they
//! run under a semaphore bound with a per-call deadline. Dropping the request
//! future aborts any in-flight calls via the JoinSet. A failed call degrades
//! that one section to a score-absent placeholder instead of aborting the
//! whole report.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::error;

use crate::llm_client::{prompts::REGULATORY_EXPERT_SYSTEM, CompletionClient, SamplingParams};

use super::guidance::missing_section_guidance;
use super::parser::{parse_assessment, Severity};
use super::prompts::build_section_prompt;
use super::sections::{ExtractedSections, RequiredSection};

/// Max model calls in flight for a single analysis request.
const MAX_CONCURRENT_CALLS: usize = 3;

/// Deadline for a single section analysis call, retries included.
const SECTION_CALL_TIMEOUT: Duration = Duration::from_secs(90);

/// Sampling for section analysis. Low temperature keeps scoring consistent
/// across runs of the same document.
const ANALYSIS_SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.3,
    max_tokens: 1024,
};

/// Final assessment of one required section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionAssessment {
    #[serde(rename = "title")]
    pub section: RequiredSection,
    pub score: Option<u8>,
    pub severity: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
}

/// Evaluates every required section and returns one assessment per section,
/// in enumeration order, regardless of whether it was found in the document.
pub async fn evaluate_sections(
    llm: &Arc<dyn CompletionClient>,
    extracted: &ExtractedSections,
) -> Vec<SectionAssessment> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_CALLS));
    let mut tasks: JoinSet<(RequiredSection, SectionAssessment)> = JoinSet::new();

    for section in RequiredSection::ALL {
        let Some(content) = extracted.get(&section) else {
            continue;
        };
        let prompt = build_section_prompt(section, content);
        let llm = Arc::clone(llm);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("analysis semaphore closed");
            (section, analyze_section(llm.as_ref(), section, &prompt).await)
        });
    }

    let mut by_section: HashMap<RequiredSection, SectionAssessment> = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((section, assessment)) => {
                by_section.insert(section, assessment);
            }
            Err(e) => error!("section analysis task failed: {e}"),
        }
    }

    RequiredSection::ALL
        .iter()
        .map(|&section| {
            by_section.remove(&section).unwrap_or_else(|| {
                if extracted.contains_key(&section) {
                    // Task panicked or was aborted; degrade rather than drop
                    // the section from the report.
                    unavailable_assessment(section)
                } else {
                    missing_assessment(section)
                }
            })
        })
        .collect()
}

async fn analyze_section(
    llm: &dyn CompletionClient,
    section: RequiredSection,
    prompt: &str,
) -> SectionAssessment {
    let reply = timeout(
        SECTION_CALL_TIMEOUT,
        llm.complete(REGULATORY_EXPERT_SYSTEM, prompt, ANALYSIS_SAMPLING),
    )
    .await;

    match reply {
        Ok(Ok(text)) => {
            let parsed = parse_assessment(&text);
            SectionAssessment {
                section,
                score: Some(parsed.score),
                severity: parsed.severity,
                description: parsed.description,
                recommendations: parsed.recommendations,
            }
        }
        Ok(Err(e)) => {
            error!("model call failed for {}: {e}", section.title());
            unavailable_assessment(section)
        }
        Err(_) => {
            error!(
                "model call for {} exceeded {}s deadline",
                section.title(),
                SECTION_CALL_TIMEOUT.as_secs()
            );
            unavailable_assessment(section)
        }
    }
}

fn missing_assessment(section: RequiredSection) -> SectionAssessment {
    SectionAssessment {
        section,
        score: None,
        severity: Severity::Critical,
        description: format!(
            "CRITICAL: {} section is missing from your document.",
            section.title()
        ),
        recommendations: missing_section_guidance(section),
    }
}

/// Placeholder for a section that was found but could not be analyzed.
/// Medium severity and an absent score keep it out of the critical count,
/// the work estimate, and the overall-score mean.
fn unavailable_assessment(section: RequiredSection) -> SectionAssessment {
    SectionAssessment {
        section,
        score: None,
        severity: Severity::Medium,
        description: format!(
            "The {} section was found but could not be analyzed. Re-run the analysis to score it.",
            section.title()
        ),
        recommendations: vec!["Re-run the analysis for this document".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    /// Mock backend returning the same reply for every call.
    struct FixedReplyClient(&'static str);

    #[async_trait]
    impl CompletionClient for FixedReplyClient {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _params: SamplingParams,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// Mock backend that always fails.
    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _params: SamplingParams,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn extracted_with(sections: &[(RequiredSection, &str)]) -> ExtractedSections {
        sections
            .iter()
            .map(|&(s, text)| (s, text.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_every_required_section_appears_exactly_once_in_order() {
        let llm: Arc<dyn CompletionClient> = Arc::new(FixedReplyClient("SCORE: 70"));
        let extracted = extracted_with(&[(RequiredSection::Labeling, "label text")]);

        let assessments = evaluate_sections(&llm, &extracted).await;

        assert_eq!(assessments.len(), 6);
        for (assessment, expected) in assessments.iter().zip(RequiredSection::ALL) {
            assert_eq!(assessment.section, expected);
        }
    }

    #[tokio::test]
    async fn test_missing_sections_get_critical_guidance() {
        let llm: Arc<dyn CompletionClient> = Arc::new(FixedReplyClient("SCORE: 70"));
        let assessments = evaluate_sections(&llm, &ExtractedSections::new()).await;

        for assessment in &assessments {
            assert_eq!(assessment.score, None);
            assert_eq!(assessment.severity, Severity::Critical);
            assert!(assessment.description.contains("missing from your document"));
            assert_eq!(assessment.recommendations.len(), 5);
        }
    }

    #[tokio::test]
    async fn test_present_sections_are_scored_from_model_reply() {
        let llm: Arc<dyn CompletionClient> = Arc::new(FixedReplyClient(
            "SCORE: 90\nSEVERITY: low\nDESCRIPTION: Well documented.\nRECOMMENDATIONS:\n- Keep current format",
        ));
        let extracted = extracted_with(&[
            (RequiredSection::IntendedUse, "use text"),
            (RequiredSection::Labeling, "label text"),
        ]);

        let assessments = evaluate_sections(&llm, &extracted).await;

        let scored: Vec<_> = assessments.iter().filter(|a| a.score.is_some()).collect();
        assert_eq!(scored.len(), 2);
        for assessment in scored {
            assert_eq!(assessment.score, Some(90));
            assert_eq!(assessment.severity, Severity::Low);
            assert_eq!(assessment.description, "Well documented.");
            assert_eq!(assessment.recommendations, vec!["Keep current format"]);
        }
    }

    /// Full pipeline over a document carrying only two of the six sections,
    /// with the model scoring both at 90.
    #[tokio::test]
    async fn test_partial_document_end_to_end() {
        use super::super::report::build_report;
        use super::super::sections::identify_sections;

        let document = "\
Intended Use
For single-patient urinary drainage.

Labeling
Labels follow 21 CFR 801.";

        let extracted = identify_sections(document);
        assert_eq!(extracted.len(), 2);

        let llm: Arc<dyn CompletionClient> = Arc::new(FixedReplyClient(
            "SCORE: 90\nSEVERITY: low\nDESCRIPTION: Adequate.\nRECOMMENDATIONS:\n- None needed",
        ));
        let assessments = evaluate_sections(&llm, &extracted).await;
        let report = build_report(assessments, extracted.len(), Duration::from_secs(47));

        assert_eq!(report.overall_score, 90);
        assert_eq!(report.sections_found, "2/6");
        assert_eq!(report.completeness, "33.3%");
        assert_eq!(report.critical_issues, 4);
        assert_eq!(report.analysis_time, "47s");
    }

    #[tokio::test]
    async fn test_model_failure_degrades_only_that_section() {
        let llm: Arc<dyn CompletionClient> = Arc::new(FailingClient);
        let extracted = extracted_with(&[(RequiredSection::DeviceDescription, "device text")]);

        let assessments = evaluate_sections(&llm, &extracted).await;

        assert_eq!(assessments.len(), 6);
        let degraded = &assessments[0];
        assert_eq!(degraded.section, RequiredSection::DeviceDescription);
        assert_eq!(degraded.score, None);
        assert_eq!(degraded.severity, Severity::Medium);
        assert!(degraded.description.contains("could not be analyzed"));
        // The other five are plain missing-section assessments
        assert!(assessments[1..]
            .iter()
            .all(|a| a.severity == Severity::Critical));
    }
}

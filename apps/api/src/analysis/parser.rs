//! Response Parser — converts the model's line-oriented reply
//! (SCORE / SEVERITY / DESCRIPTION / RECOMMENDATIONS) into a typed record.
//!
//! Parsing is deliberately lenient: a malformed or absent line leaves the
//! default in place rather than failing the request. Every fallback is logged
//! so template drift in model output is visible to operators.

use serde::Serialize;
use tracing::warn;

/// Qualitative urgency of a section's compliance gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Parses a severity word from model output. Only the four known levels
    /// are accepted; anything else is rejected so the caller can fall back.
    pub fn parse(word: &str) -> Option<Severity> {
        match word.trim().to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// A model assessment of a single section, as parsed from its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAssessment {
    pub score: u8,
    pub severity: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl Default for ParsedAssessment {
    fn default() -> Self {
        Self {
            score: 50,
            severity: Severity::Medium,
            description: String::new(),
            recommendations: Vec::new(),
        }
    }
}

#[derive(PartialEq)]
enum Mode {
    None,
    Description,
    Recommendations,
}

/// Parses a model reply expected to follow the SCORE/SEVERITY/DESCRIPTION/
/// RECOMMENDATIONS template. Unrecognized or malformed lines never fail the
/// parse; the corresponding defaults (50, medium, "", []) survive instead.
pub fn parse_assessment(text: &str) -> ParsedAssessment {
    let mut result = ParsedAssessment::default();
    let mut mode = Mode::None;
    let mut matched_any = false;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("SCORE:") {
            matched_any = true;
            match rest.trim().parse::<i64>() {
                Ok(n) => result.score = n.clamp(0, 100) as u8,
                Err(_) => warn!("unparseable SCORE in model reply: {line:?}, keeping default"),
            }
        } else if let Some(rest) = line.strip_prefix("SEVERITY:") {
            matched_any = true;
            match Severity::parse(rest) {
                Some(severity) => result.severity = severity,
                None => warn!(
                    "unknown severity {:?} in model reply, keeping {}",
                    rest.trim(),
                    result.severity.as_str()
                ),
            }
        } else if let Some(rest) = line.strip_prefix("DESCRIPTION:") {
            matched_any = true;
            result.description = rest.trim().to_string();
            mode = Mode::Description;
        } else if line.strip_prefix("RECOMMENDATIONS:").is_some() {
            matched_any = true;
            mode = Mode::Recommendations;
        } else if line.starts_with('-') || line.starts_with('•') {
            if mode == Mode::Recommendations {
                result
                    .recommendations
                    .push(line.trim_start_matches(['-', '•']).trim().to_string());
            }
        } else if mode == Mode::Description && !line.is_empty() {
            if result.description.is_empty() {
                result.description = line.to_string();
            } else {
                result.description.push(' ');
                result.description.push_str(line);
            }
        }
    }

    if !matched_any {
        warn!("model reply matched no template lines, using defaults");
    }

    result
}

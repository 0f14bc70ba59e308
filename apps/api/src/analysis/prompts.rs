// Prompt constants for section analysis.
// The reply format here is what analysis::parser expects; keep them in sync.

use super::sections::RequiredSection;

/// Per-section analysis prompt. `{section_name}` and `{content}` are replaced
/// before sending.
pub const SECTION_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an FDA regulatory expert. Analyze this {section_name} section for a 510(k) submission.

SECTION CONTENT:
{content}

Provide:
1. A score from 0-100
2. Severity level: critical, high, medium, or low
3. Brief description (2-3 sentences)
4. 3-5 specific recommendations for improvement

Format your response as:
SCORE: [number]
SEVERITY: [level]
DESCRIPTION: [text]
RECOMMENDATIONS:
- [recommendation 1]
- [recommendation 2]
- [recommendation 3]"#;

/// Section spans are truncated to this many characters before prompting, to
/// keep long submissions inside the model's context budget.
pub const SECTION_CONTENT_LIMIT: usize = 3000;

pub fn build_section_prompt(section: RequiredSection, content: &str) -> String {
    SECTION_ANALYSIS_PROMPT_TEMPLATE
        .replace("{section_name}", section.title())
        .replace("{content}", truncate_chars(content, SECTION_CONTENT_LIMIT))
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

//! Section Matcher — partitions extracted document text into the required
//! 510(k) sections by scanning for heading keywords line by line.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// The six sections every 510(k) submission is expected to contain.
/// Fixed at process start; `ALL` defines the enumeration order used for
/// matcher tie-breaks and report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredSection {
    DeviceDescription,
    IntendedUse,
    SubstantialEquivalence,
    PerformanceTesting,
    Labeling,
    Biocompatibility,
}

impl RequiredSection {
    pub const ALL: [RequiredSection; 6] = [
        RequiredSection::DeviceDescription,
        RequiredSection::IntendedUse,
        RequiredSection::SubstantialEquivalence,
        RequiredSection::PerformanceTesting,
        RequiredSection::Labeling,
        RequiredSection::Biocompatibility,
    ];

    /// Heading as it appears in submissions and in the report.
    pub fn title(self) -> &'static str {
        match self {
            RequiredSection::DeviceDescription => "Device Description",
            RequiredSection::IntendedUse => "Intended Use",
            RequiredSection::SubstantialEquivalence => "Substantial Equivalence",
            RequiredSection::PerformanceTesting => "Performance Testing",
            RequiredSection::Labeling => "Labeling",
            RequiredSection::Biocompatibility => "Biocompatibility",
        }
    }
}

// Reports carry the human heading, not the variant name.
impl Serialize for RequiredSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title())
    }
}

/// Raw text span for each section whose heading was found in the document.
pub type ExtractedSections = HashMap<RequiredSection, String>;

/// Scans document text line by line and partitions it into named spans.
///
/// A line case-insensitively containing a required heading opens that section;
/// the previously open section (if any) is flushed first. Lines that match no
/// heading accumulate into the open section, or are dropped if none is open
/// yet. A heading that re-appears restarts its span, so the latest occurrence
/// wins. A line containing several headings resolves to the first in
/// `RequiredSection::ALL` order (list order, not positional proximity).
pub fn identify_sections(text: &str) -> ExtractedSections {
    let headings: Vec<(RequiredSection, String)> = RequiredSection::ALL
        .iter()
        .map(|&s| (s, s.title().to_lowercase()))
        .collect();

    let mut sections = ExtractedSections::new();
    let mut current: Option<RequiredSection> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line_lower = line.trim().to_lowercase();

        let matched = headings
            .iter()
            .find(|(_, heading)| line_lower.contains(heading))
            .map(|&(section, _)| section);

        match matched {
            Some(section) => {
                if let Some(open) = current {
                    sections.insert(open, buffer.join("\n"));
                }
                current = Some(section);
                buffer.clear();
            }
            None => {
                if current.is_some() {
                    buffer.push(line);
                }
            }
        }
    }

    if let Some(open) = current {
        sections.insert(open, buffer.join("\n"));
    }

    sections
}

//! Static remediation checklists returned when a required section is absent
//! from the submission. One five-item checklist per section.

use super::sections::RequiredSection;

pub fn missing_section_guidance(section: RequiredSection) -> Vec<String> {
    let items: &[&str] = match section {
        RequiredSection::DeviceDescription => &[
            "Include detailed physical and functional description",
            "Specify materials of construction",
            "Provide device specifications and dimensions",
            "Add diagrams or engineering drawings",
            "Reference applicable standards (ISO, ASTM)",
        ],
        RequiredSection::IntendedUse => &[
            "Define specific intended use statement",
            "Specify indications for use",
            "Identify patient population",
            "List contraindications",
            "Describe environment of use",
        ],
        RequiredSection::SubstantialEquivalence => &[
            "Identify legally marketed predicate device (K-number)",
            "Create side-by-side comparison table",
            "Demonstrate same intended use",
            "Show equivalent technological characteristics",
            "Provide performance data comparison",
        ],
        RequiredSection::PerformanceTesting => &[
            "Conduct bench testing per relevant standards",
            "Perform shelf life/stability testing (ASTM F1980)",
            "Validate sterilization if applicable",
            "Include statistical analysis of results",
            "Document pass/fail criteria",
        ],
        RequiredSection::Labeling => &[
            "Provide instructions for use",
            "Include warnings and precautions per 21 CFR 801",
            "Add storage conditions",
            "Include expiration dating",
            "Provide symbols explanation (ISO 15223-1)",
        ],
        RequiredSection::Biocompatibility => &[
            "Conduct biological risk assessment (ISO 10993-1)",
            "Perform cytotoxicity testing",
            "Test for sensitization and irritation",
            "Include material characterization",
            "Provide test reports from accredited labs",
        ],
    };

    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_a_five_item_checklist() {
        for section in RequiredSection::ALL {
            let guidance = missing_section_guidance(section);
            assert_eq!(guidance.len(), 5, "{} checklist", section.title());
        }
    }

    #[test]
    fn test_equivalence_guidance_names_predicate_device() {
        let guidance = missing_section_guidance(RequiredSection::SubstantialEquivalence);
        assert!(guidance[0].contains("predicate device"));
    }

    #[test]
    fn test_labeling_guidance_cites_cfr() {
        let guidance = missing_section_guidance(RequiredSection::Labeling);
        assert!(guidance.iter().any(|item| item.contains("21 CFR 801")));
    }
}

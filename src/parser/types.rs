use std::fmt;

/// Tag marking a scenario for human-driven execution.
///
/// The `gherkin` parser strips the leading `@`, so every tag literal in this
/// crate carries none either.
pub const MANUAL_TAG: &str = "manual";

/// One of the four execution contexts a run can walk through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTag {
    Pv,
    Iv,
    PPv,
    PIv,
}

impl OptionTag {
    /// Canonical tag string as it appears in feature files (minus the `@`).
    pub fn tag(self) -> &'static str {
        match self {
            OptionTag::Pv => "PV",
            OptionTag::Iv => "IV",
            OptionTag::PPv => "pPV",
            OptionTag::PIv => "pIV",
        }
    }

    /// Lowercase slug used in result filenames.
    pub fn slug(self) -> &'static str {
        match self {
            OptionTag::Pv => "pv",
            OptionTag::Iv => "iv",
            OptionTag::PPv => "ppv",
            OptionTag::PIv => "piv",
        }
    }

    /// Title shown on the wizard page.
    pub fn page_title(self) -> String {
        format!("Test Scenarios ({})", self.tag())
    }
}

impl fmt::Display for OptionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One manual scenario selected for the walkthrough. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRecord {
    /// Scenario title.
    pub name: String,
    /// Owning feature's title.
    pub feature_name: String,
    /// The feature's classification tag: the last tag on the feature, if any.
    pub feature_tag: String,
    /// The option tag this run was started with.
    pub option_tag: String,
    /// `"{keyword} {text}"` per step, in order.
    pub steps: Vec<String>,
    /// Precomputed operator-facing transcript, Examples tables included.
    pub rendered_text: String,
}

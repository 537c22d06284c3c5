//! Feature corpus loading.
//!
//! Walks a directory tree of Gherkin `.feature` files and extracts the
//! scenarios selected for a manual walkthrough run.

pub mod feature;
pub mod types;

pub use types::{OptionTag, ScenarioRecord, MANUAL_TAG};

use std::path::Path;

use anyhow::{Context, Result};
use gherkin::{Feature, GherkinEnv};
use walkdir::WalkDir;

/// File suffix identifying feature definitions.
const FEATURE_SUFFIX: &str = ".feature";

/// Load every matching scenario under `features_dir`.
///
/// Files are visited in sorted order, so the operator's walkthrough order is
/// reproducible across runs on an unchanged corpus: file order first, in-file
/// document order second. Any unreadable or malformed feature file aborts the
/// whole load; zero matches is not an error.
pub fn load_scenarios(features_dir: &Path, target: OptionTag) -> Result<Vec<ScenarioRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(features_dir).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!(
                "failed to scan features directory: {}",
                features_dir.display()
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(FEATURE_SUFFIX) {
            continue;
        }

        let document = Feature::parse_path(entry.path(), GherkinEnv::default())
            .with_context(|| format!("failed to parse feature file: {}", entry.path().display()))?;
        records.extend(feature::extract_scenarios(&document, target));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ALPHA: &str = r#"@area @alpha
Feature: Alpha

  @manual @PV
  Scenario: Alpha one
    Given the first precondition

  @manual @PV
  Scenario: Alpha two
    Given the second precondition
"#;

    const BETA: &str = r#"@area @beta
Feature: Beta

  @manual @PV
  Scenario: Beta one
    Given another precondition

  @manual @pIV
  Scenario: Beta install check
    Given an installed package
"#;

    fn names(records: &[ScenarioRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_load_walks_files_sorted_then_in_file_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Written out of order on purpose; the walk sorts by file name.
        fs::write(dir.path().join("b.feature"), BETA).expect("write");
        fs::write(dir.path().join("a.feature"), ALPHA).expect("write");

        let records = load_scenarios(dir.path(), OptionTag::Pv).expect("load");
        assert_eq!(names(&records), vec!["Alpha one", "Alpha two", "Beta one"]);

        // Stable across repeated loads of an unchanged corpus.
        let again = load_scenarios(dir.path(), OptionTag::Pv).expect("reload");
        assert_eq!(records, again);
    }

    #[test]
    fn test_extraction_count_matches_tagged_scenarios() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.feature"), ALPHA).expect("write");
        fs::write(dir.path().join("b.feature"), BETA).expect("write");

        assert_eq!(load_scenarios(dir.path(), OptionTag::Pv).expect("pv").len(), 3);
        assert_eq!(load_scenarios(dir.path(), OptionTag::PIv).expect("piv").len(), 1);
        assert_eq!(load_scenarios(dir.path(), OptionTag::Iv).expect("iv").len(), 0);
    }

    #[test]
    fn test_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("nested").join("a.feature"), ALPHA).expect("write");

        let records = load_scenarios(dir.path(), OptionTag::Pv).expect("load");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_feature_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.feature"), ALPHA).expect("write");
        fs::write(dir.path().join("notes.txt"), "not gherkin at all").expect("write");

        let records = load_scenarios(dir.path(), OptionTag::Pv).expect("load");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_malformed_feature_file_aborts_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.feature"), ALPHA).expect("write");
        fs::write(dir.path().join("broken.feature"), "this is not gherkin").expect("write");

        let err = load_scenarios(dir.path(), OptionTag::Pv).expect_err("load should fail");
        assert!(format!("{err:#}").contains("broken.feature"));
    }

    #[test]
    fn test_empty_corpus_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let records = load_scenarios(dir.path(), OptionTag::Pv).expect("load");
        assert!(records.is_empty());
    }
}

//! Result file naming and persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

use super::types::TestResult;
use crate::parser::OptionTag;

lazy_static! {
    /// Accepted result filenames. The pattern admits no path separators, so
    /// a validated name can never escape the output directory.
    static ref RESULT_FILENAME_RE: Regex =
        Regex::new(r"^manual-test-[A-Za-z0-9_.-]+-result\.json$").unwrap();
}

/// Filename for a result that stopped at `stop_millis`.
///
/// Collisions require two submissions sharing the same run parameters and
/// the same millisecond stop time; accepted as a narrow race.
pub fn result_filename(environment: &str, option_tag: OptionTag, stop_millis: i64) -> String {
    format!(
        "manual-test-{}-{}-{}-result.json",
        environment,
        option_tag.slug(),
        stop_millis
    )
}

/// Whether `filename` may be served back from the output directory.
pub fn is_valid_result_filename(filename: &str) -> bool {
    RESULT_FILENAME_RE.is_match(filename)
}

/// Serialize `result` as indented JSON and write it under `output_dir`,
/// which is created on demand.
///
/// The write goes through a temp file in the same directory plus a rename,
/// so the named file either holds the full JSON or does not exist.
pub fn write_result(output_dir: &Path, filename: &str, result: &TestResult) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;

    let mut tmp = tempfile::NamedTempFile::new_in(output_dir)
        .context("failed to create temporary result file")?;
    tmp.write_all(json.as_bytes())
        .context("failed to write result file")?;

    let path = output_dir.join(filename);
    tmp.persist(&path)
        .with_context(|| format!("failed to persist result file: {}", path.display()))?;
    Ok(path)
}

/// Read a persisted result back.
pub fn load_result(path: &Path) -> Result<TestResult> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read result file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("malformed result file: {}", path.display()))
}

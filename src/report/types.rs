//! Allure-compatible result records.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Operator verdict for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Broken,
    Skipped,
}

impl TestStatus {
    /// Parse a submitted verdict. Anything outside the closed set is
    /// rejected rather than written through.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "passed" => Some(TestStatus::Passed),
            "failed" => Some(TestStatus::Failed),
            "broken" => Some(TestStatus::Broken),
            "skipped" => Some(TestStatus::Skipped),
            _ => None,
        }
    }
}

/// Screenshot evidence attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Base64-encoded file content.
    pub content: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl Attachment {
    /// Encode an uploaded file, or `None` when the suffix is not an accepted
    /// image type.
    pub fn from_upload(filename: &str, content: &[u8]) -> Option<Self> {
        let mime_type = mime_for_filename(filename)?;
        Some(Self {
            name: filename.to_string(),
            content: BASE64.encode(content),
            mime_type: mime_type.to_string(),
        })
    }
}

/// Classify an upload by filename suffix. JPEG and PNG are the only evidence
/// types accepted; everything else is dropped by the caller.
pub fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        Some("image/jpeg")
    } else if lower.ends_with(".png") {
        Some("image/png")
    } else {
        None
    }
}

/// Key/value metadata on a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Label set for one submission. The order is part of the wire format:
/// feature, test tag, manual marker, option tag, comments.
pub fn labels(feature_name: &str, test_tag: &str, option_tag: &str, comments: &str) -> Vec<Label> {
    vec![
        Label::new("feature", feature_name),
        Label::new("tag", test_tag),
        Label::new("tag", "manual"),
        Label::new("tag", option_tag),
        Label::new("comments", comments),
    ]
}

/// One persisted manual-test outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Caller-supplied identifier: the submitted test tag. Not generated,
    /// and not guaranteed unique across submissions sharing a tag.
    pub uuid: String,
    pub name: String,
    pub status: TestStatus,
    pub attachments: Vec<Attachment>,
    pub labels: Vec<Label>,
    /// Epoch milliseconds.
    pub start: i64,
    /// Epoch milliseconds.
    pub stop: i64,
}

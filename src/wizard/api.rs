//! Wizard request handlers.
//!
//! Renders the current scenario, accepts result submissions, and serves the
//! generated result files back for download.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use thiserror::Error;

use super::shutdown::ShutdownGate;
use crate::parser::OptionTag;
use crate::report::{self, Attachment, TestResult, TestStatus};
use crate::session::WalkthroughSession;

const INDEX_TEMPLATE: &str = include_str!("ui/index.html");
const SCENARIO_TEMPLATE: &str = include_str!("ui/scenario.html");
const COMPLETE_TEMPLATE: &str = include_str!("ui/complete.html");
const PROCESSING_TEMPLATE: &str = include_str!("ui/processing.html");
const STYLE: &str = include_str!("ui/style.css");

/// Shared state for the wizard handlers
pub struct WizardState {
    pub session: WalkthroughSession,
    pub gate: ShutdownGate,
    pub option_tag: OptionTag,
    pub environment: String,
    pub output_dir: PathBuf,
}

/// Request-level failures, mapped onto plain-text HTTP error responses.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{0}")]
    BadRequest(String),
    #[error("file not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WizardError {
    fn into_response(self) -> Response {
        let status = match &self {
            WizardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WizardError::NotFound => StatusCode::NOT_FOUND,
            WizardError::Internal(err) => {
                log::error!("request failed: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// GET / - render the current scenario, or the completion view.
///
/// Observing a completed session here is what schedules the shutdown; the
/// gate makes that idempotent under concurrent renders.
pub async fn render_current(State(state): State<Arc<WizardState>>) -> Html<String> {
    let page = render_page(&state);

    if state.session.is_complete() && state.gate.fire() {
        log::info!("all scenarios processed; shutdown scheduled");
    }

    Html(page)
}

/// POST /generate - persist a submitted result and advance the session.
pub async fn submit_result(
    State(state): State<Arc<WizardState>>,
    multipart: Multipart,
) -> Result<Html<String>, WizardError> {
    let form = read_submission(multipart).await?;

    let status = TestStatus::parse(&form.test_status)
        .ok_or_else(|| WizardError::BadRequest(format!("unknown verdict: {}", form.test_status)))?;

    let now = chrono::Utc::now().timestamp_millis();
    let start = parse_start_timestamp(form.start_timestamp.as_deref(), now)?;

    let mut attachments = Vec::new();
    for (filename, bytes) in &form.uploads {
        match Attachment::from_upload(filename, bytes) {
            Some(attachment) => attachments.push(attachment),
            None => log::warn!("dropping attachment with unsupported type: {filename}"),
        }
    }

    let stop = chrono::Utc::now().timestamp_millis();
    let result = TestResult {
        uuid: form.test_tag.clone(),
        name: form.test_name.clone(),
        status,
        attachments,
        labels: report::types::labels(
            &form.feature_name,
            &form.test_tag,
            &form.option_tag,
            &form.comments,
        ),
        start,
        stop,
    };

    let filename = report::result_filename(&state.environment, state.option_tag, stop);
    report::write_result(&state.output_dir, &filename, &result)?;

    // The cursor moves only once the result is safely on disk.
    state.session.advance();

    Ok(Html(render_processing(&filename)))
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    filename: String,
}

/// GET /download?filename=... - serve a generated result file.
pub async fn download_result(
    State(state): State<Arc<WizardState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, WizardError> {
    if query.filename.is_empty() {
        return Err(WizardError::BadRequest("filename not specified".to_string()));
    }
    if !report::is_valid_result_filename(&query.filename) {
        return Err(WizardError::BadRequest(format!(
            "invalid filename: {}",
            query.filename
        )));
    }

    let path = state.output_dir.join(&query.filename);
    let body = match std::fs::read(&path) {
        Ok(body) => body,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(WizardError::NotFound)
        }
        Err(err) => return Err(WizardError::Internal(err.into())),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", query.filename),
            ),
        ],
        body,
    )
        .into_response())
}

/// Decoded `/generate` form.
#[derive(Debug, Default)]
struct Submission {
    test_name: String,
    test_status: String,
    test_tag: String,
    feature_name: String,
    option_tag: String,
    comments: String,
    start_timestamp: Option<String>,
    uploads: Vec<(String, Vec<u8>)>,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, WizardError> {
    let mut form = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| WizardError::BadRequest(format!("malformed form data: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "testName" => form.test_name = read_text(field).await?,
            "testStatus" => form.test_status = read_text(field).await?,
            "testTag" => form.test_tag = read_text(field).await?,
            "featureName" => form.feature_name = read_text(field).await?,
            "optionTag" => form.option_tag = read_text(field).await?,
            "comments" => form.comments = read_text(field).await?,
            "startTimestamp" => form.start_timestamp = Some(read_text(field).await?),
            "attachments[]" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    // File input submitted with no selection.
                    continue;
                }
                let bytes = field.bytes().await.map_err(|err| {
                    WizardError::BadRequest(format!("failed to read attachment: {err}"))
                })?;
                form.uploads.push((filename, bytes.to_vec()));
            }
            // Unknown fields are ignored rather than rejected.
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, WizardError> {
    field
        .text()
        .await
        .map_err(|err| WizardError::BadRequest(format!("malformed form data: {err}")))
}

/// A missing or empty start timestamp falls back to "now"; a present but
/// unparsable one fails the request instead of being silently defaulted.
fn parse_start_timestamp(raw: Option<&str>, now_millis: i64) -> Result<i64, WizardError> {
    match raw {
        None => Ok(now_millis),
        Some(value) if value.trim().is_empty() => Ok(now_millis),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| WizardError::BadRequest(format!("invalid start timestamp: {value}"))),
    }
}

/// Build the wizard page for the current session state.
fn render_page(state: &WizardState) -> String {
    let content = match state.session.current() {
        Some(scenario) => SCENARIO_TEMPLATE
            .replace("{{scenario_name}}", &escape_html(&scenario.name))
            .replace("{{feature_name}}", &escape_html(&scenario.feature_name))
            .replace("{{feature_tag}}", &escape_html(&scenario.feature_tag))
            .replace("{{option_tag}}", &escape_html(&scenario.option_tag))
            .replace("{{transcript}}", &escape_html(&scenario.rendered_text))
            .replace("{{position}}", &(state.session.position() + 1).to_string())
            .replace("{{total}}", &state.session.len().to_string()),
        None => COMPLETE_TEMPLATE.to_string(),
    };

    INDEX_TEMPLATE
        .replace("{{title}}", &escape_html(&state.option_tag.page_title()))
        .replace("{{content}}", &content)
        .replace("</head>", &format!("<style>{STYLE}</style></head>"))
}

/// Acknowledgement page: triggers the result download, then returns to `/`.
fn render_processing(filename: &str) -> String {
    PROCESSING_TEMPLATE.replace("{{download_url}}", &format!("/download?filename={filename}"))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

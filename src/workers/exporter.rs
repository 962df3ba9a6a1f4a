//! Audit report export
//!
//! The backend answers an export request in one of two ways. A JSON body
//! describes a report the backend produced itself (`{"filename": ...}`) or
//! explains why it could not (`{"error": ...}`). Any other body is the report
//! itself and is saved under the name suggested by `Content-Disposition`.

use super::core::{CompletionGuard, Job, Update, UpdateSender};
use crate::api::LedgerApi;
use crate::api::error::ApiError;
use crate::api::types::AuditArtifact;
use crate::consts::dashboard_consts::{DEFAULT_AUDIT_FILENAME, GENERIC_EXPORT_ERROR};
use crate::format::sanitize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Network error: {0}")]
    Transport(ApiError),

    /// The backend refused, with the reason it gave (or a generic one).
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    #[error("Could not save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ApiError> for ExportError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Http { status, message } => ExportError::Rejected {
                status: Some(status),
                message: rejection_message(&message),
            },
            other => ExportError::Transport(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The report was downloaded and written to disk.
    Saved {
        filename: String,
        path: PathBuf,
        bytes: usize,
    },
    /// The backend generated the report on its side and only reported its name.
    Reported { filename: String },
}

impl ExportOutcome {
    pub fn filename(&self) -> &str {
        match self {
            ExportOutcome::Saved { filename, .. } | ExportOutcome::Reported { filename } => {
                filename
            }
        }
    }
}

/// What an export response turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportBody {
    File { filename: String, bytes: Vec<u8> },
    Described { filename: String },
}

/// `Idle -> Generating -> Idle`.
#[derive(Debug, Default, Clone)]
pub struct ExportWorkflow {
    busy: bool,
    last: Option<ExportOutcome>,
}

impl ExportWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Generating`. Returns false when an export is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(
        &mut self,
        outcome: Result<ExportOutcome, ExportError>,
    ) -> Result<&ExportOutcome, ExportError> {
        self.busy = false;
        let outcome = outcome?;
        Ok(&*self.last.insert(outcome))
    }

    pub fn abandon(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last(&self) -> Option<&ExportOutcome> {
        self.last.as_ref()
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.busy {
            "Generating..."
        } else {
            "Export Audit"
        }
    }
}

/// True for `application/json` and `+json` media types, ignoring parameters.
pub fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|media| {
            let media = media.trim().to_ascii_lowercase();
            media == "application/json" || media.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Decides what a successful export response carries.
pub fn interpret(artifact: AuditArtifact) -> Result<ExportBody, ExportError> {
    if !is_json(artifact.content_type.as_deref()) {
        let filename = filename_from_disposition(artifact.content_disposition.as_deref());
        return Ok(ExportBody::File {
            filename,
            bytes: artifact.body,
        });
    }

    let value: Value = serde_json::from_slice(&artifact.body).map_err(|e| {
        log::debug!("Unreadable export description: {}", e);
        ExportError::Rejected {
            status: None,
            message: GENERIC_EXPORT_ERROR.to_string(),
        }
    })?;

    if let Some(reason) = value.get("error").and_then(Value::as_str) {
        return Err(ExportError::Rejected {
            status: None,
            message: sanitize(reason),
        });
    }

    let filename = value
        .get("filename")
        .and_then(Value::as_str)
        .and_then(safe_filename)
        .unwrap_or_else(|| DEFAULT_AUDIT_FILENAME.to_string());
    Ok(ExportBody::Described { filename })
}

/// Suggested file name from a `Content-Disposition` header value.
///
/// `filename*` (RFC 5987) wins over `filename`. Directory components are
/// dropped. Falls back to [`DEFAULT_AUDIT_FILENAME`].
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(disposition_filename)
        .and_then(|name| safe_filename(&name))
        .unwrap_or_else(|| DEFAULT_AUDIT_FILENAME.to_string())
}

fn disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    for part in disposition_params(header) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'percent-encoded-name
                if let Some(encoded) = value.splitn(3, '\'').nth(2) {
                    if let Ok(decoded) = urlencoding::decode(encoded) {
                        return Some(decoded.into_owned());
                    }
                }
            }
            "filename" => plain = Some(unquote(value)),
            _ => {}
        }
    }
    plain
}

/// Splits header parameters on `;`. Separators inside quoted strings do not count.
fn disposition_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in header.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

/// Contents of a quoted string with `\x` escapes resolved. Bare tokens pass through.
fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"') else {
        return value.to_string();
    };
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

/// The last path component, sanitized. `None` if nothing usable is left.
fn safe_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let clean = sanitize(last).trim().to_string();
    match clean.as_str() {
        "" | "." | ".." => None,
        _ => Some(clean),
    }
}

/// Reason carried by a failed export response: the `error` field of a JSON
/// body, or [`GENERIC_EXPORT_ERROR`].
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(sanitize)
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_EXPORT_ERROR.to_string())
}

/// Writes the report into `dir`, never overwriting an existing file:
/// `report.pdf` becomes `report (1).pdf` and so on.
pub async fn save_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let save_error = |path: &Path, source| ExportError::Save {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| save_error(dir, e))?;

    let path = available_path(dir, filename).await;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| save_error(path.as_path(), e))?;
    Ok(path)
}

async fn available_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        return candidate;
    }
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (filename, String::new()),
    };
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, extension));
        if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}

/// Requests a report and either saves it into `download_dir` or returns the
/// name the backend reported.
pub async fn run_export(
    api: &dyn LedgerApi,
    download_dir: &Path,
) -> Result<ExportOutcome, ExportError> {
    let artifact = api.export_audit().await?;
    match interpret(artifact)? {
        ExportBody::File { filename, bytes } => {
            let path = save_artifact(download_dir, &filename, &bytes).await?;
            Ok(ExportOutcome::Saved {
                filename,
                path,
                bytes: bytes.len(),
            })
        }
        ExportBody::Described { filename } => Ok(ExportOutcome::Reported { filename }),
    }
}

/// Runs one export in the background and reports it as [`Update::Exported`].
pub fn spawn_export(
    api: Arc<dyn LedgerApi>,
    download_dir: PathBuf,
    updates: UpdateSender,
) -> JoinHandle<()> {
    let guard = CompletionGuard::new(Job::Export, updates);
    tokio::spawn(async move {
        let outcome = run_export(api.as_ref(), &download_dir).await;
        guard.complete(Update::Exported(outcome));
    })
}

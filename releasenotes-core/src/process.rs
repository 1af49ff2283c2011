//! Directory-level pipeline: YAML files → notes → payloads → submitter.
//!
//! Every `*.yaml` file directly inside the source directory is read, parsed and
//! formatted, and each resulting payload is handed to a [`Submitter`] in file
//! order. Failures are contained:
//!   - a file that cannot be read or parsed is logged and skipped
//!   - a note with a bad `date_publish` is handled per [`DateErrorPolicy`]
//!   - a failed submission is logged and counted; the next note is still sent
//!
//! Only an unreadable source directory stops the run.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::contract::{SubmitError, Submitter};
use crate::format::{format_note, format_notes, FormatOptions, ReleaseNotePayload};
use crate::note::parse_release_notes;

/// Files are picked up when their name ends with this (case-sensitive).
pub const YAML_EXTENSION: &str = ".yaml";

/// What to do with a note whose `date_publish` does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateErrorPolicy {
    /// Log and drop the note; the rest of the file is still submitted.
    #[default]
    SkipNote,
    /// Log and drop the whole file before any of its notes are submitted.
    AbortFile,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    pub format: FormatOptions,
    pub on_date_error: DateErrorPolicy,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read source directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub files: Vec<FileReport>,
}

impl MigrationReport {
    pub fn submitted(&self) -> usize {
        self.files.iter().map(|f| f.submitted).sum()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().map(|f| f.failed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.files.iter().map(|f| f.skipped).sum()
    }

    /// Files that were not processed at all.
    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.error.is_some())
    }
}

#[derive(Debug, Default)]
pub struct FileReport {
    pub filename: String,
    /// Notes found in the file.
    pub notes: usize,
    pub submitted: usize,
    /// Submissions the destination rejected or never answered.
    pub failed: usize,
    /// Notes dropped before submission (bad date).
    pub skipped: usize,
    /// Set when the file was skipped entirely.
    pub error: Option<String>,
}

/// YAML files directly inside `dir`, sorted by name.
pub fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let read_dir_err = |source: std::io::Error| ProcessError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        let is_yaml = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(YAML_EXTENSION));
        if is_yaml && path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-YAML entry");
        }
    }
    files.sort();
    Ok(files)
}

/// Process every YAML file in `dir` and submit the resulting payloads.
pub async fn process_directory<S>(
    dir: &Path,
    config: &ProcessConfig,
    submitter: &S,
) -> Result<MigrationReport, ProcessError>
where
    S: Submitter + ?Sized,
{
    info!(dir = %dir.display(), policy = ?config.on_date_error, "[MIGRATE] Starting release-notes migration");

    let mut report = MigrationReport::default();
    for path in yaml_files(dir)? {
        let file_report = process_file(&path, config, submitter).await;
        report.files.push(file_report);
    }

    info!(
        files = report.files.len(),
        submitted = report.submitted(),
        failed = report.failed(),
        skipped = report.skipped(),
        "[MIGRATE] Migration finished"
    );
    Ok(report)
}

/// Process a single YAML file. Never fails; problems end up in the report.
pub async fn process_file<S>(path: &Path, config: &ProcessConfig, submitter: &S) -> FileReport
where
    S: Submitter + ?Sized,
{
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut report = FileReport {
        filename: filename.clone(),
        ..FileReport::default()
    };

    info!(file = %path.display(), "[MIGRATE] Processing file");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(file = %path.display(), error = %e, "[MIGRATE][ERROR] Failed to read YAML file");
            report.error = Some(format!("read error: {e}"));
            return report;
        }
    };

    let notes = match parse_release_notes(&content) {
        Ok(notes) => notes,
        Err(e) => {
            error!(file = %path.display(), error = %e, "[MIGRATE][ERROR] Error reading YAML file");
            report.error = Some(e.to_string());
            return report;
        }
    };
    report.notes = notes.len();
    debug!(file = %filename, notes = notes.len(), "Parsed release notes");

    let payloads: Vec<ReleaseNotePayload> = match config.on_date_error {
        DateErrorPolicy::AbortFile => match format_notes(&filename, &notes, &config.format) {
            Ok(payloads) => payloads,
            Err(e) => {
                error!(file = %filename, error = %e, "[MIGRATE][ERROR] Invalid note, skipping file");
                report.skipped = notes.len();
                report.error = Some(e.to_string());
                return report;
            }
        },
        DateErrorPolicy::SkipNote => notes
            .iter()
            .enumerate()
            .filter_map(|(index, note)| match format_note(&filename, note, &config.format) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!(file = %filename, index, error = %e, "[MIGRATE] Skipping note");
                    report.skipped += 1;
                    None
                }
            })
            .collect(),
    };

    for payload in &payloads {
        if submit_one(submitter, payload).await {
            report.submitted += 1;
        } else {
            report.failed += 1;
        }
    }

    info!(
        file = %filename,
        submitted = report.submitted,
        failed = report.failed,
        skipped = report.skipped,
        "[MIGRATE] File done"
    );
    report
}

async fn submit_one<S>(submitter: &S, payload: &ReleaseNotePayload) -> bool
where
    S: Submitter + ?Sized,
{
    let scope = payload.scope.first().map(String::as_str).unwrap_or("");
    match submitter.submit(payload).await {
        Ok(resp) => {
            info!(
                scope,
                header = resp.header.as_deref().unwrap_or(""),
                "[MIGRATE] Response OK"
            );
            true
        }
        Err(SubmitError::Status {
            status,
            request_body,
            response_body,
        }) => {
            error!(
                scope,
                status,
                request_body = %request_body,
                response_body = %response_body,
                "[MIGRATE][ERROR] HTTP error occurred"
            );
            false
        }
        Err(e) => {
            error!(scope, error = %e, "[MIGRATE][ERROR] Submission failed");
            false
        }
    }
}

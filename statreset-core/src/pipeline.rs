//! Batch pipeline: reset every record in a store with one resolved selector.
//!
//! The entry points are I/O-agnostic; all record access goes through
//! [`RecordStore`].

use crate::adapters::FsRecordStore;
use crate::ports::RecordStore;
use crate::settings::BatchSettings;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use statreset_domain::rewrite_record;
use statreset_edit::{RecordResult, render_patch, sha256_hex};
use statreset_types::report::{BatchReport, RecordOutcome, RecordReport, ToolInfo};
use tracing::{debug, info, warn};

/// Failures that stop a run before any record is touched.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("user directory not found: {path}")]
    MissingDirectory { path: Utf8PathBuf },

    #[error("no userfiles found in {path}")]
    NoRecords { path: Utf8PathBuf },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_batch`.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub report: BatchReport,
    /// Unified diff of every modified record, in processing order.
    pub patch: String,
}

impl BatchOutcome {
    /// Records whose counters were reset (or would be, in a dry run).
    pub fn success_count(&self) -> u64 {
        self.report.summary.reset
    }
}

/// Run the batch over the users directory named in `settings`.
pub fn run_fs_batch(settings: &BatchSettings, tool: ToolInfo) -> Result<BatchOutcome, BatchError> {
    let store = FsRecordStore::new(settings.users_dir.clone(), settings.write_mode);
    run_batch(settings, &store, tool)
}

/// Run the batch over `store`.
///
/// A failing record is reported in its outcome and the batch continues. Records with
/// nothing to reset are never written.
pub fn run_batch(
    settings: &BatchSettings,
    store: &dyn RecordStore,
    tool: ToolInfo,
) -> Result<BatchOutcome, BatchError> {
    let location = store.location().to_path_buf();
    if !store.exists() {
        return Err(BatchError::MissingDirectory { path: location });
    }

    let records = store.list_records()?;
    if records.is_empty() {
        return Err(BatchError::NoRecords { path: location });
    }

    info!(
        count = records.len(),
        dir = %location,
        selector = %settings.selector,
        dry_run = settings.dry_run,
        "processing userfiles"
    );

    let mut report = BatchReport::new(tool, location.to_string(), settings.selector);
    report.dry_run = settings.dry_run;
    report.triggers = settings.triggers.clone();

    let mut patch = String::new();
    for path in &records {
        let record = match process_one(settings, store, path, &mut patch) {
            Ok(record) => record,
            Err(err) => {
                warn!(%path, error = %err, "skipping userfile");
                RecordReport {
                    path: path.to_string(),
                    outcome: RecordOutcome::Failed {
                        message: err.to_string(),
                    },
                    sha256_before: None,
                    sha256_after: None,
                }
            }
        };
        report.push(record);
    }

    report.ended_at = Some(Utc::now());
    info!(
        reset = report.summary.reset,
        unchanged = report.summary.unchanged,
        failed = report.summary.failed,
        "batch complete"
    );

    Ok(BatchOutcome { report, patch })
}

fn process_one(
    settings: &BatchSettings,
    store: &dyn RecordStore,
    path: &Utf8Path,
    patch: &mut String,
) -> RecordResult<RecordReport> {
    let before = store.read_record(path)?;
    let sha256_before = Some(sha256_hex(before.as_bytes()));
    let rewrite = rewrite_record(&before, settings.selector);

    if !rewrite.modified() {
        debug!(%path, "nothing to reset");
        return Ok(RecordReport {
            path: path.to_string(),
            outcome: RecordOutcome::Unchanged,
            sha256_before,
            sha256_after: None,
        });
    }

    let after = rewrite.contents();
    patch.push_str(&render_patch(path, &before, &after));

    if settings.dry_run {
        debug!(%path, lines = rewrite.resets.len(), "dry-run: not written");
    } else {
        store.write_record(path, &after)?;
        debug!(%path, lines = rewrite.resets.len(), "reset counters");
    }

    Ok(RecordReport {
        path: path.to_string(),
        outcome: RecordOutcome::Reset {
            lines: rewrite.resets,
        },
        sha256_before,
        sha256_after: Some(sha256_hex(after.as_bytes())),
    })
}

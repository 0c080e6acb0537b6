// ── Import orchestration ──
//
// Drives tokenizer -> validator -> mapper over a whole file and manages the
// two-phase "review, then commit" flow. Every load replaces the previous
// state wholesale. Commit issues one create per previewed record, in order,
// one at a time, and stops at the first failure. Nothing is rolled back.

use std::future::Future;
use std::path::Path;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::mapper::map_row;
use super::tokenizer::tokenize;
use super::validate::{RowError, validate_row};
use crate::error::CoreError;
use crate::model::{Site, SiteFields};

/// How many row errors a review shows before summarising the rest.
pub const ERROR_DISPLAY_LIMIT: usize = 10;

// ── Failures ─────────────────────────────────────────────────────────

/// Terminal failures for one import attempt. Retrying with another file
/// starts a fresh attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportFailure {
    #[error("Please select a CSV file")]
    NotCsv,

    #[error("Error reading CSV file. Please check the file format.")]
    Unreadable,

    #[error("CSV file must contain at least a header row and one data row")]
    TooShort,

    #[error("No file has been reviewed yet")]
    NotReviewed,

    #[error("No valid records to import")]
    NothingToCommit,
}

// ── Review ───────────────────────────────────────────────────────────

/// Outcome of parsing and validating a file: the full error list and the
/// records that passed. A file can be partially valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReview {
    /// Number of data rows (header excluded).
    pub data_rows: usize,
    pub errors: Vec<RowError>,
    pub preview: Vec<SiteFields>,
}

impl ImportReview {
    /// Build a review from raw text.
    pub fn from_text(text: &str) -> Result<Self, ImportFailure> {
        let mut rows = tokenize(text);
        let Some(header) = rows.next() else {
            return Err(ImportFailure::TooShort);
        };
        debug!(columns = header.len(), "import header");

        let mut review = Self::default();
        for (index, row) in rows.enumerate() {
            review.data_rows += 1;
            let row_errors = validate_row(&row, index);
            if row_errors.is_empty() {
                review.preview.push(map_row(&row));
            } else {
                review.errors.extend(row_errors);
            }
        }

        if review.data_rows == 0 {
            return Err(ImportFailure::TooShort);
        }
        Ok(review)
    }

    /// The first `limit` error messages, plus `... and N more errors` when
    /// some were left out. The underlying list is never truncated.
    pub fn capped_errors(&self, limit: usize) -> Vec<String> {
        let mut shown: Vec<String> = self
            .errors
            .iter()
            .take(limit)
            .map(ToString::to_string)
            .collect();
        if self.errors.len() > limit {
            shown.push(format!("... and {} more errors", self.errors.len() - limit));
        }
        shown
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ── Commit ───────────────────────────────────────────────────────────

/// Destination for committed records.
pub trait SiteSink {
    /// Create one site; the server assigns its running number.
    fn create_site(
        &self,
        fields: &SiteFields,
    ) -> impl Future<Output = Result<Site, CoreError>> + Send;
}

/// What happened to one previewed record during commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Created { running_number: Option<u64> },
    Failed { message: String },
    /// Skipped because an earlier record failed.
    NotAttempted,
    /// Skipped because the operator cancelled.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    /// 1-based position in the preview set.
    pub position: usize,
    pub site_name: String,
    pub status: CommitStatus,
}

/// Per-record result of a commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitReport {
    pub outcomes: Vec<CommitOutcome>,
}

impl CommitReport {
    pub fn created(&self) -> usize {
        self.count(|s| matches!(s, CommitStatus::Created { .. }))
    }

    pub fn not_attempted(&self) -> usize {
        self.count(|s| matches!(s, CommitStatus::NotAttempted | CommitStatus::Cancelled))
    }

    /// The record that stopped the commit, if any.
    pub fn failure(&self) -> Option<&CommitOutcome> {
        self.outcomes
            .iter()
            .find(|o| matches!(o.status, CommitStatus::Failed { .. }))
    }

    pub fn was_cancelled(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == CommitStatus::Cancelled)
    }

    pub fn is_complete(&self) -> bool {
        self.created() == self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&CommitStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImportState {
    #[default]
    Idle,
    Parsing,
    Reviewed(ImportReview),
    Committing,
    Done(CommitReport),
    Failed(ImportFailure),
}

/// One operator's import attempt, from file selection to commit.
#[derive(Debug, Default)]
pub struct ImportSession {
    state: ImportState,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn review(&self) -> Option<&ImportReview> {
        match &self.state {
            ImportState::Reviewed(review) => Some(review),
            _ => None,
        }
    }

    /// Read and review a file. Only `.csv` names are accepted.
    pub async fn load_file(&mut self, path: &Path) -> &ImportState {
        let is_csv = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".csv"));
        if !is_csv {
            self.state = ImportState::Failed(ImportFailure::NotCsv);
            return &self.state;
        }

        self.state = ImportState::Parsing;
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "failed to read import file");
                self.state = ImportState::Failed(ImportFailure::Unreadable);
                return &self.state;
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => self.load_text(&text),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "import file is not UTF-8");
                self.state = ImportState::Failed(ImportFailure::Unreadable);
                &self.state
            }
        }
    }

    /// Review already-loaded text.
    pub fn load_text(&mut self, text: &str) -> &ImportState {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        self.state = match ImportReview::from_text(text) {
            Ok(review) => {
                info!(
                    rows = review.data_rows,
                    valid = review.preview.len(),
                    errors = review.errors.len(),
                    "import file reviewed"
                );
                ImportState::Reviewed(review)
            }
            Err(failure) => ImportState::Failed(failure),
        };
        &self.state
    }

    /// Create every previewed record through `sink`, in order.
    ///
    /// `observe` sees each outcome as it is decided. Cancelling `cancel`
    /// stops queued creates; a create already in flight runs to completion.
    pub async fn commit<S, F>(
        &mut self,
        sink: &S,
        cancel: &CancellationToken,
        mut observe: F,
    ) -> Result<CommitReport, ImportFailure>
    where
        S: SiteSink + Sync,
        F: FnMut(&CommitOutcome) + Send,
    {
        let preview = match std::mem::take(&mut self.state) {
            ImportState::Reviewed(review) if !review.preview.is_empty() => review.preview,
            other => {
                let failure = if matches!(other, ImportState::Reviewed(_)) {
                    ImportFailure::NothingToCommit
                } else {
                    ImportFailure::NotReviewed
                };
                self.state = other;
                return Err(failure);
            }
        };
        self.state = ImportState::Committing;

        let mut report = CommitReport::default();
        let mut halted: Option<CommitStatus> = None;

        for (i, fields) in preview.iter().enumerate() {
            let position = i + 1;

            if halted.is_none() && cancel.is_cancelled() {
                info!(position, "import cancelled");
                halted = Some(CommitStatus::Cancelled);
            }

            let status = if let Some(skip) = &halted {
                skip.clone()
            } else {
                match sink.create_site(fields).await {
                    Ok(site) => {
                        info!(position, running_number = ?site.running_number, "site created");
                        CommitStatus::Created {
                            running_number: site.running_number,
                        }
                    }
                    Err(e) => {
                        warn!(position, error = %e, "site create failed, stopping import");
                        halted = Some(CommitStatus::NotAttempted);
                        CommitStatus::Failed {
                            message: e.to_string(),
                        }
                    }
                }
            };

            let outcome = CommitOutcome {
                position,
                site_name: fields.site_name.clone(),
                status,
            };
            observe(&outcome);
            report.outcomes.push(outcome);
        }

        self.state = ImportState::Done(report.clone());
        Ok(report)
    }
}

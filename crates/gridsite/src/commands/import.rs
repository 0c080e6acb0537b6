//! CSV import command handlers.
//!
//! `check` stops after review; `run` shows the same review, asks for
//! confirmation, then commits the preview set one site at a time.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use gridsite_core::import::{ERROR_DISPLAY_LIMIT, write_template};
use gridsite_core::{
    CommitOutcome, CommitReport, CommitStatus, ImportReview, ImportSession, ImportState,
    Inventory, SiteFields,
};

use crate::cli::{GlobalOpts, ImportArgs, ImportCommand, OutputFormat};
use crate::config::Presentation;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Site Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Site Status")]
    site_status: String,
}

impl PreviewRow {
    fn new(position: usize, fields: &SiteFields) -> Self {
        Self {
            position,
            client: fields.client.clone(),
            name: fields.site_name.clone(),
            state: fields.state.clone(),
            status: fields.status.clone(),
            site_status: fields.site_status.clone(),
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Site Name")]
    name: String,
    #[tabled(rename = "Result")]
    result: String,
}

fn outcome_text(status: &CommitStatus, color: bool) -> String {
    match status {
        CommitStatus::Created {
            running_number: Some(n),
        } => output::ok(&format!("created #{n}"), color),
        CommitStatus::Created {
            running_number: None,
        } => output::ok("created", color),
        CommitStatus::Failed { message } => output::bad(&format!("failed: {message}"), color),
        CommitStatus::NotAttempted => output::muted("not attempted", color),
        CommitStatus::Cancelled => output::muted("cancelled", color),
    }
}

// ── Review ──────────────────────────────────────────────────────────

/// Load and review `file`, printing errors and the preview.
async fn review_file(
    file: &Path,
    global: &GlobalOpts,
    view: &Presentation,
) -> Result<(ImportSession, ImportReview), CliError> {
    let mut session = ImportSession::new();
    let review = match session.load_file(file).await {
        ImportState::Reviewed(review) => review.clone(),
        ImportState::Failed(failure) => return Err(failure.clone().into()),
        other => {
            return Err(CliError::Internal(format!(
                "unexpected import state after load: {other:?}"
            )));
        }
    };
    debug!(
        rows = review.data_rows,
        valid = review.preview.len(),
        errors = review.errors.len(),
        "reviewed import file"
    );

    let color = output::should_color(view.color);
    if !review.errors.is_empty() {
        eprintln!("{}", output::bad("Validation errors:", color));
        for line in review.capped_errors(ERROR_DISPLAY_LIMIT) {
            eprintln!("  {line}");
        }
        eprintln!();
    }

    if !review.preview.is_empty() {
        let out = match view.output {
            OutputFormat::Table => {
                let rows: Vec<PreviewRow> = review
                    .preview
                    .iter()
                    .enumerate()
                    .map(|(i, f)| PreviewRow::new(i + 1, f))
                    .collect();
                output::render_table(&rows)
            }
            format => output::render_single(
                format,
                &review.preview,
                |_| String::new(),
                |preview| {
                    preview
                        .iter()
                        .map(|f| f.site_name.clone())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            ),
        };
        output::print_output(&out, global.quiet);
    }
    output::note(
        &format!(
            "{} data row(s): {} valid, {} with errors",
            review.data_rows,
            review.preview.len(),
            review.data_rows - review.preview.len()
        ),
        global.quiet,
    );

    Ok((session, review))
}

// ── Commit ──────────────────────────────────────────────────────────

fn progress_bar(total: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("#>-"));
    pb.set_style(style);
    pb
}

/// Cancel `token` on the first Ctrl-C.
fn cancel_on_interrupt(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling queued creates");
            token.cancel();
        }
    })
}

async fn commit(
    session: &mut ImportSession,
    inventory: &Inventory,
    total: usize,
    quiet: bool,
) -> Result<CommitReport, CliError> {
    let pb = progress_bar(total, quiet);
    let cancel = CancellationToken::new();
    let watcher = cancel_on_interrupt(cancel.clone());

    let result = session
        .commit(inventory, &cancel, |outcome: &CommitOutcome| {
            pb.set_message(outcome.site_name.clone());
            pb.inc(1);
        })
        .await;

    watcher.abort();
    pb.finish_and_clear();
    result.map_err(CliError::from)
}

fn report_result(report: &CommitReport) -> Result<(), CliError> {
    if let Some(failed) = report.failure() {
        let message = match &failed.status {
            CommitStatus::Failed { message } => message.clone(),
            _ => String::new(),
        };
        return Err(CliError::CommitHalted {
            position: failed.position,
            site_name: failed.site_name.clone(),
            message,
            created: report.created(),
        });
    }
    if report.was_cancelled() {
        return Err(CliError::CommitCancelled {
            created: report.created(),
            remaining: report.not_attempted(),
        });
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: ImportArgs,
    global: &GlobalOpts,
    view: &Presentation,
    inventory: impl FnOnce() -> Result<Inventory, CliError>,
) -> Result<(), CliError> {
    match args.command {
        ImportCommand::Template { file } => {
            let mut buf = Vec::new();
            write_template(&mut buf)?;
            util::write_to(file.as_deref(), &buf)?;
            if let Some(path) = file {
                output::note(&format!("Template written to {}", path.display()), global.quiet);
            }
            Ok(())
        }

        ImportCommand::Check { file } => {
            let (_, review) = review_file(&file, global, view).await?;
            if review.is_clean() {
                Ok(())
            } else {
                Err(CliError::ImportInvalid {
                    count: review.errors.len(),
                })
            }
        }

        ImportCommand::Run { file } => {
            let (mut session, review) = review_file(&file, global, view).await?;
            let valid = review.preview.len();
            if valid == 0 {
                return Err(gridsite_core::ImportFailure::NothingToCommit.into());
            }

            let skipped = review.data_rows - valid;
            let prompt = if skipped == 0 {
                format!("Import {valid} site(s)?")
            } else {
                format!("Import {valid} site(s)? {skipped} invalid row(s) will be skipped.")
            };
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }

            let inventory = inventory()?;
            let report = commit(&mut session, &inventory, valid, global.quiet).await?;

            let color = output::should_color(view.color);
            let rows: Vec<OutcomeRow> = report
                .outcomes
                .iter()
                .map(|o| OutcomeRow {
                    position: o.position,
                    name: o.site_name.clone(),
                    result: outcome_text(&o.status, color),
                })
                .collect();
            output::print_output(&output::render_table(&rows), global.quiet);

            report_result(&report)?;
            output::note(
                &output::ok(&format!("Imported {} site(s)", report.created()), color),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn outcome(position: usize, status: CommitStatus) -> CommitOutcome {
        CommitOutcome {
            position,
            site_name: format!("Site {position}"),
            status,
        }
    }

    #[test]
    fn halted_commit_reports_the_failing_record() {
        let report = CommitReport {
            outcomes: vec![
                outcome(
                    1,
                    CommitStatus::Created {
                        running_number: Some(1001),
                    },
                ),
                outcome(
                    2,
                    CommitStatus::Failed {
                        message: "Validation error: siteName: duplicate".into(),
                    },
                ),
                outcome(3, CommitStatus::NotAttempted),
            ],
        };
        let err = report_result(&report).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Import stopped at record 2 (Site 2): Validation error: siteName: duplicate"
        );
        assert_eq!(err.exit_code(), crate::error::exit_code::IMPORT_REJECTED);
    }

    #[test]
    fn cancelled_commit_counts_what_was_left() {
        let report = CommitReport {
            outcomes: vec![
                outcome(1, CommitStatus::Created { running_number: None }),
                outcome(2, CommitStatus::Cancelled),
                outcome(3, CommitStatus::Cancelled),
            ],
        };
        assert!(matches!(
            report_result(&report),
            Err(CliError::CommitCancelled {
                created: 1,
                remaining: 2
            })
        ));
    }

    #[test]
    fn outcome_text_without_color() {
        assert_eq!(
            outcome_text(
                &CommitStatus::Created {
                    running_number: Some(7)
                },
                false
            ),
            "created #7"
        );
        assert_eq!(outcome_text(&CommitStatus::NotAttempted, false), "not attempted");
    }
}

//! Feeds captured transactions through the listener.
//!
//! Input is one JSON capture record per line, in the shape the traffic
//! interceptor produces. Blank lines are skipped; lines that do not parse
//! are counted and otherwise ignored.

use std::path::{Path, PathBuf};

use serde::Serialize;
use smd_listener::{ListenerStats, SamlListener};
use smd_protocol_saml::CapturedRequest;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::output::{self, success, warning, OutputFormat};

const CHANNEL_CAPACITY: usize = 64;

/// Summary of an ingest run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Lines that were not valid capture records.
    pub unreadable: usize,
    /// Transactions handed to the listener.
    pub received: usize,
    /// Messages stored.
    pub stored: usize,
    /// Transactions without a SAML message.
    pub ignored: usize,
    /// SAML messages that failed to decode.
    pub dropped: usize,
    /// Decoded messages the history could not save.
    pub not_stored: usize,
}

impl IngestSummary {
    fn new(unreadable: usize, stats: ListenerStats) -> Self {
        Self {
            unreadable,
            received: stats.received,
            stored: stats.stored,
            ignored: stats.ignored,
            dropped: stats.dropped,
            not_stored: stats.not_stored,
        }
    }
}

/// Processes a capture file, or stdin when `input` is `None` or `-`.
pub async fn run_ingest(
    input: Option<PathBuf>,
    ctx: &AppContext,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let summary = match input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = tokio::fs::File::open(path).await?;
            ingest(BufReader::new(file), ctx).await?
        }
        _ => ingest(BufReader::new(tokio::io::stdin()), ctx).await?,
    };

    match format {
        OutputFormat::Table => {
            success(&format!(
                "Processed {} transaction(s): {} stored, {} ignored, {} dropped",
                summary.received, summary.stored, summary.ignored, summary.dropped
            ));
            if summary.not_stored > 0 {
                warning(&format!(
                    "{} decoded message(s) could not be saved",
                    summary.not_stored
                ));
            }
            if summary.unreadable > 0 {
                warning(&format!("Skipped {} unreadable line(s)", summary.unreadable));
            }
            Ok(())
        }
        other => output::output_single(&summary, other),
    }
}

/// Reads capture records and runs them through a listener over the store.
pub async fn ingest<R>(reader: R, ctx: &AppContext) -> crate::CliResult<IngestSummary>
where
    R: AsyncBufRead + Unpin,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let handle = SamlListener::new(ctx.store.clone()).spawn(rx);

    let mut lines = reader.lines();
    let mut unreadable = 0;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match CapturedRequest::from_json(line) {
            Ok(request) => {
                if tx.send(request).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(line = line_no, error = %e, "skipping capture record");
                unreadable += 1;
            }
        }
    }
    drop(tx);

    let stats = handle
        .await
        .map_err(|e| std::io::Error::other(format!("listener task failed: {e}")))?;

    Ok(IngestSummary::new(unreadable, stats))
}

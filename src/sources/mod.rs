// src/sources/mod.rs
pub mod difficulty;
pub mod graphql;
pub mod legacy;
pub mod types;

use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

use crate::error::{AnalyticsError, SourceError};
use crate::sources::types::{SubmissionRecord, SubmissionSource};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "source_records_total",
            "Submission records parsed from upstream sources."
        );
        describe_counter!("source_attempts_total", "Adapter attempts made.");
        describe_counter!("source_errors_total", "Adapter fetch/parse errors.");
        describe_counter!(
            "source_fallback_exhausted_total",
            "Fetches where every source in the chain failed."
        );
        describe_histogram!("source_parse_ms", "Upstream parse time in milliseconds.");
    });
}

/// Try submission sources strictly in order; first success wins.
///
/// Each source gets exactly one attempt. An `Ok` short-circuits even when
/// the list is empty, since "no recent submissions" is a legitimate answer.
/// Sources are never queried concurrently; a failing primary is often
/// rate-limited and parallel requests would make that worse. When every
/// source fails, the error of the last one tried is wrapped and returned.
pub async fn fetch_with_fallback(
    sources: &[Box<dyn SubmissionSource>],
    username: &str,
) -> Result<Vec<SubmissionRecord>, AnalyticsError> {
    ensure_metrics_described();

    let mut last_err: Option<SourceError> = None;
    for source in sources {
        counter!("source_attempts_total").increment(1);
        match source.fetch_submissions(username).await {
            Ok(records) => {
                tracing::debug!(
                    source = source.name(),
                    records = records.len(),
                    "submission source succeeded"
                );
                return Ok(records);
            }
            Err(e) => {
                tracing::warn!(error = %e, source = source.name(), "submission source failed");
                counter!("source_errors_total").increment(1);
                last_err = Some(e);
            }
        }
    }

    counter!("source_fallback_exhausted_total").increment(1);
    Err(AnalyticsError::SourcesExhausted(last_err.unwrap_or(
        SourceError::Network("no submission sources configured".into()),
    )))
}

//! # Consistency Histogram
//! Buckets submission timestamps into UTC calendar days and projects them
//! onto the fixed trailing 30-day window ending today.
//!
//! Counts every record regardless of status (unlike the topic mapper, which
//! restricts to Accepted). Days without activity are zero-filled so the
//! series always has exactly `WINDOW_DAYS` entries.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::sources::types::SubmissionRecord;

/// Length of the trailing window, today inclusive.
pub const WINDOW_DAYS: usize = 30;

/// One day of the consistency series.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Build the 30-day histogram ending at the current UTC date.
pub fn daily_histogram(records: &[SubmissionRecord]) -> Vec<DayCount> {
    daily_histogram_ending(records, Utc::now().date_naive())
}

/// Deterministic core: build the window ending at an explicit `today`.
///
/// Dates outside the window are discarded; an input with no activity at all
/// is fine and yields an all-zero series.
pub fn daily_histogram_ending(records: &[SubmissionRecord], today: NaiveDate) -> Vec<DayCount> {
    let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
    for rec in records {
        // Timestamps are upstream-validated; anything chrono cannot place on
        // a calendar is skipped rather than aborting the series.
        if let Some(day) = DateTime::from_timestamp(rec.timestamp_secs, 0).map(|dt| dt.date_naive())
        {
            *per_day.entry(day).or_insert(0) += 1;
        }
    }

    (0..WINDOW_DAYS)
        .map(|i| {
            let date = today - Duration::days((WINDOW_DAYS - 1 - i) as i64);
            DayCount {
                date,
                count: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

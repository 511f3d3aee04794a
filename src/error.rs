// src/error.rs

//! Error taxonomy for the aggregation pipeline.
//!
//! Adapter-level failures (`SourceError`) drive fallback inside the
//! coordinator and are never surfaced individually; only a terminal
//! `AnalyticsError` reaches the caller.

use thiserror::Error;

/// Outcome classification for a single upstream adapter attempt.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure or timeout talking to the upstream.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream reports that the user does not exist.
    #[error("user not found upstream")]
    NotFound,

    /// Well-formed JSON that lacks the expected shape.
    #[error("unexpected response shape: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

/// Terminal failure of an `aggregate` call.
///
/// Produced only when a whole sub-pipeline is lost: every submission source
/// exhausted, or the profile query (which has no fallback) failed.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Every submission source in the fallback chain failed; wraps the
    /// error of the last adapter tried.
    #[error("all submission sources exhausted: {0}")]
    SourcesExhausted(#[source] SourceError),

    /// The difficulty-stats profile query failed.
    #[error("profile lookup failed: {0}")]
    Profile(#[source] SourceError),
}

impl AnalyticsError {
    /// True when the underlying cause is "user does not exist" rather than
    /// an upstream being temporarily unreachable. Drives 404-vs-502 at the
    /// API edge.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AnalyticsError::SourcesExhausted(SourceError::NotFound)
                | AnalyticsError::Profile(SourceError::NotFound)
        )
    }

    /// The adapter-level error this failure wraps.
    pub fn source_error(&self) -> &SourceError {
        match self {
            AnalyticsError::SourcesExhausted(e) | AnalyticsError::Profile(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_through_both_variants() {
        assert!(AnalyticsError::Profile(SourceError::NotFound).is_not_found());
        assert!(AnalyticsError::SourcesExhausted(SourceError::NotFound).is_not_found());
        assert!(
            !AnalyticsError::SourcesExhausted(SourceError::Network("timeout".into()))
                .is_not_found()
        );
    }
}

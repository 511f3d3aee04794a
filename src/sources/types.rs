// src/sources/types.rs
use crate::error::SourceError;

/// Submission status as far as this pipeline cares: upstream status codes
/// collapse to Accepted or Other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SubmissionStatus {
    Accepted,
    Other,
}

/// One observed submission event, normalized across upstream shapes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Unix seconds; always interpretable as a UTC calendar date.
    pub timestamp_secs: i64,
    /// Free-text tag set; some upstreams provide none, which is valid.
    pub tags: Vec<String>,
    pub status: SubmissionStatus,
}

/// Outcome of one adapter attempt. An empty list is a legitimate success
/// ("no recent submissions"), never an error.
pub type SourceResult = Result<Vec<SubmissionRecord>, SourceError>;

/// One upstream submission source: fetch + normalize into the common form.
#[async_trait::async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch_submissions(&self, username: &str) -> SourceResult;
    fn name(&self) -> &'static str;
}

/// Per-difficulty accepted-submission total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DifficultyBucket {
    pub difficulty: Difficulty,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Profile-level stats source; independent of the fallback chain and fails
/// outright on any error.
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_difficulty(&self, username: &str) -> Result<Vec<DifficultyBucket>, SourceError>;
    fn name(&self) -> &'static str;
}

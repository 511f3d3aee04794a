// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod config;
pub mod consistency;
pub mod error;
pub mod metrics;
pub mod proxy;
pub mod sources;
pub mod topics;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{Aggregator, ProfileAnalytics};
pub use crate::api::{router, AppState};
pub use crate::config::UpstreamConfig;
pub use crate::error::{AnalyticsError, SourceError};
pub use crate::sources::types::{
    Difficulty, DifficultyBucket, SubmissionRecord, SubmissionStatus,
};

//! # Aggregator
//! Orchestrates one "fetch for this username" action: the difficulty
//! profile query, then the submission fallback chain, then the two derived
//! views. Everything runs sequentially on purpose; the upstream rate-limits
//! and parallel queries would double the load for little latency gain.
//!
//! Each call is a pure function of the username and the upstream responses
//! observed during that call. Nothing is cached across calls.

use crate::config::UpstreamConfig;
use crate::consistency::{daily_histogram, DayCount};
use crate::error::AnalyticsError;
use crate::sources::difficulty::DifficultyStatsSource;
use crate::sources::fetch_with_fallback;
use crate::sources::graphql::GraphqlSource;
use crate::sources::legacy::LegacySource;
use crate::sources::types::{DifficultyBucket, ProfileSource, SubmissionSource};
use crate::topics::{topic_histogram, TopicCount};

/// The complete derived view set for one user.
///
/// The two sub-pipelines fail independently; a `None` section means that
/// side failed while the other succeeded, so the caller can still render
/// what it has. `aggregate` errors out only when both sides are lost.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileAnalytics {
    pub username: String,
    pub difficulty: Option<Vec<DifficultyBucket>>,
    pub topics: Option<Vec<TopicCount>>,
    pub consistency: Option<Vec<DayCount>>,
}

pub struct Aggregator {
    profile: Box<dyn ProfileSource>,
    sources: Vec<Box<dyn SubmissionSource>>,
}

impl Aggregator {
    /// Production wiring: difficulty stats via GraphQL, submissions via the
    /// legacy REST page with the GraphQL query as fallback.
    pub fn from_config(cfg: &UpstreamConfig) -> Self {
        Self {
            profile: Box::new(DifficultyStatsSource::new(cfg)),
            sources: vec![
                Box::new(LegacySource::new(cfg)),
                Box::new(GraphqlSource::new(cfg)),
            ],
        }
    }

    /// Explicit wiring, used by tests to substitute mock sources.
    pub fn new(profile: Box<dyn ProfileSource>, sources: Vec<Box<dyn SubmissionSource>>) -> Self {
        Self { profile, sources }
    }

    pub async fn aggregate(&self, username: &str) -> Result<ProfileAnalytics, AnalyticsError> {
        let mut profile_err = None;
        let difficulty = match self.profile.fetch_difficulty(username).await {
            Ok(buckets) => Some(buckets),
            Err(e) => {
                tracing::warn!(error = %e, source = self.profile.name(), "profile query failed");
                profile_err = Some(AnalyticsError::Profile(e));
                None
            }
        };

        let (topics, consistency) = match fetch_with_fallback(&self.sources, username).await {
            Ok(records) => (
                Some(topic_histogram(&records)),
                Some(daily_histogram(&records)),
            ),
            Err(agg_err) => {
                tracing::warn!(error = %agg_err, username, "submission aggregation failed");
                if let Some(profile_err) = profile_err {
                    // Both sides lost; "user does not exist" is the more
                    // specific diagnosis when either side reported it.
                    return Err(if profile_err.is_not_found() {
                        profile_err
                    } else {
                        agg_err
                    });
                }
                (None, None)
            }
        };

        Ok(ProfileAnalytics {
            username: username.to_string(),
            difficulty,
            topics,
            consistency,
        })
    }
}

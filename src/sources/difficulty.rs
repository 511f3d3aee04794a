// src/sources/difficulty.rs
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::error::SourceError;
use crate::sources::types::{Difficulty, DifficultyBucket, ProfileSource};

const SUBMIT_STATS_QUERY: &str = r#"
query userSubmitStats($username: String!) {
  matchedUser(username: $username) {
    submitStats: submitStatsGlobal {
      acSubmissionNum { difficulty count }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GqlResponse {
    #[serde(default)]
    data: Option<GqlData>,
}

#[derive(Debug, Deserialize)]
struct GqlData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Vec<CountRow>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    difficulty: String,
    count: u64,
}

/// Profile query for solved-by-difficulty totals. No fallback behind this
/// one; any error is surfaced to the caller as-is.
pub struct DifficultyStatsSource {
    endpoint: String,
    client: reqwest::Client,
}

impl DifficultyStatsSource {
    pub fn new(cfg: &UpstreamConfig) -> Self {
        Self {
            endpoint: format!("{}/graphql", cfg.base_url),
            client: reqwest::Client::new(),
        }
    }

    fn parse_response(body: &str) -> Result<Vec<DifficultyBucket>, SourceError> {
        let resp: GqlResponse = serde_json::from_str(body)?;
        let data = resp
            .data
            .ok_or_else(|| SourceError::Parse("missing data envelope".into()))?;
        let user = data.matched_user.ok_or(SourceError::NotFound)?;
        Ok(normalize_counts(&user.submit_stats.ac_submission_num))
    }
}

/// Normalize upstream rows into exactly the three fixed buckets, in
/// Easy/Medium/Hard order. The upstream's "All" aggregate row is discarded
/// and a missing difficulty zero-fills.
fn normalize_counts(rows: &[CountRow]) -> Vec<DifficultyBucket> {
    let count_for = |label: &str| {
        rows.iter()
            .find(|r| r.difficulty.eq_ignore_ascii_case(label))
            .map(|r| r.count)
            .unwrap_or(0)
    };
    vec![
        DifficultyBucket {
            difficulty: Difficulty::Easy,
            count: count_for("Easy"),
        },
        DifficultyBucket {
            difficulty: Difficulty::Medium,
            count: count_for("Medium"),
        },
        DifficultyBucket {
            difficulty: Difficulty::Hard,
            count: count_for("Hard"),
        },
    ]
}

#[async_trait::async_trait]
impl ProfileSource for DifficultyStatsSource {
    async fn fetch_difficulty(
        &self,
        username: &str,
    ) -> Result<Vec<DifficultyBucket>, SourceError> {
        let body = serde_json::json!({
            "query": SUBMIT_STATS_QUERY,
            "variables": { "username": username },
        });

        let resp = self.client.post(&self.endpoint).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "graphql endpoint returned {}",
                resp.status()
            )));
        }

        let text = resp.text().await?;
        Self::parse_response(&text)
    }

    fn name(&self) -> &'static str {
        "difficulty-stats"
    }
}

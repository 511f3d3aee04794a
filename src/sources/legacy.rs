// src/sources/legacy.rs
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::error::SourceError;
use crate::sources::types::{SubmissionRecord, SubmissionSource, SubmissionStatus};

/// Upstream status code meaning "Accepted" on the legacy REST endpoint.
const STATUS_ACCEPTED: i64 = 10;

#[derive(Debug, Deserialize)]
struct LegacyPage {
    submissions_dump: Vec<LegacyEntry>,
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    timestamp: i64,
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    status_display: Option<String>,
    /// Many legacy records carry no tags at all; absence is not an error.
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Legacy REST source: one bounded page of most-recent submissions.
pub struct LegacySource {
    base_url: String,
    page_limit: u32,
    client: reqwest::Client,
}

impl LegacySource {
    pub fn new(cfg: &UpstreamConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            page_limit: cfg.page_limit,
            client: reqwest::Client::new(),
        }
    }

    fn parse_page(body: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        let t0 = std::time::Instant::now();
        let page: LegacyPage = serde_json::from_str(body)?;

        let out = page
            .submissions_dump
            .into_iter()
            .map(|e| SubmissionRecord {
                timestamp_secs: e.timestamp,
                tags: e.tags.unwrap_or_default(),
                status: map_status(e.status, e.status_display.as_deref()),
            })
            .collect::<Vec<_>>();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("source_parse_ms").record(ms);
        counter!("source_records_total").increment(out.len() as u64);
        Ok(out)
    }
}

fn map_status(code: Option<i64>, display: Option<&str>) -> SubmissionStatus {
    let accepted = code == Some(STATUS_ACCEPTED)
        || display.is_some_and(|d| d.eq_ignore_ascii_case("accepted"));
    if accepted {
        SubmissionStatus::Accepted
    } else {
        SubmissionStatus::Other
    }
}

#[async_trait::async_trait]
impl SubmissionSource for LegacySource {
    async fn fetch_submissions(&self, username: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        let url = format!(
            "{}/api/submissions/{}?limit={}",
            self.base_url, username, self.page_limit
        );
        let resp = self.client.get(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "legacy endpoint returned {}",
                resp.status()
            )));
        }

        let body = resp.text().await?;
        Self::parse_page(&body)
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}

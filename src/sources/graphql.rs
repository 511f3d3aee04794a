// src/sources/graphql.rs
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::error::SourceError;
use crate::sources::types::{SubmissionRecord, SubmissionSource, SubmissionStatus};

const RECENT_AC_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    timestamp
    tags { name }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GqlResponse {
    #[serde(default)]
    data: Option<GqlData>,
    #[serde(default)]
    errors: Option<Vec<GqlError>>,
}

#[derive(Debug, Deserialize)]
struct GqlData {
    #[serde(rename = "recentAcSubmissionList")]
    recent_ac_submission_list: Option<Vec<GqlSubmission>>,
}

#[derive(Debug, Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GqlSubmission {
    /// The upstream serializes epoch seconds inconsistently (number or
    /// string depending on endpoint version); accept both.
    #[serde(deserialize_with = "epoch_secs")]
    timestamp: i64,
    #[serde(default)]
    tags: Vec<GqlTag>,
}

#[derive(Debug, Deserialize)]
struct GqlTag {
    name: String,
}

fn epoch_secs<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }
    match NumOrStr::deserialize(de)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse::<i64>().map_err(serde::de::Error::custom),
    }
}

/// GraphQL source: recent *accepted* submissions with their tag names.
/// Every record it yields is Accepted by construction of the query.
pub struct GraphqlSource {
    endpoint: String,
    page_limit: u32,
    client: reqwest::Client,
}

impl GraphqlSource {
    pub fn new(cfg: &UpstreamConfig) -> Self {
        Self {
            endpoint: format!("{}/graphql", cfg.base_url),
            page_limit: cfg.page_limit,
            client: reqwest::Client::new(),
        }
    }

    fn parse_response(body: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        let t0 = std::time::Instant::now();
        let resp: GqlResponse = serde_json::from_str(body)?;

        let list = match resp.data.and_then(|d| d.recent_ac_submission_list) {
            Some(list) => list,
            None => {
                // Unknown users come back as a null list, usually with an
                // explanatory error entry.
                let not_found = resp
                    .errors
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .any(|e| e.message.to_ascii_lowercase().contains("not exist"));
                return if not_found || resp.errors.is_none() {
                    Err(SourceError::NotFound)
                } else {
                    Err(SourceError::Parse(
                        resp.errors
                            .unwrap_or_default()
                            .into_iter()
                            .map(|e| e.message)
                            .collect::<Vec<_>>()
                            .join("; "),
                    ))
                };
            }
        };

        let out = list
            .into_iter()
            .map(|s| SubmissionRecord {
                timestamp_secs: s.timestamp,
                tags: s.tags.into_iter().map(|t| t.name).collect(),
                status: SubmissionStatus::Accepted,
            })
            .collect::<Vec<_>>();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("source_parse_ms").record(ms);
        counter!("source_records_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait::async_trait]
impl SubmissionSource for GraphqlSource {
    async fn fetch_submissions(&self, username: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        let body = serde_json::json!({
            "query": RECENT_AC_QUERY,
            "variables": { "username": username, "limit": self.page_limit },
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
        "graphql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_always_accepted_with_tag_names() {
        let body = r#"{
            "data": { "recentAcSubmissionList": [
                { "timestamp": 1700000000, "tags": [{ "name": "Graph" }] },
                { "timestamp": "1700000100", "tags": [] }
            ]}
        }"#;
        let records = GraphqlSource::parse_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| r.status == SubmissionStatus::Accepted));
        assert_eq!(records[0].tags, vec!["Graph"]);
        assert_eq!(records[1].timestamp_secs, 1_700_000_100);
        assert!(records[1].tags.is_empty());
    }

    #[test]
    fn null_list_means_user_not_found() {
        let body = r#"{
            "data": { "recentAcSubmissionList": null },
            "errors": [{ "message": "That user does not exist." }]
        }"#;
        let err = GraphqlSource::parse_response(body).unwrap_err();
        assert!(matches!(err, SourceError::NotFound));
    }

    #[test]
    fn unexpected_shape_is_a_parse_error() {
        let body = r#"{ "data": null, "errors": [{ "message": "query malformed" }] }"#;
        let err = GraphqlSource::parse_response(body).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn empty_list_is_valid_success() {
        let body = r#"{ "data": { "recentAcSubmissionList": [] } }"#;
        let records = GraphqlSource::parse_response(body).unwrap();
        assert!(records.is_empty());
    }
}

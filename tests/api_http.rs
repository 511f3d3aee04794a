// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /analytics/{username} (JSON contract + 404 mapping)

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use leet_profile_analyzer::aggregate::Aggregator;
use leet_profile_analyzer::api::{self, AppState};
use leet_profile_analyzer::error::SourceError;
use leet_profile_analyzer::sources::types::{
    Difficulty, DifficultyBucket, ProfileSource, SubmissionRecord, SubmissionSource,
    SubmissionStatus,
};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct HappyProfile;

#[async_trait]
impl ProfileSource for HappyProfile {
    async fn fetch_difficulty(&self, _username: &str) -> Result<Vec<DifficultyBucket>, SourceError> {
        Ok(vec![
            DifficultyBucket {
                difficulty: Difficulty::Easy,
                count: 5,
            },
            DifficultyBucket {
                difficulty: Difficulty::Medium,
                count: 2,
            },
            DifficultyBucket {
                difficulty: Difficulty::Hard,
                count: 0,
            },
        ])
    }
    fn name(&self) -> &'static str {
        "happy-profile"
    }
}

struct HappySubmissions;

#[async_trait]
impl SubmissionSource for HappySubmissions {
    async fn fetch_submissions(&self, _username: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        Ok(vec![SubmissionRecord {
            timestamp_secs: Utc::now().timestamp(),
            tags: vec!["Two Pointers".into()],
            status: SubmissionStatus::Accepted,
        }])
    }
    fn name(&self) -> &'static str {
        "happy-submissions"
    }
}

struct GhostProfile;

#[async_trait]
impl ProfileSource for GhostProfile {
    async fn fetch_difficulty(&self, _username: &str) -> Result<Vec<DifficultyBucket>, SourceError> {
        Err(SourceError::NotFound)
    }
    fn name(&self) -> &'static str {
        "ghost-profile"
    }
}

struct GhostSubmissions;

#[async_trait]
impl SubmissionSource for GhostSubmissions {
    async fn fetch_submissions(&self, _username: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        Err(SourceError::NotFound)
    }
    fn name(&self) -> &'static str {
        "ghost-submissions"
    }
}

fn happy_router() -> Router {
    let agg = Aggregator::new(Box::new(HappyProfile), vec![Box::new(HappySubmissions)]);
    api::router(AppState::new(agg))
}

fn ghost_router() -> Router {
    let agg = Aggregator::new(Box::new(GhostProfile), vec![Box::new(GhostSubmissions)]);
    api::router(AppState::new(agg))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = happy_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok", "health body should be 'ok'");
}

#[tokio::test]
async fn api_analytics_returns_fixed_shape_views() {
    let app = happy_router();

    let req = Request::builder()
        .method("GET")
        .uri("/analytics/alice")
        .body(Body::empty())
        .expect("build GET /analytics/alice");

    let resp = app.oneshot(req).await.expect("oneshot /analytics");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse analytics json");

    // Contract checks for UI consumers
    assert_eq!(v["username"], "alice");
    assert_eq!(v["difficulty"].as_array().expect("difficulty").len(), 3);
    assert_eq!(v["topics"].as_array().expect("topics").len(), 10);
    assert_eq!(v["consistency"].as_array().expect("consistency").len(), 30);
}

#[tokio::test]
async fn api_analytics_maps_unknown_user_to_404() {
    let app = ghost_router();

    let req = Request::builder()
        .method("GET")
        .uri("/analytics/nobody")
        .body(Body::empty())
        .expect("build GET /analytics/nobody");

    let resp = app.oneshot(req).await.expect("oneshot /analytics");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse error json");
    assert_eq!(v["error"], "user not found");
}

//! # Forwarding Proxy
//! Byte-for-byte relay to the upstream platform, for browser frontends that
//! cannot reach it directly (CORS). No schema knowledge: request bodies go
//! up unmodified and the upstream status + body come back unmodified.

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::UpstreamConfig;

#[derive(Clone)]
struct ProxyState {
    client: reqwest::Client,
    base_url: String,
}

/// Router exposing `POST /graphql` and `GET /api/submissions/{*path}`,
/// mergeable into the main app router.
pub fn router(cfg: &UpstreamConfig) -> Router {
    let state = ProxyState {
        client: reqwest::Client::new(),
        base_url: cfg.base_url.clone(),
    };
    Router::new()
        .route("/graphql", post(forward_graphql))
        .route("/api/submissions/{*path}", get(forward_submissions))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn forward_graphql(State(state): State<ProxyState>, body: Bytes) -> impl IntoResponse {
    let url = format!("{}/graphql", state.base_url);
    let resp = state
        .client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;
    relay(resp).await
}

async fn forward_submissions(
    State(state): State<ProxyState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let mut url = format!("{}/api/submissions/{}", state.base_url, path);
    if let Some(q) = query {
        url.push('?');
        url.push_str(&q);
    }
    let resp = state.client.get(&url).send().await;
    relay(resp).await
}

/// Pass the upstream response through untouched; a transport failure is the
/// only thing the proxy reports in its own voice.
async fn relay(resp: Result<reqwest::Response, reqwest::Error>) -> axum::response::Response {
    let resp = match resp {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let status = StatusCode::from_u16(resp.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match resp.bytes().await {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

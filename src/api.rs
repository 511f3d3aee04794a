use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::aggregate::Aggregator;
use crate::error::AnalyticsError;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analytics/{username}", get(analytics))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

async fn analytics(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    let username = username.trim();
    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "username must not be empty" })),
        )
            .into_response();
    }

    match state.aggregator.aggregate(username).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            let status = error_status(&e);
            let body = ErrorBody {
                error: user_message(&e),
            };
            (status, Json(body)).into_response()
        }
    }
}

fn error_status(e: &AnalyticsError) -> StatusCode {
    if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn user_message(e: &AnalyticsError) -> String {
    if e.is_not_found() {
        "user not found".to_string()
    } else {
        format!("upstream temporarily unreachable ({e}); try the proxy transport")
    }
}

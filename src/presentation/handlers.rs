// HTTP request handlers
use crate::domain::position::MAX_FETCH;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::snapshot_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::views::DashboardPage;
use askama::Template;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint, probes the position store
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.position_service.store_status().await {
        Ok(count) => {
            tracing::debug!("Position store reachable, {} samples stored", count);
            (StatusCode::OK, "ok")
        }
        Err(e) => {
            tracing::warn!("Position store unreachable: {:#}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "store unavailable")
        }
    }
}

/// Most recent positions, oldest first
pub async fn list_positions(
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let limit = query.limit.unwrap_or(MAX_FETCH);

    let result = match state.position_service.recent_positions(limit).await {
        Ok(samples) => json_response(StatusCode::OK, &samples, compress).await,
        Err(e) => {
            tracing::error!("Error fetching positions: {:#}", e);
            let body = ErrorResponse {
                error: format!("Database connection error: {}", e),
            };
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &body, compress).await
        }
    };

    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Dashboard page with the latest rendered map and table
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Response {
    let page = {
        let snapshot = state.snapshots.borrow();
        DashboardPage::new(&snapshot, state.refresh_interval.as_secs())
    };

    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Dashboard template error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Latest snapshot as JSON
pub async fn dashboard_snapshot(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let snapshot = state.snapshots.borrow().clone();

    match json_response(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream snapshots as they are rendered
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_receiver(state.snapshots.clone())
}

//! API request handlers
//!
//! Every handler is a GET-only read; faults never reach this layer, so each
//! response is a plain serialized view-model.

use crate::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TradesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

// ==========================================
// Pages
// ==========================================

pub async fn live_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.views.dashboard().await)
}

pub async fn optimizer_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.views.stub_page("optimizer"))
}

pub async fn live_feed_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.views.stub_page("live_feed"))
}

pub async fn reporting_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.views.stub_page("reporting"))
}

// ==========================================
// Health
// ==========================================

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dashboard_server",
        "version": "0.1.0"
    }))
}

// ==========================================
// View-model JSON
// ==========================================

pub async fn get_overview(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.db.overview().await)
}

pub async fn get_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TradesQuery>,
) -> impl IntoResponse {
    // Cap the page size; the trades table grows without bound.
    Json(state.views.recent_trades(query.limit.min(500)).await)
}

pub async fn get_portfolios(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.db.portfolios().await)
}

pub async fn get_optimizer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.views.optimizer().await)
}

//! API module - Axum HTTP server and routes
//!
//! The whole surface is read-only: page view-models for the tabbed dashboard
//! plus raw JSON endpoints. No route accepts mutating input.

mod handlers;

use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main application router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ==========================================
        // Dashboard pages
        // ==========================================
        .route("/", get(handlers::live_dashboard))
        .route("/optimizer", get(handlers::optimizer_page))
        .route("/live-feed", get(handlers::live_feed_page))
        .route("/reporting", get(handlers::reporting_page))
        // ==========================================
        // Health
        // ==========================================
        .route("/api/health", get(handlers::health_check))
        // ==========================================
        // View-model JSON
        // ==========================================
        .route("/api/overview", get(handlers::get_overview))
        .route("/api/trades", get(handlers::get_trades))
        .route("/api/portfolios", get(handlers::get_portfolios))
        .route("/api/optimizer", get(handlers::get_optimizer))
        // Apply middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

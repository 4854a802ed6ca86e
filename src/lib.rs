//! Arena Console - supervision and read-only dashboard for the Arena engine
//!
//! Two binaries share this crate: `engine_supervisor` keeps the external
//! trading engine process alive, and `dashboard_server` serves view-models
//! read from the SQLite store the engine writes.

pub mod api;
pub mod config;
pub mod db;
pub mod supervisor;
pub mod views;

use crate::db::Database;
use crate::views::Views;

/// Application state shared across all handlers
pub struct AppState {
    pub db: Database,
    pub views: Views,
}

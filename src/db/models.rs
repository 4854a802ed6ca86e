//! Row and view-model types read from the engine's store.
//!
//! Every optional field distinguishes absent from zero: a column the store
//! does not have decodes to `None`, never to a default value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Headline numbers for the live dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub equity: f64,
    pub last_price: Option<f64>,
    pub trade_count: i64,
}

/// One row from the trades table, fields resolved through their aliases.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    pub ts: Option<DateTime<Utc>>,
    pub portfolio: Option<String>,
    pub side: Option<String>,
    pub size: Option<f64>,
    pub price: Option<f64>,
}

impl<'r> FromRow<'r, SqliteRow> for TradeRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            ts: row.try_get("ts").ok(),
            portfolio: row.try_get("portfolio").ok(),
            side: row.try_get("side").ok(),
            size: row.try_get("size").ok(),
            price: row.try_get("price").ok(),
        })
    }
}

/// Per-portfolio snapshot; equity and roi exist only in some deployments.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub name: String,
    pub equity: Option<f64>,
    pub roi: Option<f64>,
}

impl<'r> FromRow<'r, SqliteRow> for PortfolioSummary {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        // The name slot may come from an arbitrary first column; accept the
        // integer form before giving up on it.
        let name = row
            .try_get::<String, _>("name")
            .or_else(|_| row.try_get::<i64, _>("name").map(|v| v.to_string()))
            .unwrap_or_default();
        Ok(Self {
            name,
            equity: row.try_get("equity").ok(),
            roi: row.try_get("roi").ok(),
        })
    }
}

/// Latest optimizer run as persisted by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizerSnapshot {
    pub best_roi: Option<f64>,
    pub iterations: Option<i64>,
    /// Raw engine-encoded text; displayed opaquely.
    pub milestones: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for OptimizerSnapshot {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            best_roi: row.try_get("best_roi").ok(),
            iterations: row.try_get("iterations").ok(),
            milestones: row.try_get("milestones").ok(),
        })
    }
}

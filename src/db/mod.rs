//! Read-only store access using SQLx with runtime query checking.
//!
//! The engine owns the store and its schema; nothing here writes or migrates.
//! Every read discovers the columns it needs at query time, resolves logical
//! fields through their declared aliases, and degrades to an explicit default
//! when the store disagrees. Public read operations are total: callers never
//! observe a storage fault.

mod models;
pub mod schema;

pub use models::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Row};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("table {0} missing from store")]
    MissingTable(&'static str),
    #[error("schema mismatch: {table} has no column for {field}")]
    SchemaMismatch {
        table: &'static str,
        field: &'static str,
    },
}

/// Store connection wrapper
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Attach to the store file with a lazy read-only pool. A store that does
    /// not exist yet fails individual reads (which then degrade), not startup;
    /// the file is only ever created by the engine.
    pub fn open(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_lazy_with(options);
        Self { pool }
    }

    /// Wrap an existing pool, e.g. an in-memory store in tests.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Columns actually present on `table`; empty when the table is missing.
    async fn columns(&self, table: &str) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query("SELECT name FROM pragma_table_info(?1)")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.try_get::<String, _>("name").ok())
            .collect())
    }

    // ==========================================
    // Overview
    // ==========================================

    /// Latest equity snapshot plus total trade count. Each piece degrades to
    /// its zero/absent default independently, so a broken snapshots table does
    /// not blank out the trade count.
    pub async fn overview(&self) -> Overview {
        let (equity, last_price) = match self.try_latest_equity().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Equity read degraded, serving defaults: {}", e);
                (0.0, None)
            }
        };
        let trade_count = match self.try_trade_count().await {
            Ok(count) => count,
            Err(e) => {
                warn!("Trade count read degraded, serving 0: {}", e);
                0
            }
        };
        Overview {
            equity,
            last_price,
            trade_count,
        }
    }

    async fn try_latest_equity(&self) -> Result<(f64, Option<f64>), DbError> {
        let cols = self.columns(schema::EQUITY_SNAPSHOTS).await?;
        if cols.is_empty() {
            return Err(DbError::MissingTable(schema::EQUITY_SNAPSHOTS));
        }
        let ts = schema::SNAPSHOT_TS
            .resolve(&cols)
            .ok_or(DbError::SchemaMismatch {
                table: schema::EQUITY_SNAPSHOTS,
                field: schema::SNAPSHOT_TS.logical,
            })?;

        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} DESC LIMIT 1",
            schema::select_list(schema::SNAPSHOT_FIELDS, &cols),
            schema::EQUITY_SNAPSHOTS,
            ts,
        );
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok((
                row.try_get("equity").unwrap_or(0.0),
                row.try_get("price").ok(),
            )),
            None => Ok((0.0, None)),
        }
    }

    async fn try_trade_count(&self) -> Result<i64, DbError> {
        let cols = self.columns(schema::TRADES).await?;
        if cols.is_empty() {
            return Err(DbError::MissingTable(schema::TRADES));
        }
        let row = sqlx::query("SELECT COUNT(*) AS n FROM trades")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n").unwrap_or(0))
    }

    // ==========================================
    // Trades
    // ==========================================

    /// Most recent trades, newest first by the resolved timestamp column.
    /// Degrades to an empty list.
    pub async fn recent_trades(&self, limit: i64) -> Vec<TradeRecord> {
        match self.try_recent_trades(limit.max(0)).await {
            Ok(trades) => trades,
            Err(e) => {
                warn!("Recent trades read degraded, serving none: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_recent_trades(&self, limit: i64) -> Result<Vec<TradeRecord>, DbError> {
        let cols = self.columns(schema::TRADES).await?;
        if cols.is_empty() {
            return Err(DbError::MissingTable(schema::TRADES));
        }
        let ts = schema::TRADE_TS
            .resolve(&cols)
            .ok_or(DbError::SchemaMismatch {
                table: schema::TRADES,
                field: schema::TRADE_TS.logical,
            })?;

        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} DESC LIMIT ?1",
            schema::select_list(schema::TRADE_FIELDS, &cols),
            schema::TRADES,
            ts,
        );
        let rows = sqlx::query(&sql).bind(limit).fetch_all(&self.pool).await?;

        let mut trades = Vec::new();
        for row in rows {
            trades.push(TradeRecord::from_row(&row)?);
        }
        Ok(trades)
    }

    // ==========================================
    // Portfolios
    // ==========================================

    /// All portfolio rows. Missing equity/roi columns are reported as absent,
    /// never defaulted to zero. Degrades to an empty list.
    pub async fn portfolios(&self) -> Vec<PortfolioSummary> {
        match self.try_portfolios().await {
            Ok(portfolios) => portfolios,
            Err(e) => {
                warn!("Portfolios read degraded, serving none: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_portfolios(&self) -> Result<Vec<PortfolioSummary>, DbError> {
        let cols = self.columns(schema::PORTFOLIOS).await?;
        // Name falls back to whatever the first column is.
        let name_col = match schema::PORTFOLIO_NAME.resolve(&cols) {
            Some(col) => col,
            None => cols
                .first()
                .map(String::as_str)
                .ok_or(DbError::MissingTable(schema::PORTFOLIOS))?,
        };

        let sql = format!(
            "SELECT {} AS name, {} FROM {}",
            name_col,
            schema::select_list(schema::PORTFOLIO_DETAIL_FIELDS, &cols),
            schema::PORTFOLIOS,
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut portfolios = Vec::new();
        for row in rows {
            portfolios.push(PortfolioSummary::from_row(&row)?);
        }
        Ok(portfolios)
    }

    // ==========================================
    // Optimizer
    // ==========================================

    /// Latest performance-metrics row by identifier. Degrades to None.
    pub async fn optimizer_snapshot(&self) -> Option<OptimizerSnapshot> {
        match self.try_optimizer_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Optimizer read degraded, serving none: {}", e);
                None
            }
        }
    }

    async fn try_optimizer_snapshot(&self) -> Result<Option<OptimizerSnapshot>, DbError> {
        let cols = self.columns(schema::PERFORMANCE_METRICS).await?;
        if cols.is_empty() {
            return Err(DbError::MissingTable(schema::PERFORMANCE_METRICS));
        }
        let id = schema::METRIC_ID
            .resolve(&cols)
            .ok_or(DbError::SchemaMismatch {
                table: schema::PERFORMANCE_METRICS,
                field: schema::METRIC_ID.logical,
            })?;

        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} DESC LIMIT 1",
            schema::select_list(schema::METRIC_FIELDS, &cols),
            schema::PERFORMANCE_METRICS,
            id,
        );
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok(Some(OptimizerSnapshot::from_row(&row)?)),
            None => Ok(None),
        }
    }
}

//! View-model assembly for the dashboard pages.
//!
//! Pure composition over the reader: each field comes from exactly one read,
//! with no transformation beyond selection. The canonical layout is the
//! tabbed multi-page dashboard; optimizer, live-feed and reporting tabs are
//! stub pages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{Database, OptimizerSnapshot, Overview, PortfolioSummary, TradeRecord};

/// Live dashboard page: overview plus the per-portfolio snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub now: DateTime<Utc>,
    pub active_tab: &'static str,
    pub overview: Overview,
    pub portfolios: Vec<PortfolioSummary>,
}

/// Bounded recent-trades listing.
#[derive(Debug, Clone, Serialize)]
pub struct TradesView {
    pub trades: Vec<TradeRecord>,
}

/// Latest optimizer state, if the engine has persisted any.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizerView {
    pub snapshot: Option<OptimizerSnapshot>,
}

/// Placeholder page for tabs with no behavior yet.
#[derive(Debug, Clone, Serialize)]
pub struct StubPageView {
    pub now: DateTime<Utc>,
    pub active_tab: &'static str,
}

#[derive(Clone)]
pub struct Views {
    db: Database,
}

impl Views {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn dashboard(&self) -> DashboardView {
        DashboardView {
            now: Utc::now(),
            active_tab: "live",
            overview: self.db.overview().await,
            portfolios: self.db.portfolios().await,
        }
    }

    pub async fn recent_trades(&self, limit: i64) -> TradesView {
        TradesView {
            trades: self.db.recent_trades(limit).await,
        }
    }

    pub async fn optimizer(&self) -> OptimizerView {
        OptimizerView {
            snapshot: self.db.optimizer_snapshot().await,
        }
    }

    pub fn stub_page(&self, active_tab: &'static str) -> StubPageView {
        StubPageView {
            now: Utc::now(),
            active_tab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_views() -> Views {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Database::from_pool(pool);
        for sql in [
            "CREATE TABLE equity_snapshots (ts INTEGER, equity REAL, price REAL)",
            "INSERT INTO equity_snapshots VALUES (1, 1500.0, 43000.0)",
            "CREATE TABLE trades (ts INTEGER, portfolio TEXT, side TEXT, size REAL, price REAL)",
            "INSERT INTO trades VALUES (1, 'alpha', 'buy', 1.0, 43000.0)",
            "CREATE TABLE portfolios (name TEXT, equity REAL, roi REAL)",
            "INSERT INTO portfolios VALUES ('alpha', 1500.0, 0.5)",
        ] {
            sqlx::query(sql).execute(db.pool()).await.unwrap();
        }
        Views::new(db)
    }

    #[tokio::test]
    async fn test_dashboard_view_composes_reader_outputs() {
        let views = seeded_views().await;

        let view = views.dashboard().await;
        assert_eq!(view.active_tab, "live");
        assert_eq!(view.overview.equity, 1500.0);
        assert_eq!(view.overview.last_price, Some(43000.0));
        assert_eq!(view.overview.trade_count, 1);
        assert_eq!(view.portfolios.len(), 1);
        assert_eq!(view.portfolios[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_trades_view_is_bounded() {
        let views = seeded_views().await;

        let view = views.recent_trades(0).await;
        assert!(view.trades.is_empty());
        let view = views.recent_trades(5).await;
        assert_eq!(view.trades.len(), 1);
    }

    #[tokio::test]
    async fn test_stub_page_carries_tab_marker() {
        let views = seeded_views().await;
        assert_eq!(views.stub_page("reporting").active_tab, "reporting");
    }
}

//! Logical tables and field-alias declarations for the engine's schema.
//!
//! The engine does not version its schema; column names drift between
//! deployments. Each logical field declares the physical names it accepts,
//! in priority order, and reads resolve them against the columns actually
//! present. Query text is assembled only from these fixed lists plus bound
//! parameters.

pub const EQUITY_SNAPSHOTS: &str = "equity_snapshots";
pub const TRADES: &str = "trades";
pub const PORTFOLIOS: &str = "portfolios";
pub const PERFORMANCE_METRICS: &str = "performance_metrics";

/// One logical field and the physical column names accepted for it.
pub struct FieldAliases {
    pub logical: &'static str,
    pub candidates: &'static [&'static str],
}

impl FieldAliases {
    /// First candidate present in `columns` wins.
    pub fn resolve(&self, columns: &[String]) -> Option<&'static str> {
        self.candidates
            .iter()
            .copied()
            .find(|candidate| columns.iter().any(|col| col == candidate))
    }
}

pub const SNAPSHOT_TS: FieldAliases = FieldAliases {
    logical: "ts",
    candidates: &["ts", "timestamp"],
};
pub const SNAPSHOT_EQUITY: FieldAliases = FieldAliases {
    logical: "equity",
    candidates: &["equity"],
};
pub const SNAPSHOT_PRICE: FieldAliases = FieldAliases {
    logical: "price",
    candidates: &["price"],
};

pub const TRADE_TS: FieldAliases = FieldAliases {
    logical: "ts",
    candidates: &["ts", "timestamp"],
};
pub const TRADE_PORTFOLIO: FieldAliases = FieldAliases {
    logical: "portfolio",
    candidates: &["portfolio", "portfolio_name"],
};
pub const TRADE_SIDE: FieldAliases = FieldAliases {
    logical: "side",
    candidates: &["side", "direction"],
};
pub const TRADE_SIZE: FieldAliases = FieldAliases {
    logical: "size",
    candidates: &["size", "qty"],
};
pub const TRADE_PRICE: FieldAliases = FieldAliases {
    logical: "price",
    candidates: &["price"],
};

pub const PORTFOLIO_NAME: FieldAliases = FieldAliases {
    logical: "name",
    candidates: &["name"],
};
pub const PORTFOLIO_EQUITY: FieldAliases = FieldAliases {
    logical: "equity",
    candidates: &["equity"],
};
pub const PORTFOLIO_ROI: FieldAliases = FieldAliases {
    logical: "roi",
    candidates: &["roi"],
};

pub const METRIC_ID: FieldAliases = FieldAliases {
    logical: "id",
    candidates: &["id", "run_id"],
};
pub const METRIC_BEST_ROI: FieldAliases = FieldAliases {
    logical: "best_roi",
    candidates: &["best_roi"],
};
pub const METRIC_ITERATIONS: FieldAliases = FieldAliases {
    logical: "iterations",
    candidates: &["iterations"],
};
pub const METRIC_MILESTONES: FieldAliases = FieldAliases {
    logical: "milestones",
    candidates: &["milestones"],
};

pub const SNAPSHOT_FIELDS: &[&FieldAliases] = &[&SNAPSHOT_EQUITY, &SNAPSHOT_PRICE];
pub const TRADE_FIELDS: &[&FieldAliases] = &[
    &TRADE_TS,
    &TRADE_PORTFOLIO,
    &TRADE_SIDE,
    &TRADE_SIZE,
    &TRADE_PRICE,
];
pub const PORTFOLIO_DETAIL_FIELDS: &[&FieldAliases] = &[&PORTFOLIO_EQUITY, &PORTFOLIO_ROI];
pub const METRIC_FIELDS: &[&FieldAliases] = &[&METRIC_BEST_ROI, &METRIC_ITERATIONS, &METRIC_MILESTONES];

/// Build a SELECT list with one slot per logical field: resolved columns are
/// aliased to their logical names, unresolved ones become NULL so row mapping
/// stays uniform.
pub fn select_list(fields: &[&FieldAliases], columns: &[String]) -> String {
    fields
        .iter()
        .map(|field| match field.resolve(columns) {
            Some(col) => format!("{} AS {}", col, field.logical),
            None => format!("NULL AS {}", field.logical),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

use serde::{Deserialize, Serialize};

/// Revenue/items totals for one truncation period.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PeriodTotals {
    pub revenue_cents: i64,
    pub items: i64,
}

/// All-time totals across the data set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_products: i64,
    pub total_cashiers: i64,
    pub revenue_cents: i64,
    pub orders: i64,
    pub items: i64,
}

/// One day's worth of sales in the trailing-window histogram.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HeatmapPoint {
    pub date: String,
    pub count: i64,
    pub revenue_cents: i64,
}

//! Reporting Projector: read-only aggregation over committed state.
//!
//! Results are consistent snapshots, not inputs to control decisions, so
//! no locking is involved. Time-bucket expressions come from a closed enum
//! and caller-supplied values are always bound parameters.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::auth::guard;
use crate::config::get_config;
use crate::errors::AppError;
use crate::models::report::{HeatmapPoint, PeriodTotals, Summary};
use crate::models::user::Actor;

/// Allow-listed truncation units for period summaries. Anything outside
/// this enum is rejected before query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Static SQLite expression for the start of the current period.
    /// Week truncation is ISO (Monday start), matching date_trunc('week').
    fn start_expr(&self) -> &'static str {
        match self {
            Period::Week => "date('now', '-6 days', 'weekday 1')",
            Period::Month => "date('now', 'start of month')",
            Period::Year => "date('now', 'start of year')",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(AppError::InvalidInput(format!("invalid period: {}", other))),
        }
    }
}

/// Revenue and item totals since the start of the given period (OWNER only).
pub async fn period_summary(
    pool: &SqlitePool,
    actor: &Actor,
    period: Period,
) -> Result<PeriodTotals, AppError> {
    guard::require_owner(actor)?;

    // start_expr is a static string from the closed enum above
    let query = format!(
        "SELECT COALESCE(SUM(total_price_cents), 0) AS revenue_cents,
                COALESCE(SUM(quantity), 0) AS items
         FROM sales
         WHERE created_at >= {}",
        period.start_expr()
    );

    let totals = sqlx::query_as::<_, PeriodTotals>(&query)
        .fetch_one(pool)
        .await?;

    Ok(totals)
}

/// All-time totals: revenue, order count, item count, product count,
/// cashier count (OWNER only).
pub async fn summary(pool: &SqlitePool, actor: &Actor) -> Result<Summary, AppError> {
    guard::require_owner(actor)?;

    let (revenue_cents, orders, items): (i64, i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(total_price_cents), 0),
                COUNT(*),
                COALESCE(SUM(quantity), 0)
         FROM sales",
    )
    .fetch_one(pool)
    .await?;

    let (total_products,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    let (total_cashiers,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'CASHIER'")
            .fetch_one(pool)
            .await?;

    Ok(Summary {
        total_products,
        total_cashiers,
        revenue_cents,
        orders,
        items,
    })
}

/// Per-day sale count and revenue over a bounded trailing window
/// (OWNER only). The window defaults to 90 days and is clamped to the
/// configured maximum; the cutoff is computed here and bound.
pub async fn heatmap(
    pool: &SqlitePool,
    actor: &Actor,
    days: Option<i64>,
) -> Result<Vec<HeatmapPoint>, AppError> {
    guard::require_owner(actor)?;

    let limits = &get_config().limits;
    let window = days
        .unwrap_or(limits.heatmap_default_days)
        .clamp(1, limits.heatmap_max_days);

    let cutoff = (Utc::now() - Duration::days(window))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let points = sqlx::query_as::<_, HeatmapPoint>(
        "SELECT date(created_at) AS date,
                COUNT(*) AS count,
                COALESCE(SUM(total_price_cents), 0) AS revenue_cents
         FROM sales
         WHERE created_at >= ?
         GROUP BY date(created_at)
         ORDER BY date(created_at) ASC",
    )
    .bind(&cutoff)
    .fetch_all(pool)
    .await?;

    Ok(points)
}

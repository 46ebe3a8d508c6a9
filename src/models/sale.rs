use serde::{Deserialize, Serialize};

/// A sale is a fact: never updated, never deleted. `unit_price_cents` is
/// the price snapshot taken when the sale was recorded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub cashier_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub created_at: Option<String>,
}

/// Sale with product and cashier context (JOIN result).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleWithContext {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub cashier_id: i64,
    pub cashier_email: String,
    pub cashier_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub created_at: Option<String>,
}

/// Optional time bounds for sale listings. Bounds are validated and bound
/// as parameters; they never reach query text directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleFilter {
    pub from: Option<String>,
    pub to: Option<String>,
}

use serde::{Deserialize, Serialize};

/// Prices are fixed-point minor units (cents); stock is a non-negative
/// integer enforced by the schema and the conditional decrement.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductPayload {
    pub name: String,
    pub price_cents: i64,
    pub stock_quantity: i64,
}

/// Full-row update: all three mutable fields travel together.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductPayload {
    pub name: String,
    pub price_cents: i64,
    pub stock_quantity: i64,
}

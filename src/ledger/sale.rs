use sqlx::SqlitePool;

use crate::audit::{self, AuditAction};
use crate::config::get_config;
use crate::errors::AppError;
use crate::models::sale::{Sale, SaleFilter, SaleWithContext};
use crate::models::user::{Actor, Role};
use crate::validation;

/// Record a sale: validate stock, decrement inventory, insert the sale
/// snapshot and append its SALE_RECORD audit entry — one atomic unit.
///
/// The pre-check outside the transaction only fails fast; the conditional
/// decrement inside it is the authoritative stock guard. Issuing the write
/// as the transaction's first statement serializes competing sales on the
/// store's write lock, so the sum of committed decrements can never drive
/// stock below zero.
pub async fn record_sale(
    pool: &SqlitePool,
    actor: &Actor,
    product_id: i64,
    quantity: i64,
) -> Result<Sale, AppError> {
    validation::validate_id(product_id, "product_id")?;
    validation::validate_sale_quantity(quantity)?;

    let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;
    if stock < quantity {
        return Err(AppError::InsufficientStock {
            product_id,
            available: stock,
            requested: quantity,
        });
    }

    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE products
         SET stock_quantity = stock_quantity - ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ? AND stock_quantity >= ?",
    )
    .bind(quantity)
    .bind(product_id)
    .bind(quantity)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        // Distinguish a vanished product from a lost race on stock.
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;
        return match existing {
            None => Err(AppError::NotFound(format!("product {}", product_id))),
            Some((available,)) => Err(AppError::InsufficientStock {
                product_id,
                available,
                requested: quantity,
            }),
        };
    }

    // Price snapshot, read under the same transaction
    let (unit_price_cents,): (i64,) =
        sqlx::query_as("SELECT price_cents FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await?;
    let total_price_cents = unit_price_cents * quantity;

    let result = sqlx::query(
        "INSERT INTO sales (product_id, cashier_id, quantity, unit_price_cents, total_price_cents)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(actor.id)
    .bind(quantity)
    .bind(unit_price_cents)
    .bind(total_price_cents)
    .execute(&mut *tx)
    .await?;
    let sale_id = result.last_insert_rowid();

    audit::append(
        &mut tx,
        actor,
        AuditAction::SaleRecord,
        Some(product_id),
        &serde_json::json!({
            "quantity": quantity,
            "unit_price_cents": unit_price_cents,
            "total_price_cents": total_price_cents,
        }),
    )
    .await?;

    let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
        .bind(sale_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(sale)
}

/// List sales with product and cashier context, newest first. Owners see
/// everything; cashiers see only their own. Optional time bounds are bound
/// parameters, and the page size is capped.
pub async fn list_sales(
    pool: &SqlitePool,
    actor: &Actor,
    filter: &SaleFilter,
) -> Result<Vec<SaleWithContext>, AppError> {
    if let Some(from) = &filter.from {
        validation::validate_date_bound(from)?;
    }
    if let Some(to) = &filter.to {
        validation::validate_date_bound(to)?;
    }

    let mut query = String::from(
        "SELECT s.id,
                s.product_id,
                COALESCE(p.name, '') AS product_name,
                s.cashier_id,
                COALESCE(u.email, '') AS cashier_email,
                COALESCE(u.name, substr(u.email, 1, instr(u.email, '@') - 1), '') AS cashier_name,
                s.quantity,
                s.unit_price_cents,
                s.total_price_cents,
                s.created_at
         FROM sales s
         LEFT JOIN products p ON p.id = s.product_id
         LEFT JOIN users u ON u.id = s.cashier_id
         WHERE 1=1",
    );

    if actor.role == Role::Cashier {
        query.push_str(" AND s.cashier_id = ?");
    }
    if filter.from.is_some() {
        query.push_str(" AND s.created_at >= ?");
    }
    if filter.to.is_some() {
        query.push_str(" AND s.created_at <= ?");
    }
    query.push_str(" ORDER BY s.created_at DESC, s.id DESC LIMIT ?");

    let mut sql_query = sqlx::query_as::<_, SaleWithContext>(&query);

    if actor.role == Role::Cashier {
        sql_query = sql_query.bind(actor.id);
    }
    if let Some(from) = &filter.from {
        sql_query = sql_query.bind(from);
    }
    if let Some(to) = &filter.to {
        sql_query = sql_query.bind(to);
    }

    let sales = sql_query
        .bind(get_config().limits.sales_max)
        .fetch_all(pool)
        .await?;

    Ok(sales)
}

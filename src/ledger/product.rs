use sqlx::SqlitePool;

use crate::audit::{self, AuditAction};
use crate::auth::guard;
use crate::errors::AppError;
use crate::models::product::{CreateProductPayload, Product, UpdateProductPayload};
use crate::models::user::Actor;
use crate::validation;

/// List products, newest first. Any authenticated role.
pub async fn list_products(pool: &SqlitePool, _actor: &Actor) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Create a product (OWNER only). The insert and its PRODUCT_ADD audit
/// entry commit together.
pub async fn add_product(
    pool: &SqlitePool,
    actor: &Actor,
    payload: CreateProductPayload,
) -> Result<Product, AppError> {
    guard::require_owner(actor)?;
    validation::validate_product_name(&payload.name)?;
    validation::validate_price_cents(payload.price_cents)?;
    validation::validate_stock_quantity(payload.stock_quantity)?;

    let name = payload.name.trim().to_string();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO products (name, price_cents, stock_quantity) VALUES (?, ?, ?)",
    )
    .bind(&name)
    .bind(payload.price_cents)
    .bind(payload.stock_quantity)
    .execute(&mut *tx)
    .await?;
    let id = result.last_insert_rowid();

    audit::append(
        &mut tx,
        actor,
        AuditAction::ProductAdd,
        Some(id),
        &serde_json::json!({
            "name": name,
            "price_cents": payload.price_cents,
            "stock_quantity": payload.stock_quantity,
        }),
    )
    .await?;

    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(product)
}

/// Update all mutable fields of a product (OWNER only). `NotFound` rolls
/// back the whole transaction: no audit entry is ever written for a
/// mutation that did not occur.
pub async fn update_product(
    pool: &SqlitePool,
    actor: &Actor,
    product_id: i64,
    payload: UpdateProductPayload,
) -> Result<Product, AppError> {
    guard::require_owner(actor)?;
    validation::validate_id(product_id, "product_id")?;
    validation::validate_product_name(&payload.name)?;
    validation::validate_price_cents(payload.price_cents)?;
    validation::validate_stock_quantity(payload.stock_quantity)?;

    let name = payload.name.trim().to_string();

    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE products
         SET name = ?, price_cents = ?, stock_quantity = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&name)
    .bind(payload.price_cents)
    .bind(payload.stock_quantity)
    .bind(product_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::NotFound(format!("product {}", product_id)));
    }

    audit::append(
        &mut tx,
        actor,
        AuditAction::ProductUpdate,
        Some(product_id),
        &serde_json::json!({
            "name": name,
            "price_cents": payload.price_cents,
            "stock_quantity": payload.stock_quantity,
        }),
    )
    .await?;

    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(product)
}

/// Delete a product (OWNER only).
///
/// Refused with `Conflict` while any sale references the product. The
/// PRODUCT_DELETE entry is written while the row still exists — the entry's
/// product reference must satisfy the foreign key at insert time — and the
/// row is removed afterwards, inside the same transaction. On commit the
/// entry's product_id becomes NULL via the SET NULL referential action.
pub async fn delete_product(
    pool: &SqlitePool,
    actor: &Actor,
    product_id: i64,
) -> Result<(), AppError> {
    guard::require_owner(actor)?;
    validation::validate_id(product_id, "product_id")?;

    let mut tx = pool.begin().await?;

    let referenced: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM sales WHERE product_id = ? LIMIT 1")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
    if referenced.is_some() {
        return Err(AppError::Conflict(
            "cannot delete product: existing sales reference it".into(),
        ));
    }

    let before: Option<(i64, String)> =
        sqlx::query_as("SELECT id, name FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (_, name) = before.ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

    // Audit before destroy
    audit::append(
        &mut tx,
        actor,
        AuditAction::ProductDelete,
        Some(product_id),
        &serde_json::json!({ "name": name }),
    )
    .await?;

    let deleted = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(product_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(AppError::NotFound(format!("product {}", product_id)));
    }

    tx.commit().await?;

    Ok(())
}

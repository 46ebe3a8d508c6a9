use sqlx::SqlitePool;

/// Run all database migrations (idempotent CREATE TABLE IF NOT EXISTS).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // ═══════════════════════════════════════
    // TABLE: users
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER  PRIMARY KEY AUTOINCREMENT,
            email         TEXT     NOT NULL UNIQUE,
            password_hash TEXT     NOT NULL,
            role          TEXT     NOT NULL CHECK(role IN ('OWNER', 'CASHIER')),
            name          TEXT,
            created_at    DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: products
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id             INTEGER  PRIMARY KEY AUTOINCREMENT,
            name           TEXT     NOT NULL,
            price_cents    INTEGER  NOT NULL CHECK(price_cents >= 0),
            stock_quantity INTEGER  NOT NULL DEFAULT 0 CHECK(stock_quantity >= 0),
            created_at     DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at     DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: sales
    // ═══════════════════════════════════════
    // RESTRICT on product_id: a product with recorded sales cannot be
    // deleted. Sales rows themselves are immutable facts.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS sales (
            id                INTEGER  PRIMARY KEY AUTOINCREMENT,
            product_id        INTEGER  NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
            cashier_id        INTEGER  NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
            quantity          INTEGER  NOT NULL CHECK(quantity > 0),
            unit_price_cents  INTEGER  NOT NULL CHECK(unit_price_cents >= 0),
            total_price_cents INTEGER  NOT NULL CHECK(total_price_cents >= 0),
            created_at        DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sales_created_at ON sales(created_at)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sales_cashier ON sales(cashier_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sales_product ON sales(product_id)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: activity_logs (audit trail)
    // ═══════════════════════════════════════
    // Append-only. product_id is SET NULL so audit entries survive product
    // deletion; actor_id RESTRICTs so an audited actor cannot vanish.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS activity_logs (
            id         INTEGER  PRIMARY KEY AUTOINCREMENT,
            actor_id   INTEGER  NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
            actor_role TEXT     NOT NULL CHECK(actor_role IN ('OWNER', 'CASHIER')),
            action     TEXT     NOT NULL CHECK(action IN
                           ('PRODUCT_ADD', 'PRODUCT_UPDATE', 'PRODUCT_DELETE', 'SALE_RECORD')),
            product_id INTEGER  REFERENCES products(id) ON DELETE SET NULL,
            details    TEXT     NOT NULL DEFAULT '{}',
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_activity_logs_created_at ON activity_logs(created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_activity_logs_actor ON activity_logs(actor_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_activity_logs_product ON activity_logs(product_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

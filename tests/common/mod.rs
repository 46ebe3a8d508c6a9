//! Shared harness for integration tests: per-test throwaway database plus
//! seed helpers that go through the same schema the crate migrates.

#![allow(dead_code)]

use pos_backend::ledger;
use pos_backend::models::product::{CreateProductPayload, Product};
use pos_backend::models::user::{Actor, Role};
use pos_backend::{bootstrap, AppState};

/// Bootstrap a fresh state against a unique temp directory.
pub async fn test_state() -> AppState {
    // Cheap hashes are fine for tests; must be set before the first
    // config read in this process.
    std::env::set_var("BCRYPT_COST", "4");

    let dir = std::env::temp_dir().join(format!("pos-backend-test-{}", uuid::Uuid::new_v4()));
    let state = bootstrap(&dir).await.expect("bootstrap test database");
    pos_backend::database::connection::health_check(&state.db)
        .await
        .expect("database is reachable");
    state
}

/// Insert a user row directly (ledger tests don't need real credentials).
pub async fn seed_user(state: &AppState, email: &str, role: Role) -> Actor {
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, role, name) VALUES (?, 'test-hash', ?, ?)",
    )
    .bind(email)
    .bind(role.as_str())
    .bind(email.split('@').next().unwrap())
    .execute(&state.db)
    .await
    .expect("seed user");

    Actor {
        id: result.last_insert_rowid(),
        role,
    }
}

pub async fn seed_owner(state: &AppState) -> Actor {
    seed_user(state, "owner@shop.example", Role::Owner).await
}

pub async fn seed_cashier(state: &AppState, email: &str) -> Actor {
    seed_user(state, email, Role::Cashier).await
}

/// Create a product through the ledger (so it is audited like real data).
pub async fn seed_product(
    state: &AppState,
    owner: &Actor,
    name: &str,
    price_cents: i64,
    stock_quantity: i64,
) -> Product {
    ledger::product::add_product(
        &state.db,
        owner,
        CreateProductPayload {
            name: name.to_string(),
            price_cents,
            stock_quantity,
        },
    )
    .await
    .expect("seed product")
}

pub async fn stock_of(state: &AppState, product_id: i64) -> i64 {
    let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(&state.db)
        .await
        .expect("read stock");
    stock
}

pub async fn count_sales(state: &AppState) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales")
        .fetch_one(&state.db)
        .await
        .expect("count sales");
    n
}

pub async fn count_activity(state: &AppState, action: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs WHERE action = ?")
        .bind(action)
        .fetch_one(&state.db)
        .await
        .expect("count activity");
    n
}

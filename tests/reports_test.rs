//! Reporting Projector tests: totals, period truncation, trailing-window
//! histogram, and the owner-only gate.

mod common;

use common::*;
use pos_backend::errors::AppError;
use pos_backend::ledger::sale;
use pos_backend::reports::{self, Period};

#[tokio::test]
async fn all_time_summary_counts_everything() {
    let state = test_state().await;
    let owner = seed_owner(&state).await;
    let casey = seed_cashier(&state, "casey@shop.example").await;
    let jordan = seed_cashier(&state, "jordan@shop.example").await;
    let espresso = seed_product(&state, &owner, "Espresso", 1_000, 50).await;
    let beans = seed_product(&state, &owner, "Beans", 2_500, 50).await;

    sale::record_sale(&state.db, &casey, espresso.id, 2).await.expect("sale");
    sale::record_sale(&state.db, &jordan, beans.id, 1).await.expect("sale");
    sale::record_sale(&state.db, &casey, beans.id, 4).await.expect("sale");

    let summary = reports::summary(&state.db, &owner).await.expect("summary");
    assert_eq!(summary.total_products, 2);
    assert_eq!(summary.total_cashiers, 2);
    assert_eq!(summary.orders, 3);
    assert_eq!(summary.items, 7);
    assert_eq!(summary.revenue_cents, 2 * 1_000 + 1 * 2_500 + 4 * 2_500);
}

#[tokio::test]
async fn reports_are_owner_only() {
    let state = test_state().await;
    seed_owner(&state).await;
    let cashier = seed_cashier(&state, "casey@shop.example").await;

    assert!(matches!(
        reports::summary(&state.db, &cashier).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        reports::period_summary(&state.db, &cashier, Period::Week).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        reports::heatmap(&state.db, &cashier, None).await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn fresh_sales_land_in_every_period_bucket() {
    let state = test_state().await;
    let owner = seed_owner(&state).await;
    let cashier = seed_cashier(&state, "casey@shop.example").await;
    let prod = seed_product(&state, &owner, "Espresso", 1_000, 50).await;

    sale::record_sale(&state.db, &cashier, prod.id, 3).await.expect("sale");

    for period in [Period::Week, Period::Month, Period::Year] {
        let totals = reports::period_summary(&state.db, &owner, period)
            .await
            .expect("period summary");
        assert_eq!(totals.items, 3, "period {:?}", period);
        assert_eq!(totals.revenue_cents, 3_000, "period {:?}", period);
    }
}

#[tokio::test]
async fn empty_periods_report_zero_totals() {
    let state = test_state().await;
    let owner = seed_owner(&state).await;

    let totals = reports::period_summary(&state.db, &owner, Period::Month)
        .await
        .expect("empty summary");
    assert_eq!(totals.revenue_cents, 0);
    assert_eq!(totals.items, 0);
}

#[tokio::test]
async fn heatmap_buckets_by_day_within_the_window() {
    let state = test_state().await;
    let owner = seed_owner(&state).await;
    let cashier = seed_cashier(&state, "casey@shop.example").await;
    let prod = seed_product(&state, &owner, "Espresso", 1_000, 50).await;

    sale::record_sale(&state.db, &cashier, prod.id, 1).await.expect("sale");
    sale::record_sale(&state.db, &cashier, prod.id, 2).await.expect("sale");
    sale::record_sale(&state.db, &cashier, prod.id, 4).await.expect("sale");

    let points = reports::heatmap(&state.db, &owner, None).await.expect("heatmap");
    assert!(!points.is_empty());

    let total_count: i64 = points.iter().map(|p| p.count).sum();
    let total_revenue: i64 = points.iter().map(|p| p.revenue_cents).sum();
    assert_eq!(total_count, 3);
    assert_eq!(total_revenue, 7_000);

    // Dates come back as YYYY-MM-DD, oldest first
    for p in &points {
        assert_eq!(p.date.len(), 10);
    }
    assert!(points.windows(2).all(|w| w[0].date <= w[1].date));

    // Absurd windows are clamped, not rejected
    let clamped = reports::heatmap(&state.db, &owner, Some(1_000_000))
        .await
        .expect("clamped window");
    assert_eq!(clamped.iter().map(|p| p.count).sum::<i64>(), 3);
}

#[tokio::test]
async fn old_sales_fall_out_of_the_heatmap_window() {
    let state = test_state().await;
    let owner = seed_owner(&state).await;
    let cashier = seed_cashier(&state, "casey@shop.example").await;
    let prod = seed_product(&state, &owner, "Espresso", 1_000, 50).await;

    sale::record_sale(&state.db, &cashier, prod.id, 1).await.expect("sale");

    // Backdate the sale beyond any window we will ask for
    sqlx::query("UPDATE sales SET created_at = '2001-01-01 12:00:00'")
        .execute(&state.db)
        .await
        .expect("backdate");

    let points = reports::heatmap(&state.db, &owner, Some(30)).await.expect("heatmap");
    assert!(points.is_empty());
}

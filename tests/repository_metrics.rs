mod common;

use chrono::{Duration, Utc};
use smartretail::domain::repositories::MetricsRepository;
use smartretail::infrastructure::persistence::PgMetricsRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repo(pool: PgPool) -> PgMetricsRepository {
    PgMetricsRepository::new(Arc::new(pool))
}

#[sqlx::test]
async fn test_completed_sales_total_respects_window_and_status(pool: PgPool) {
    common::create_sale(&pool, "S001", 0, 10.5, "completed").await;
    common::create_sale(&pool, "S002", 0, 4.5, "completed").await;
    common::create_sale(&pool, "S003", 0, 100.0, "pending").await;
    common::create_sale(&pool, "S004", 3, 50.0, "completed").await;

    let repo = repo(pool);
    let now = Utc::now();

    let total = repo
        .completed_sales_total(now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(total, 15.0);
}

#[sqlx::test]
async fn test_completed_sales_total_empty_is_zero(pool: PgPool) {
    let repo = repo(pool);
    let now = Utc::now();

    let total = repo
        .completed_sales_total(now - Duration::days(1), now)
        .await
        .unwrap();

    assert_eq!(total, 0.0);
}

#[sqlx::test]
async fn test_completed_items_sold(pool: PgPool) {
    let product = common::create_product(&pool, "P001", 20, 50, 5).await;
    let completed = common::create_sale(&pool, "S001", 0, 30.0, "completed").await;
    let refunded = common::create_sale(&pool, "S002", 0, 30.0, "refunded").await;
    common::create_sale_item(&pool, completed, product, 2).await;
    common::create_sale_item(&pool, completed, product, 5).await;
    common::create_sale_item(&pool, refunded, product, 9).await;

    let repo = repo(pool);
    let now = Utc::now();

    let items = repo
        .completed_items_sold(now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(items, 7);
}

#[sqlx::test]
async fn test_employee_counts(pool: PgPool) {
    common::create_employee(&pool, "E001", "a@example.com", "Manager", "active").await;
    common::create_employee(&pool, "E002", "b@example.com", "Sales", "active").await;
    common::create_employee(&pool, "E003", "c@example.com", "Sales", "on_leave").await;

    let (active, total) = repo(pool).employee_counts().await.unwrap();

    assert_eq!(active, 2);
    assert_eq!(total, 3);
}

#[sqlx::test]
async fn test_low_stock_products_only_at_or_below_threshold(pool: PgPool) {
    common::create_product(&pool, "P001", 10, 50, 10).await;
    common::create_product(&pool, "P002", 0, 50, 10).await;
    common::create_product(&pool, "P003", 11, 50, 10).await;

    let products = repo(pool).low_stock_products().await.unwrap();

    let ids: Vec<_> = products.iter().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["P001", "P002"]);
    assert_eq!(products[1].current_stock, 0);
    assert_eq!(products[0].unit, "unit");
}

#[sqlx::test]
async fn test_recent_sales_newest_first_with_limit(pool: PgPool) {
    for (i, days_ago) in [5, 1, 3, 0].iter().enumerate() {
        common::create_sale(&pool, &format!("S{i}"), *days_ago, 12.34, "completed").await;
    }

    let sales = repo(pool).recent_sales(3).await.unwrap();

    let ids: Vec<_> = sales.iter().map(|s| s.sale_id.as_str()).collect();
    assert_eq!(ids, vec!["S3", "S1", "S2"]);
    assert_eq!(sales[0].total_amount, 12.34);
    assert_eq!(sales[0].payment_method, "CARD");
}

#[sqlx::test]
async fn test_completed_sales_since(pool: PgPool) {
    common::create_sale(&pool, "S001", 2, 10.0, "completed").await;
    common::create_sale(&pool, "S002", 10, 99.0, "completed").await;
    common::create_sale(&pool, "S003", 1, 7.0, "cancelled").await;

    let sales = repo(pool)
        .completed_sales_since(Utc::now() - Duration::days(7))
        .await
        .unwrap();

    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].1, 10.0);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    assert!(repo(pool).ping().await.is_ok());
}

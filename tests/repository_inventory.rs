mod common;

use smartretail::domain::entities::InventoryFilter;
use smartretail::domain::repositories::InventoryRepository;
use smartretail::infrastructure::persistence::PgInventoryRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repo(pool: PgPool) -> PgInventoryRepository {
    PgInventoryRepository::new(Arc::new(pool))
}

async fn seed(pool: &PgPool) {
    common::create_product_in(pool, "BEV-001", "Green Tea", "Beverages", 3.5).await;
    common::create_product_in(pool, "BEV-002", "Cola 100%", "Beverages", 2.2).await;
    common::create_product_in(pool, "STA-001", "Blue Pen", "Stationery", 1.0).await;
}

fn ids(products: &[smartretail::domain::entities::Product]) -> Vec<&str> {
    products.iter().map(|p| p.product_id.as_str()).collect()
}

#[sqlx::test]
async fn test_lists_all_products_by_id(pool: PgPool) {
    seed(&pool).await;
    let repo = repo(pool);

    let products = repo.list_products(&InventoryFilter::default()).await.unwrap();

    assert_eq!(ids(&products), vec!["BEV-001", "BEV-002", "STA-001"]);
    assert_eq!(products[0].price, 3.5);
    assert_eq!(products[0].unit, "unit");
}

#[sqlx::test]
async fn test_filters_by_category(pool: PgPool) {
    seed(&pool).await;
    let repo = repo(pool);

    let filter = InventoryFilter::new(Some("Stationery".to_string()), None);
    let products = repo.list_products(&filter).await.unwrap();

    assert_eq!(ids(&products), vec!["STA-001"]);
}

#[sqlx::test]
async fn test_search_matches_name_or_id_case_insensitively(pool: PgPool) {
    seed(&pool).await;
    let repo = repo(pool);

    let by_name = InventoryFilter::new(None, Some("green".to_string()));
    assert_eq!(ids(&repo.list_products(&by_name).await.unwrap()), vec!["BEV-001"]);

    let by_id = InventoryFilter::new(None, Some("sta-".to_string()));
    assert_eq!(ids(&repo.list_products(&by_id).await.unwrap()), vec!["STA-001"]);

    let within_category = InventoryFilter::new(Some("Stationery".to_string()), Some("tea".to_string()));
    assert!(repo.list_products(&within_category).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_search_wildcards_are_literal(pool: PgPool) {
    seed(&pool).await;
    let repo = repo(pool);

    let percent = InventoryFilter::new(None, Some("100%".to_string()));
    assert_eq!(ids(&repo.list_products(&percent).await.unwrap()), vec!["BEV-002"]);

    let underscore = InventoryFilter::new(None, Some("_".to_string()));
    assert!(repo.list_products(&underscore).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_category_counts(pool: PgPool) {
    seed(&pool).await;
    let repo = repo(pool);

    let mut counts = repo.category_counts().await.unwrap();
    counts.sort_by(|a, b| a.category.cmp(&b.category));

    let counts: Vec<_> = counts.iter().map(|c| (c.category.as_str(), c.products)).collect();
    assert_eq!(counts, vec![("Beverages", 2), ("Stationery", 1)]);
}

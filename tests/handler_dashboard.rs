mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test]
async fn test_dashboard_requires_session(pool: PgPool) {
    let (server, _) = common::create_test_server(pool);

    let response = server.get("/dashboard").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");

    let page = server.get("/login").await.text();
    assert!(page.contains("Please login to access the dashboard."));
}

#[sqlx::test]
async fn test_dashboard_shows_todays_figures(pool: PgPool) {
    let product = common::create_product(&pool, "P001", 2, 50, 10).await;
    let today = common::create_sale(&pool, "S001", 0, 150.0, "completed").await;
    common::create_sale_item(&pool, today, product, 3).await;
    common::create_sale(&pool, "S002", 1, 100.0, "completed").await;
    common::create_sale(&pool, "S003", 0, 999.0, "cancelled").await;

    let (server, _) = common::create_test_server(pool);
    common::login(&server, "sales@example.com", common::PASSWORD).await;

    let html = server.get("/dashboard").await.text();

    assert!(html.contains("RM 150.00"));
    assert!(html.contains("+50.0%"));
    assert!(html.contains("Product P001"));
    assert!(html.contains("2/50"));
    assert!(html.contains("S003"));
}

#[sqlx::test]
async fn test_manager_sees_employee_card(pool: PgPool) {
    common::create_employee(&pool, "E001", "boss@example.com", "Manager", "active").await;
    common::create_employee(&pool, "E002", "clerk@example.com", "Sales", "inactive").await;

    let (server, _) = common::create_test_server(pool);
    common::login(&server, "boss@example.com", common::PASSWORD).await;

    let html = server.get("/dashboard").await.text();

    assert!(html.contains("Active Employees"));
    assert!(html.contains("1 / 2"));
    assert!(html.contains("50.0%"));
    assert!(html.contains(r#"class="badge">Manager<"#));
}

#[sqlx::test]
async fn test_sales_role_does_not_see_employee_card(pool: PgPool) {
    common::create_employee(&pool, "E002", "clerk@example.com", "Sales", "active").await;

    let (server, _) = common::create_test_server(pool);
    common::login(&server, "clerk@example.com", common::PASSWORD).await;

    let html = server.get("/dashboard").await.text();

    assert!(!html.contains("Active Employees"));
    assert!(html.contains(r#"class="badge">Sales<"#));
}

#[sqlx::test]
async fn test_unknown_employee_has_no_role(pool: PgPool) {
    let (server, _) = common::create_test_server(pool);
    common::login(&server, "stranger@example.com", common::PASSWORD).await;

    let response = server.get("/dashboard").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"class="badge">Employee<"#));
    assert!(!html.contains("Active Employees"));
}

#[sqlx::test]
async fn test_dashboard_renders_when_metrics_fail(pool: PgPool) {
    sqlx::query("DROP TABLE sales_items, sales")
        .execute(&pool)
        .await
        .unwrap();

    let (server, _) = common::create_test_server(pool);
    common::login(&server, "manager@example.com", common::PASSWORD).await;

    let response = server.get("/dashboard").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Error loading dashboard data."));
    assert!(html.contains("RM 0.00"));
}

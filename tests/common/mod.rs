#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use smartretail::application::services::{
    AccessService, AuthService, DashboardService, InventoryService, ReportService,
};
use smartretail::domain::entities::AuthSession;
use smartretail::domain::identity::{AuthError, IdentityProvider};
use smartretail::domain::repositories::MetricsRepository;
use smartretail::infrastructure::persistence::{
    PgEmployeeRepository, PgInventoryRepository, PgMetricsRepository, PgReportRepository,
};
use smartretail::infrastructure::session::{self, SessionBackend};
use smartretail::routes::router_without_rate_limits;
use smartretail::state::AppState;
use smartretail::web::csrf::CsrfGuard;

pub const PASSWORD: &str = "correct-password";
pub const UNCONFIRMED_EMAIL: &str = "new@example.com";
pub const OFFLINE_EMAIL: &str = "offline@example.com";

/// In-process stand-in for the hosted authentication service.
///
/// Any email signs in with [`PASSWORD`]; a few addresses trigger specific
/// failures.
#[derive(Default)]
pub struct FakeIdentity {
    pub unhealthy: AtomicBool,
    pub sign_ins: AtomicUsize,
    pub sign_outs: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);

        match email {
            UNCONFIRMED_EMAIL => Err(AuthError::EmailNotConfirmed),
            OFFLINE_EMAIL => Err(AuthError::Network("connection refused".to_string())),
            _ if password == PASSWORD => {
                let mut session =
                    AuthSession::new(format!("user-{email}"), email, format!("token-{email}"));
                session.refresh_token = Some("refresh".to_string());
                session.expires_at = Some(1_900_000_000);
                Ok(session)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

pub fn create_test_state(pool: PgPool, identity: Arc<FakeIdentity>) -> AppState {
    let pool = Arc::new(pool);
    let metrics: Arc<dyn MetricsRepository> = Arc::new(PgMetricsRepository::new(pool.clone()));

    AppState {
        auth_service: Arc::new(AuthService::new(identity)),
        dashboard_service: Arc::new(DashboardService::new(metrics.clone())),
        inventory_service: Arc::new(InventoryService::new(Arc::new(
            PgInventoryRepository::new(pool.clone()),
        ))),
        report_service: Arc::new(ReportService::new(
            Arc::new(PgReportRepository::new(pool.clone())),
            metrics,
        )),
        access_service: Arc::new(AccessService::new(Arc::new(PgEmployeeRepository::new(
            pool,
        )))),
        csrf: Arc::new(CsrfGuard::new("test-secret-key-that-is-long-enough!")),
        sessions: SessionBackend::memory(),
    }
}

/// Full page and API router on in-memory sessions; the server keeps cookies
/// between requests like a browser.
pub fn create_test_server(pool: PgPool) -> (TestServer, Arc<FakeIdentity>) {
    let identity = Arc::new(FakeIdentity::default());
    let state = create_test_state(pool, identity.clone());
    let sessions = session::layer(state.sessions.clone(), 3600, false);

    let app = router_without_rate_limits(state, sessions);
    let server = TestServer::builder().save_cookies().build(app).unwrap();

    (server, identity)
}

/// Pulls the first hidden CSRF token out of a rendered page.
pub fn csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page has a csrf field") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

/// Signs in through the login form.
pub async fn login(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    let page = server.get("/login").await;
    let token = csrf_token(&page.text());

    server
        .post("/login/submit")
        .form(&[
            ("email", email),
            ("password", password),
            ("csrf_token", token.as_str()),
        ])
        .await
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn create_employee(pool: &PgPool, employee_id: &str, email: &str, role: &str, status: &str) {
    sqlx::query(
        "INSERT INTO employees (employee_id, name, email, role, status) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(employee_id)
    .bind(format!("Employee {employee_id}"))
    .bind(email)
    .bind(role)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_product(
    pool: &PgPool,
    product_id: &str,
    current_stock: i32,
    max_stock: i32,
    low_stock_threshold: i32,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO products (product_id, name, category, current_stock, max_stock, low_stock_threshold)
        VALUES ($1, $2, 'Groceries', $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(format!("Product {product_id}"))
    .bind(current_stock)
    .bind(max_stock)
    .bind(low_stock_threshold)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a sale `days_ago` days before now with the given amount.
pub async fn create_sale(
    pool: &PgPool,
    sale_id: &str,
    days_ago: i32,
    amount: f64,
    status: &str,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO sales (sale_id, sales_date, total_amount, payment_method, status)
        VALUES ($1, NOW() - make_interval(days => $2), $3::numeric, 'CARD', $4)
        RETURNING id
        "#,
    )
    .bind(sale_id)
    .bind(days_ago)
    .bind(amount)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_sale_item(pool: &PgPool, sale_id: i64, product_id: i64, quantity: i32) {
    sqlx::query(
        "INSERT INTO sales_items (sale_id, product_id, quantity, unit_price) VALUES ($1, $2, $3, 1)",
    )
    .bind(sale_id)
    .bind(product_id)
    .bind(quantity)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts a stocked product with a category and price.
pub async fn create_product_in(
    pool: &PgPool,
    product_id: &str,
    name: &str,
    category: &str,
    price: f64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO products (product_id, name, category, price, current_stock, max_stock, low_stock_threshold)
        VALUES ($1, $2, $3, $4::numeric, 20, 50, 10)
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(name)
    .bind(category)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a sale at an exact time.
pub async fn create_sale_at(
    pool: &PgPool,
    sale_id: &str,
    sales_date: DateTime<Utc>,
    amount: f64,
    status: &str,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO sales (sale_id, sales_date, total_amount, payment_method, status)
        VALUES ($1, $2, $3::numeric, 'CASH', $4)
        RETURNING id
        "#,
    )
    .bind(sale_id)
    .bind(sales_date)
    .bind(amount)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_sale_item_priced(
    pool: &PgPool,
    sale_id: i64,
    product_id: i64,
    quantity: i32,
    unit_price: f64,
) {
    sqlx::query(
        "INSERT INTO sales_items (sale_id, product_id, quantity, unit_price) VALUES ($1, $2, $3, $4::numeric)",
    )
    .bind(sale_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .execute(pool)
    .await
    .unwrap();
}

//! PostgreSQL implementation of the employee repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::EmployeeRepository;
use crate::error::AppError;

pub struct PgEmployeeRepository {
    pool: Arc<PgPool>,
}

impl PgEmployeeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_role_by_email(&self, email: &str) -> Result<Option<String>, AppError> {
        let role: Option<String> = sqlx::query_scalar(
            r#"
            SELECT role
            FROM employees
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(role)
    }
}

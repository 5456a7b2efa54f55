//! Repository trait for employee lookups.

use async_trait::async_trait;

use crate::error::AppError;

/// Employee records kept next to the hosted auth accounts, matched by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Raw `role` column of the employee with this email, if any.
    async fn find_role_by_email(&self, email: &str) -> Result<Option<String>, AppError>;
}

//! Role lookup for the signed-in user.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::entities::{Permission, Permissions, Role};
use crate::domain::repositories::EmployeeRepository;

/// Resolves the role of a signed-in user from the `employees` table.
///
/// Lookup failures never block a page; they resolve to "no role", which
/// grants no permissions.
pub struct AccessService {
    employees: Arc<dyn EmployeeRepository>,
}

impl AccessService {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    /// Returns the role of the employee with this email, if any.
    pub async fn role_for(&self, email: &str) -> Option<Role> {
        if email.is_empty() {
            return None;
        }

        match self.employees.find_role_by_email(email).await {
            Ok(Some(raw)) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(()) => {
                    warn!(email, role = %raw, "Unknown employee role");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(email, "Error getting user role: {}", e);
                None
            }
        }
    }

    /// Returns the role and its permission table.
    pub async fn permissions_for(&self, email: &str) -> (Option<Role>, Permissions) {
        let role = self.role_for(email).await;
        (role, Permissions::for_role(role))
    }

    pub async fn check_permission(&self, email: &str, permission: Permission) -> bool {
        self.permissions_for(email).await.1.allows(permission)
    }
}

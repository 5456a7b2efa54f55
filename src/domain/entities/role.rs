//! Employee roles and the permissions they grant.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Role stored in `employees.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Manager,
    Sales,
    Supplier,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manager, Role::Sales, Role::Supplier];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Sales => "Sales",
            Role::Supplier => "Supplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(Role::Manager),
            "Sales" => Ok(Role::Sales),
            "Supplier" => Ok(Role::Supplier),
            _ => Err(()),
        }
    }
}

/// A single capability checked by pages and templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ViewDashboard,
    ViewEmployeeStats,
    ViewSales,
    ManageSales,
    ViewInventory,
    ManageInventory,
    ViewEmployees,
    ManageEmployees,
    ViewReports,
}

impl Permission {
    /// Roles granted this permission, in [`Role::ALL`] order.
    pub fn granted_to(self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| has_permission(Some(*role), self))
            .collect()
    }
}

/// Full permission table for one role, exposed to templates as flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub view_dashboard: bool,
    pub view_employee_stats: bool,
    pub view_sales: bool,
    pub manage_sales: bool,
    pub view_inventory: bool,
    pub manage_inventory: bool,
    pub view_employees: bool,
    pub manage_employees: bool,
    pub view_reports: bool,
}

impl Permissions {
    /// Returns the permissions granted to `role`.
    ///
    /// Managers get everything, Sales gets the storefront subset, and
    /// any other role (or none) gets nothing.
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Manager) => Self {
                view_dashboard: true,
                view_employee_stats: true,
                view_sales: true,
                manage_sales: true,
                view_inventory: true,
                manage_inventory: true,
                view_employees: true,
                manage_employees: true,
                view_reports: true,
            },
            Some(Role::Sales) => Self {
                view_dashboard: true,
                view_sales: true,
                manage_sales: true,
                view_inventory: true,
                ..Self::default()
            },
            Some(Role::Supplier) | None => Self::default(),
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ViewDashboard => self.view_dashboard,
            Permission::ViewEmployeeStats => self.view_employee_stats,
            Permission::ViewSales => self.view_sales,
            Permission::ManageSales => self.manage_sales,
            Permission::ViewInventory => self.view_inventory,
            Permission::ManageInventory => self.manage_inventory,
            Permission::ViewEmployees => self.view_employees,
            Permission::ManageEmployees => self.manage_employees,
            Permission::ViewReports => self.view_reports,
        }
    }
}

/// Checks a single permission for a role.
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    Permissions::for_role(role).allows(permission)
}

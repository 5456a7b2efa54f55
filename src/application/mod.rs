//! Application layer services implementing business logic.
//!
//! Services consume domain traits (repositories, identity provider) and give
//! HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login and logout via the hosted identity provider
//! - [`services::dashboard_service::DashboardService`] - Dashboard metrics
//! - [`services::access_service::AccessService`] - Role and permission lookup

pub mod services;

//! Middleware for HTML pages.

pub mod require_permission;
pub mod web_auth;

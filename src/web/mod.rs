//! Browser-facing layer: server-rendered pages on Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Login, logout, dashboard, inventory and report pages
//! - [`middleware`] - Session gate and role gate, both redirecting
//! - [`page`] - Navigation bar shared by signed-in pages
//! - [`routes`] - Page route configuration
//! - [`session`] - Session keys and the [`session::CurrentUser`] extractor
//! - [`flash`] - One-shot messages across redirects
//! - [`csrf`] - Form tokens

pub mod csrf;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod session;

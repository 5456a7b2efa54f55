//! HTML page handlers.

mod dashboard;
mod inventory;
mod login;
mod logout;
mod report;

pub use dashboard::dashboard_handler;
pub use inventory::inventory_handler;
pub use login::{login_page, login_submit};
pub use logout::{logout_handler, logout_submit};
pub use report::report_handler;

//! Clients for the hosted authentication service.

mod gotrue_client;

pub use gotrue_client::GoTrueClient;

//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`identity`] - Hosted authentication service client
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`session`] - Session stores (Redis and in-memory) and cookie layer

pub mod identity;
pub mod persistence;
pub mod session;

//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`identity`] - Contract for the hosted authentication service
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Implementations of its traits live in [`crate::infrastructure`].

pub mod entities;
pub mod identity;
pub mod repositories;

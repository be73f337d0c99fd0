//! Domain layer containing the mapping entity, the store contract and the
//! error taxonomy.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Store and allocation failures
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod errors;
pub mod repositories;

//! # tinylink
//!
//! A URL shortener that maps long URLs to short, unique, URL-safe codes and
//! resolves codes back to the original URLs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The url mapping entity, the mapping store contract and errors
//! - **Application Layer** ([`application`]) - The allocator: code generation and retry policy
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and PostgreSQL mapping stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Allocation
//!
//! Submitting a URL that is already stored returns its existing code. New
//! URLs get a random 6-symbol alphanumeric code drawn from a CSPRNG. The
//! store's unique indexes on both the URL and the code are the only source of
//! truth for collisions, which keeps concurrent submissions correct without
//! any in-process locking.
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="https://s.example.com"
//! export DATABASE_URL="sqlite://urls.db"   # Optional, this is the default
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{Allocator, AllocatorConfig};
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::errors::{AllocationError, StoreError, UniqueField};
    pub use crate::domain::repositories::MappingStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

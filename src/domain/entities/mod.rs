//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], created once by the
//! allocator and never updated or deleted afterwards.

pub mod url_mapping;

pub use url_mapping::UrlMapping;

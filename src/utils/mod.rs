//! Helper functions used across the service:
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_normalizer`] - URL validation and canonicalization
//! - [`short_url`] - Short link formatting

pub mod code_generator;
pub mod short_url;
pub mod url_normalizer;

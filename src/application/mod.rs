//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocator::Allocator`] - Short code allocation and lookup
//! - [`services::allocator::AllocatorConfig`] - Code length and retry bound

pub mod services;

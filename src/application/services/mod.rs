//! Business logic services for the application layer.

pub mod allocator;

pub use allocator::{Allocator, AllocatorConfig};

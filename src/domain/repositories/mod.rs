//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod mapping_store;

pub use mapping_store::MappingStore;

#[cfg(test)]
pub use mapping_store::MockMappingStore;

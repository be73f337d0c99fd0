use std::sync::Arc;

use crate::application::services::Allocator;
use crate::domain::repositories::MappingStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<Allocator<dyn MappingStore>>,
    pub base_url: String,
}

impl AppState {
    pub fn new(allocator: Arc<Allocator<dyn MappingStore>>, base_url: impl Into<String>) -> Self {
        Self {
            allocator,
            base_url: base_url.into(),
        }
    }
}

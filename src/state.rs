use std::sync::Arc;

use crate::store::FavoriteStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FavoriteStore>,
}

impl AppState {
    pub fn new(store: impl FavoriteStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

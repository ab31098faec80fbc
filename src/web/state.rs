use std::sync::Arc;
use tokio::sync::Mutex;

use crate::tracking::LocationStore;

/// Handler context. The store is built once at startup and every mutation
/// holds the lock for its whole duration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<LocationStore>>,
}

impl AppState {
    pub fn new(store: LocationStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

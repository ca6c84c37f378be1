use crate::storage::StoragePaths;
use crate::store::RecordStore;
use crate::tournament::Tournament;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle passed to every handler. The mutex admits one mutation at a time.
#[derive(Clone)]
pub struct AppState {
    pub paths: StoragePaths,
    pub tournament: Arc<Tournament>,
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(paths: StoragePaths, tournament: Tournament, store: RecordStore) -> Self {
        Self {
            paths,
            tournament: Arc::new(tournament),
            store: Arc::new(Mutex::new(store)),
        }
    }
}

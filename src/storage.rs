use crate::errors::StorageError;
use crate::models::{MatchRecord, ResultRecord};
use crate::store::RecordStore;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub matches: PathBuf,
    pub results: PathBuf,
}

impl StoragePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            matches: dir.join("matches.json"),
            results: dir.join("results.json"),
        }
    }
}

/// Loads both collections. Missing files mean an empty schedule; anything
/// unreadable or malformed aborts the load.
pub async fn load_store(paths: &StoragePaths) -> Result<RecordStore, StorageError> {
    let matches: Vec<MatchRecord> = load_records(&paths.matches).await?;
    let results: Vec<ResultRecord> = load_records(&paths.results).await?;
    info!(matches = matches.len(), results = results.len(), "records loaded");
    Ok(RecordStore::new(matches, results))
}

pub async fn persist_matches(paths: &StoragePaths, store: &RecordStore) -> Result<(), StorageError> {
    persist_records(&paths.matches, store.all_matches()).await
}

pub async fn persist_results(paths: &StoragePaths, store: &RecordStore) -> Result<(), StorageError> {
    persist_records(&paths.results, store.all_results()).await
}

async fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no data file yet");
            Ok(Vec::new())
        }
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn persist_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(records)?;
    fs::write(path, payload).await.map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), records = records.len(), "records persisted");
    Ok(())
}

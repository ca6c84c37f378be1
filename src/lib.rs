pub mod app;
pub mod config;
pub mod duplicates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod schedule;
pub mod standings;
pub mod state;
pub mod storage;
pub mod store;
pub mod tournament;
pub mod ui;

pub use app::router;
pub use config::{load_tournament, Settings};
pub use state::AppState;
pub use storage::{load_store, StoragePaths};

use axum::http::StatusCode;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Class;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Rejections of user input. Each variant carries the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("both player names are required")]
    MissingPlayer,

    #[error("a player cannot play against themselves ({0})")]
    SamePlayer(String),

    #[error("class {class} only has groups 1 to {max}, got {group}")]
    GroupOutOfRange { class: Class, group: u8, max: u8 },

    #[error("{date} is outside the tournament ({first} to {last})")]
    DateOutsideTournament {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    #[error("a side can win at most 3 sets, got {0}")]
    TooManySets(u8),

    #[error("a side can win at most 50 games, got {0}")]
    TooManyGames(u32),

    #[error("a side can win at most 3 tiebreaks, got {0}")]
    TooManyTiebreaks(u32),

    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed records in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("failed to read tournament config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse tournament config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tournament calendar: {0}")]
    InvalidCalendar(String),
}

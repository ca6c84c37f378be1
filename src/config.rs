use crate::errors::ConfigError;
use crate::tournament::Tournament;
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_dir: PathBuf,
    /// JSON calendar overriding the built-in tournament weeks.
    pub tournament_config: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let data_dir = env::var("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let tournament_config = env::var("TOURNAMENT_CONFIG").ok().map(PathBuf::from);

        Ok(Self {
            port,
            data_dir,
            tournament_config,
        })
    }
}

pub async fn load_tournament(settings: &Settings) -> Result<Tournament, ConfigError> {
    let Some(path) = &settings.tournament_config else {
        return Ok(Tournament::default());
    };

    let raw = tokio::fs::read(path).await.map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let tournament = parse_tournament(&raw)?;
    info!(path = %path.display(), weeks = tournament.weeks.len(), "tournament calendar loaded");
    Ok(tournament)
}

pub fn parse_tournament(raw: &[u8]) -> Result<Tournament, ConfigError> {
    let tournament: Tournament = serde_json::from_slice(raw)?;
    tournament.validate()?;
    Ok(tournament)
}

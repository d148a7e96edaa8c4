//! Errors raised while loading inputs or writing reports

use forecast_core::SimError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unsupported rating file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error(transparent)]
    Sim(#[from] SimError),
}

impl ForecastError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ForecastError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

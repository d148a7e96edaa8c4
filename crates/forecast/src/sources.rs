//! Rating sources: `{competitor: rating}` tables from files

use forecast_core::Ratings;
use std::path::Path;
use tracing::debug;

use crate::error::{ForecastError, Result};

/// Accepted header names for the competitor and rating columns of a CSV export
const NAME_COLUMNS: &[&str] = &["club", "team", "competitor", "name"];
const RATING_COLUMNS: &[&str] = &["elo", "rating"];

/// On-disk layout of a rating table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFormat {
    /// `{"Arsenal": 1905.3, ...}`
    Json,
    /// `Arsenal = 1905.3`
    Toml,
    /// Ranking export with a `Club,Elo` header; other columns are ignored
    Csv,
}

impl RatingFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(RatingFormat::Json),
            Some("toml") => Ok(RatingFormat::Toml),
            Some("csv") => Ok(RatingFormat::Csv),
            _ => Err(ForecastError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load a rating table, picking the format from the file extension
pub fn load_ratings(path: &Path) -> Result<Ratings> {
    let format = RatingFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|e| ForecastError::io(path, e))?;
    let ratings = parse_ratings(&contents, format)?;
    debug!(path = %path.display(), competitors = ratings.len(), "loaded ratings");
    Ok(ratings)
}

pub fn parse_ratings(contents: &str, format: RatingFormat) -> Result<Ratings> {
    match format {
        RatingFormat::Json => Ok(serde_json::from_str(contents)?),
        RatingFormat::Toml => Ok(toml::from_str(contents)?),
        RatingFormat::Csv => parse_ratings_csv(contents),
    }
}

fn parse_ratings_csv(contents: &str) -> Result<Ratings> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.contains(&h.to_ascii_lowercase().as_str()))
    };
    let (name_col, rating_col) = match (find(NAME_COLUMNS), find(RATING_COLUMNS)) {
        (Some(n), Some(r)) => (n, r),
        _ => {
            return Err(ForecastError::Parse {
                line: 1,
                reason: "header needs a Club (or Team) column and an Elo (or Rating) column"
                    .to_string(),
            })
        }
    };

    let mut ratings = Ratings::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;
        let name = record.get(name_col).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let raw = record.get(rating_col).unwrap_or_default();
        let rating: f64 = raw.parse().map_err(|_| ForecastError::Parse {
            line,
            reason: format!("rating '{raw}' for '{name}' is not a number"),
        })?;
        ratings.insert(name, rating);
    }
    Ok(ratings)
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod sources_tests;

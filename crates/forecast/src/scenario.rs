//! Scenario files: one competition, its ratings and the simulation settings
//!
//! A scenario is a TOML file such as:
//!
//! ```toml
//! name = "Cup semi-finals"
//! ratings_file = "ratings.csv"
//! draw = [["Ajax", "PSV"], ["Feyenoord", "AZ"]]
//!
//! [config]
//! trials = 20000
//! seed = 7
//! ```
//!
//! A league replaces `draw` with `fixtures = [["Home", "Away"], ...]` or with
//! `teams = [...]` (plus `double_round_robin = true` for home and away legs).

use forecast_core::{
    fixture_competitors, round_robin, DrawTree, Fixture, LeagueForecast, Ratings, SimConfig,
    Standings, TournamentForecast, TrialRunner,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ForecastError, Result};
use crate::sources::load_ratings;

/// Scenario file as written on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFile {
    pub name: Option<String>,
    pub config: SimConfig,
    /// Rating table to load, relative to the scenario file
    pub ratings_file: Option<PathBuf>,
    /// Inline ratings; entries here override the rating file
    pub ratings: Option<Ratings>,
    pub draw: Option<DrawTree>,
    /// Power-of-two seeded list, paired 1v2, 3v4, ...
    pub seeding: Option<Vec<String>>,
    pub fixtures: Option<Vec<Fixture>>,
    pub teams: Option<Vec<String>>,
    pub double_round_robin: bool,
    /// Points already earned before the simulated fixtures
    pub standings: Option<Standings>,
}

impl ScenarioFile {
    /// Read a scenario file without resolving it.
    ///
    /// Also returns the directory relative paths resolve against and the
    /// name to use when the file sets none (its stem).
    pub fn load(path: &Path) -> Result<(Self, PathBuf, String)> {
        let contents = std::fs::read_to_string(path).map_err(|e| ForecastError::io(path, e))?;
        let file: ScenarioFile = toml::from_str(&contents)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let default_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scenario")
            .to_string();
        Ok((file, base_dir, default_name))
    }
}

/// What is being forecast
#[derive(Debug, Clone, PartialEq)]
pub enum Competition {
    Tournament(DrawTree),
    League {
        fixtures: Vec<Fixture>,
        standings: Standings,
    },
}

impl Competition {
    /// Competitors that play at least one game
    pub fn playing(&self) -> Vec<&str> {
        match self {
            Competition::Tournament(draw) => draw.competitors(),
            Competition::League { fixtures, .. } => fixture_competitors(fixtures),
        }
    }
}

/// Result of running a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum Forecast {
    Tournament(TournamentForecast),
    League(LeagueForecast),
}

/// A resolved scenario, ready to run
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub config: SimConfig,
    /// Ratings of the competitors taking part (nobody else)
    pub ratings: Ratings,
    pub competition: Competition,
}

impl Scenario {
    /// Load a scenario file; relative paths inside it resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let (file, base_dir, default_name) = ScenarioFile::load(path)?;
        Self::from_file(file, &base_dir, &default_name)
    }

    pub fn from_file(file: ScenarioFile, base_dir: &Path, default_name: &str) -> Result<Self> {
        let competition = Self::competition(&file)?;

        let mut ratings = match &file.ratings_file {
            Some(rel) => load_ratings(&base_dir.join(rel))?,
            None => Ratings::new(),
        };
        if let Some(inline) = &file.ratings {
            for (name, rating) in inline.iter() {
                ratings.insert(name, rating);
            }
        }
        if ratings.is_empty() {
            return Err(ForecastError::Scenario(
                "no ratings: set ratings_file or a [ratings] table".to_string(),
            ));
        }

        // Standings-only league entries never play, so they need no rating
        let ratings = ratings.restricted_to(&competition.playing())?;

        let name = file.name.unwrap_or_else(|| default_name.to_string());
        info!(scenario = %name, competitors = ratings.len(), "loaded scenario");
        Ok(Self {
            name,
            config: file.config,
            ratings,
            competition,
        })
    }

    fn competition(file: &ScenarioFile) -> Result<Competition> {
        let given = [
            file.draw.is_some(),
            file.seeding.is_some(),
            file.fixtures.is_some(),
            file.teams.is_some(),
        ];
        if given.iter().filter(|&&set| set).count() != 1 {
            return Err(ForecastError::Scenario(
                "set exactly one of draw, seeding, fixtures or teams".to_string(),
            ));
        }

        if let Some(draw) = &file.draw {
            draw.validate()?;
            return Ok(Competition::Tournament(draw.clone()));
        }
        if let Some(seeding) = &file.seeding {
            return Ok(Competition::Tournament(DrawTree::from_seeding(seeding)?));
        }

        let fixtures = if let Some(fixtures) = &file.fixtures {
            fixtures.clone()
        } else if let Some(teams) = &file.teams {
            round_robin(teams, file.double_round_robin)
        } else {
            return Err(ForecastError::Scenario("no competition given".to_string()));
        };
        let mut standings = Standings::zeroed(fixture_competitors(&fixtures));
        if let Some(baseline) = &file.standings {
            for (name, points) in baseline.iter() {
                standings.award(name, points);
            }
        }
        Ok(Competition::League {
            fixtures,
            standings,
        })
    }

    /// Run every trial of the scenario
    pub fn run(&self) -> Result<Forecast> {
        let runner = TrialRunner::new(self.config.clone())?;
        let forecast = match &self.competition {
            Competition::Tournament(draw) => {
                Forecast::Tournament(runner.run_tournament(draw, &self.ratings)?)
            }
            Competition::League {
                fixtures,
                standings,
            } => Forecast::League(runner.run_league(fixtures, &self.ratings, standings)?),
        };
        Ok(forecast)
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod scenario_tests;

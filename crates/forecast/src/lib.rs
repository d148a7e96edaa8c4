//! Forecast runner for Elo-rated tournaments and leagues
//!
//! This crate provides the outer layer around `forecast_core`:
//! - Loading rating tables from JSON, TOML or CSV ranking exports
//! - Scenario files describing a bracket or a league
//! - Text reports and JSON export of forecasts
//!
//! # Usage
//!
//! ```bash
//! # Win probabilities for a knockout draw
//! cargo run -p forecast -- tournament --ratings ratings.csv --draw draw.json --trials 20000
//!
//! # Final table distribution for a double round robin
//! cargo run -p forecast -- league --scenario league.toml --seed 7
//!
//! # Model odds for a single fixture
//! cargo run -p forecast -- odds Arsenal Chelsea --ratings ratings.json
//! ```

mod error;
mod report;
mod scenario;
mod sources;

pub use error::*;
pub use report::*;
pub use scenario::*;
pub use sources::*;

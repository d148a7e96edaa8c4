//! Monte Carlo forecasting engine for Elo-rated competitions
//!
//! This crate provides:
//! - The Elo win probability model, with a home-advantage and draw-rate policy for leagues
//! - The per-game Elo rating update
//! - Single-elimination bracket resolution and round-robin league simulation
//! - Many-trial aggregation into win percentages and standings distributions
//!
//! # Usage
//!
//! ```no_run
//! use forecast_core::{DrawTree, Ratings, SimConfig, TrialRunner};
//!
//! let ratings: Ratings = [("A", 1600.0), ("B", 1500.0), ("C", 1450.0), ("D", 1400.0)]
//!     .into_iter()
//!     .collect();
//! let draw = DrawTree::node(DrawTree::leaf("A", "D"), DrawTree::leaf("B", "C"));
//!
//! let runner = TrialRunner::new(SimConfig::default()).unwrap();
//! let forecast = runner.run_tournament(&draw, &ratings).unwrap();
//! for (team, pct) in forecast.sorted() {
//!     println!("{team}: {pct:.1}%");
//! }
//! ```

pub mod bracket;
pub mod config;
pub mod error;
pub mod game;
pub mod league;
pub mod probability;
pub mod rating;
pub mod summary;
pub mod trials;
pub mod types;

pub use bracket::*;
pub use config::*;
pub use error::{Result, SimError};
pub use game::*;
pub use league::*;
pub use probability::*;
pub use rating::*;
pub use summary::*;
pub use trials::*;
pub use types::*;

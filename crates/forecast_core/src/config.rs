//! Simulation parameters and their validation

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// K-factor used during simulation (small: ratings drift only a little within one competition)
pub const DEFAULT_K_FACTOR: f64 = 5.0;

/// Target draw probability for evenly matched league fixtures
pub const DEFAULT_DRAW_RATE: f64 = 0.3;

/// Share of the remaining win probability handed to the home side
pub const DEFAULT_HOME_ADVANTAGE: f64 = 0.2;

/// Default number of Monte Carlo trials
pub const DEFAULT_TRIALS: u32 = 10_000;

/// Exclusive upper bound of the random jitter added to points before ranking
pub const TIEBREAK_JITTER: f64 = 0.001;

/// How equal league points are ordered in the final ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Add a uniform jitter below [`TIEBREAK_JITTER`] to every points total
    #[default]
    Jitter,
    /// Keep first-appearance order in the fixture list (reproducible)
    Stable,
}

/// Configuration for a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Rating volatility per game
    pub k_factor: f64,
    /// Draw probability in the flat middle of the draw policy, within [0, 0.5]
    pub draw_rate: f64,
    /// Boost for the first-listed (home) side of a league fixture, within [0, 1]
    pub home_advantage: f64,
    /// Number of Monte Carlo trials
    pub trials: u32,
    /// Base seed for the per-trial random streams (None = fresh entropy)
    pub seed: Option<u64>,
    pub tiebreak: TieBreak,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            draw_rate: DEFAULT_DRAW_RATE,
            home_advantage: DEFAULT_HOME_ADVANTAGE,
            trials: DEFAULT_TRIALS,
            seed: None,
            tiebreak: TieBreak::default(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Reject parameters that would produce impossible probability triples.
    ///
    /// `e' = e + (1 - e) * h` stays inside [0, 1] for every base probability
    /// `e` exactly when `h` is inside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor < 0.0 {
            return Err(SimError::InvalidConfig {
                field: "k_factor",
                value: self.k_factor,
                reason: "must be a finite, non-negative number",
            });
        }
        if !(0.0..=0.5).contains(&self.draw_rate) {
            return Err(SimError::InvalidConfig {
                field: "draw_rate",
                value: self.draw_rate,
                reason: "must be between 0 and 0.5",
            });
        }
        if !(0.0..=1.0).contains(&self.home_advantage) {
            return Err(SimError::InvalidConfig {
                field: "home_advantage",
                value: self.home_advantage,
                reason: "must be between 0 and 1",
            });
        }
        if self.trials == 0 {
            return Err(SimError::InvalidConfig {
                field: "trials",
                value: 0.0,
                reason: "at least one trial is required",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

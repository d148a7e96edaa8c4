//! Monte Carlo trial aggregation
//!
//! Trials share only immutable inputs (baseline ratings, draw or fixtures).
//! Each one copies the baseline into its own [`TrialContext`] and draws from
//! its own ChaCha stream seeded with `base_seed + trial_index`, so the result
//! for a given seed does not depend on how rayon schedules the work.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{debug, info};

use crate::bracket::DrawTree;
use crate::config::SimConfig;
use crate::error::Result;
use crate::game::TrialContext;
use crate::league::{fixture_competitors, simulate_league, validate_fixtures, Fixture, LeagueOutcome};
use crate::types::{Competitor, Rankings, Ratings, Standings};

/// Win percentages over many tournament trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentForecast {
    pub trials: u32,
    pub seed: u64,
    /// Titles won per competitor (every bracket competitor is listed)
    pub wins: BTreeMap<Competitor, u32>,
    /// Share of trials won, in percent; sums to 100
    pub percentages: BTreeMap<Competitor, f64>,
}

impl TournamentForecast {
    fn from_wins(trials: u32, seed: u64, wins: BTreeMap<Competitor, u32>) -> Self {
        let share = 100.0 / f64::from(trials);
        let percentages = wins
            .iter()
            .map(|(name, &count)| (name.clone(), f64::from(count) * share))
            .collect();
        Self {
            trials,
            seed,
            wins,
            percentages,
        }
    }

    /// Win percentage of a competitor (0 if it is not in the draw)
    pub fn percentage(&self, competitor: &str) -> f64 {
        self.percentages.get(competitor).copied().unwrap_or(0.0)
    }

    /// Competitors by win percentage, most likely winner first
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<_> = self
            .percentages
            .iter()
            .map(|(name, &pct)| (name.as_str(), pct))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn favourite(&self) -> Option<(&str, f64)> {
        self.sorted().into_iter().next()
    }
}

/// Raw per-trial league results, in trial order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueForecast {
    pub trials: u32,
    pub seed: u64,
    pub standings: Vec<Standings>,
    pub rankings: Vec<Rankings>,
}

/// Runs many independent trials of a bracket or a league
#[derive(Debug, Clone)]
pub struct TrialRunner {
    config: SimConfig,
}

impl TrialRunner {
    /// Create a runner, rejecting an invalid configuration up front
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn base_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }

    fn trial_rng(base_seed: u64, trial: u32) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(u64::from(trial)))
    }

    /// Simulate the bracket `trials` times and count champions.
    ///
    /// The draw and rating coverage are checked before any trial runs.
    pub fn run_tournament(&self, draw: &DrawTree, ratings: &Ratings) -> Result<TournamentForecast> {
        draw.validate()?;
        let competitors = draw.competitors();
        ratings.ensure_covers(competitors.iter().copied())?;
        debug!(
            competitors = competitors.len(),
            rounds = draw.rounds(),
            "validated draw"
        );

        let trials = self.config.trials;
        let seed = self.base_seed();
        info!(trials, seed, games_per_trial = draw.games(), "starting tournament forecast");
        let start = Instant::now();

        let counts = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let mut ctx = TrialContext::new(
                    ratings.clone(),
                    &self.config,
                    Self::trial_rng(seed, trial),
                );
                draw.resolve(&mut ctx)
            })
            .try_fold(
                HashMap::new,
                |mut counts: HashMap<Competitor, u32>, winner| -> Result<_> {
                    *counts.entry(winner?).or_insert(0) += 1;
                    Ok(counts)
                },
            )
            .try_reduce(HashMap::new, |mut merged, partial| {
                for (name, count) in partial {
                    *merged.entry(name).or_insert(0) += count;
                }
                Ok(merged)
            })?;

        let mut wins: BTreeMap<Competitor, u32> =
            competitors.iter().map(|c| (c.to_string(), 0)).collect();
        for (name, count) in counts {
            *wins.entry(name).or_insert(0) += count;
        }

        info!(elapsed_ms = start.elapsed().as_millis() as u64, "tournament forecast complete");
        Ok(TournamentForecast::from_wins(trials, seed, wins))
    }

    /// Simulate the season `trials` times and collect every final table.
    ///
    /// `standings` is the baseline points table (usually all zero); competitors
    /// only listed there take part in the ranking without playing.
    pub fn run_league(
        &self,
        fixtures: &[Fixture],
        ratings: &Ratings,
        standings: &Standings,
    ) -> Result<LeagueForecast> {
        validate_fixtures(fixtures)?;
        let competitors = fixture_competitors(fixtures);
        ratings.ensure_covers(competitors.iter().copied())?;
        debug!(
            competitors = competitors.len(),
            fixtures = fixtures.len(),
            "validated fixture list"
        );

        let trials = self.config.trials;
        let seed = self.base_seed();
        info!(trials, seed, fixtures = fixtures.len(), "starting league forecast");
        let start = Instant::now();

        let outcomes: Vec<LeagueOutcome> = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let mut ctx = TrialContext::new(
                    ratings.clone(),
                    &self.config,
                    Self::trial_rng(seed, trial),
                )
                .with_standings(standings.clone());
                simulate_league(fixtures, &mut ctx)
            })
            .collect::<Result<_>>()?;

        let (standings, rankings) = outcomes
            .into_iter()
            .map(|outcome| (outcome.standings, outcome.rankings))
            .unzip();

        info!(elapsed_ms = start.elapsed().as_millis() as u64, "league forecast complete");
        Ok(LeagueForecast {
            trials,
            seed,
            standings,
            rankings,
        })
    }
}

#[cfg(test)]
#[path = "trials_tests.rs"]
mod trials_tests;

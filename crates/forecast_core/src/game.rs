//! Single-game simulation over a per-trial mutable context

use rand::Rng;
use tracing::trace;

use crate::config::SimConfig;
use crate::error::Result;
use crate::probability::{outcome_probabilities, win_probability, OutcomeProbabilities};
use crate::rating::update;
use crate::types::{Competitor, Outcome, Ratings, Standings};

/// Mutable state owned by one trial.
///
/// Every game of the trial reads and updates the same ratings (and, for
/// leagues, standings), so later games see the results of earlier ones.
/// Each trial builds its own context from a copy of the baseline.
pub struct TrialContext<'a, R: Rng> {
    pub ratings: Ratings,
    pub standings: Standings,
    config: &'a SimConfig,
    rng: R,
    games_played: usize,
}

impl<'a, R: Rng> TrialContext<'a, R> {
    pub fn new(ratings: Ratings, config: &'a SimConfig, rng: R) -> Self {
        Self {
            ratings,
            standings: Standings::new(),
            config,
            rng,
            games_played: 0,
        }
    }

    pub fn with_standings(mut self, standings: Standings) -> Self {
        self.standings = standings;
        self
    }

    pub fn config(&self) -> &SimConfig {
        self.config
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Games simulated so far in this trial
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Play a knockout game (no draws) and return the winner.
    ///
    /// The random draw succeeds with probability `1 - p`, and success means
    /// the second competitor wins. Both ratings are updated in place.
    pub fn play_knockout(&mut self, first: &str, second: &str) -> Result<Competitor> {
        let rating_first = self.ratings.get(first)?;
        let rating_second = self.ratings.get(second)?;
        let p = win_probability(rating_first, rating_second);

        let second_wins = self.rng.gen_bool(1.0 - p);
        let outcome = if second_wins {
            Outcome::Loss
        } else {
            Outcome::Win
        };

        let change =
            self.apply_rating_update(first, second, rating_first, rating_second, outcome, p)?;

        let winner = if second_wins { second } else { first };
        trace!(first, second, p_first = p, winner, change, "knockout game");
        Ok(winner.to_string())
    }

    /// Play a league fixture (home side first), update ratings and standings.
    ///
    /// The rating update uses the home-adjusted expected score, which is the
    /// mean score under the sampled distribution.
    pub fn play_league(&mut self, home: &str, away: &str) -> Result<Outcome> {
        let rating_home = self.ratings.get(home)?;
        let rating_away = self.ratings.get(away)?;
        let probs = outcome_probabilities(
            rating_home,
            rating_away,
            self.config.home_advantage,
            self.config.draw_rate,
        );

        let outcome = probs.sample(&mut self.rng);
        let expected = probs.expected_score();
        let change =
            self.apply_rating_update(home, away, rating_home, rating_away, outcome, expected)?;

        let (home_points, away_points) = outcome.points();
        self.standings.award(home, home_points);
        self.standings.award(away, away_points);

        trace!(
            home,
            away,
            ?outcome,
            win = probs.win,
            draw = probs.draw,
            change,
            "league fixture"
        );
        Ok(outcome)
    }

    /// Apply the zero-sum update and return the first competitor's change
    fn apply_rating_update(
        &mut self,
        first: &str,
        second: &str,
        rating_first: f64,
        rating_second: f64,
        outcome: Outcome,
        expected: f64,
    ) -> Result<f64> {
        let (new_first, new_second) = update(
            rating_first,
            rating_second,
            outcome.score(),
            expected,
            self.config.k_factor,
        );
        self.ratings.set(first, new_first)?;
        self.ratings.set(second, new_second)?;
        self.games_played += 1;
        Ok(new_first - rating_first)
    }
}

/// Model probabilities for one fixture without simulating it
pub fn head_to_head(
    ratings: &Ratings,
    home: &str,
    away: &str,
    config: &SimConfig,
) -> Result<OutcomeProbabilities> {
    Ok(outcome_probabilities(
        ratings.get(home)?,
        ratings.get(away)?,
        config.home_advantage,
        config.draw_rate,
    ))
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;

//! Win/draw/loss probabilities from Elo ratings

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Outcome;

/// Probability that a competitor rated `rating_a` beats one rated `rating_b`.
///
/// Equivalent to `10^(ra/400) / (10^(ra/400) + 10^(rb/400))`, written in the
/// difference form so that only `rb - ra` is exponentiated. Rating gaps far
/// beyond anything realistic (tens of thousands of points) saturate to 0 or 1.
pub fn win_probability(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}

/// Win/draw/loss probabilities for the first-listed competitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl OutcomeProbabilities {
    /// Split an expected score `e'` into win/draw/loss under the clamped draw policy.
    ///
    /// The draw probability is `draw_rate` in the middle and falls linearly to
    /// zero towards either extreme, so it never exceeds `min(e', 1 - e')`.
    pub fn from_expected(expected: f64, draw_rate: f64) -> Self {
        let draw = if expected < draw_rate {
            expected / 2.0
        } else if expected > 1.0 - draw_rate {
            (1.0 - expected) / 2.0
        } else {
            draw_rate
        };
        let win = expected - draw / 2.0;
        let loss = 1.0 - win - draw;

        debug_assert!(
            win >= 0.0 && draw >= 0.0 && loss >= -1e-12,
            "negative probability from expected={expected} draw_rate={draw_rate}"
        );

        Self { win, draw, loss }
    }

    /// Expected score of the first-listed competitor (`win + draw / 2`)
    pub fn expected_score(&self) -> f64 {
        self.win + self.draw / 2.0
    }

    /// Draw one outcome with these probabilities
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let roll: f64 = rng.gen();
        if roll < self.win {
            Outcome::Win
        } else if roll < self.win + self.draw {
            Outcome::Draw
        } else {
            Outcome::Loss
        }
    }
}

/// Apply the home boost: `e' = e + (1 - e) * home_advantage`
pub fn home_adjusted(expected: f64, home_advantage: f64) -> f64 {
    expected + (1.0 - expected) * home_advantage
}

/// League fixture probabilities with the home (first-listed) side boosted
pub fn outcome_probabilities(
    rating_a: f64,
    rating_b: f64,
    home_advantage: f64,
    draw_rate: f64,
) -> OutcomeProbabilities {
    let expected = home_adjusted(win_probability(rating_a, rating_b), home_advantage);
    OutcomeProbabilities::from_expected(expected, draw_rate)
}

#[cfg(test)]
#[path = "probability_tests.rs"]
mod probability_tests;

//! Elo rating update

/// Apply one game to a rating pair.
///
/// `score_a` is the realized result for A (1, 0.5 or 0) and `expected_a` its
/// pre-game expected score. Whatever A gains, B loses, so the pair total is
/// conserved.
pub fn update(
    rating_a: f64,
    rating_b: f64,
    score_a: f64,
    expected_a: f64,
    k_factor: f64,
) -> (f64, f64) {
    let change = rating_change(score_a, expected_a, k_factor);
    (rating_a + change, rating_b - change)
}

/// Rating points moved from B to A by one game
pub fn rating_change(score_a: f64, expected_a: f64, k_factor: f64) -> f64 {
    k_factor * (score_a - expected_a)
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod rating_tests;

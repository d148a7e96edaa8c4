//! Competitors, outcomes, rating mappings and standings

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{Result, SimError};

/// Opaque competitor identifier, unique within a forecast
pub type Competitor = String;

/// Final league position per competitor (1 = best)
pub type Rankings = BTreeMap<Competitor, usize>;

/// League points for a win
pub const POINTS_FOR_WIN: u32 = 3;

/// League points for each side of a draw
pub const POINTS_FOR_DRAW: u32 = 1;

/// Result of a single game from the first-listed competitor's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Score for the first-listed competitor (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// League points awarded as (first-listed, second-listed)
    pub fn points(self) -> (u32, u32) {
        match self {
            Outcome::Win => (POINTS_FOR_WIN, 0),
            Outcome::Draw => (POINTS_FOR_DRAW, POINTS_FOR_DRAW),
            Outcome::Loss => (0, POINTS_FOR_WIN),
        }
    }
}

/// Mapping from competitor to Elo rating.
///
/// Lookups never fall back to a default rating: a missing entry is an error,
/// since a silent default would bias every forecast that touches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ratings(HashMap<Competitor, f64>);

impl Ratings {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, competitor: impl Into<Competitor>, rating: f64) {
        self.0.insert(competitor.into(), rating);
    }

    /// Rating of a competitor, failing if it has none
    pub fn get(&self, competitor: &str) -> Result<f64> {
        self.0
            .get(competitor)
            .copied()
            .ok_or_else(|| SimError::missing_rating(competitor))
    }

    /// Overwrite the rating of a competitor that already has one
    pub fn set(&mut self, competitor: &str, rating: f64) -> Result<()> {
        let slot = self
            .0
            .get_mut(competitor)
            .ok_or_else(|| SimError::missing_rating(competitor))?;
        *slot = rating;
        Ok(())
    }

    pub fn contains(&self, competitor: &str) -> bool {
        self.0.contains_key(competitor)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, &rating)| (name.as_str(), rating))
    }

    /// Sum of all ratings (conserved by every simulated game)
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Check that every listed competitor has a finite rating
    pub fn ensure_covers<'a>(&self, competitors: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for competitor in competitors {
            let rating = self.get(competitor)?;
            if !rating.is_finite() {
                return Err(SimError::NonFiniteRating {
                    competitor: competitor.to_string(),
                    value: rating,
                });
            }
        }
        Ok(())
    }

    /// Narrow a full ranking table down to the given competitors
    pub fn restricted_to<S: AsRef<str>>(&self, competitors: &[S]) -> Result<Ratings> {
        competitors
            .iter()
            .map(|c| {
                let name = c.as_ref();
                self.get(name).map(|rating| (name.to_string(), rating))
            })
            .collect::<Result<HashMap<_, _>>>()
            .map(Ratings)
    }

    /// Competitors sorted by rating, strongest first
    pub fn leaderboard(&self) -> Vec<(Competitor, f64)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(name, &rating)| (name.clone(), rating))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl<S: Into<Competitor>> FromIterator<(S, f64)> for Ratings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, r)| (name.into(), r)).collect())
    }
}

/// Accumulated league points per competitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings(BTreeMap<Competitor, u32>);

impl Standings {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Every competitor on zero points
    pub fn zeroed<'a>(competitors: impl IntoIterator<Item = &'a str>) -> Self {
        Self(competitors.into_iter().map(|c| (c.to_string(), 0)).collect())
    }

    /// Points of a competitor (zero if it has not been credited yet)
    pub fn points(&self, competitor: &str) -> u32 {
        self.0.get(competitor).copied().unwrap_or(0)
    }

    pub fn award(&mut self, competitor: &str, points: u32) {
        *self.0.entry(competitor.to_string()).or_insert(0) += points;
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, &points)| (name.as_str(), points))
    }

    pub fn competitors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<S: Into<Competitor>> FromIterator<(S, u32)> for Standings {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, p)| (name.into(), p)).collect())
    }
}

/// Return the first duplicated identifier, if any
pub(crate) fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

//! Tabulation of league forecasts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::trials::LeagueForecast;
use crate::types::Competitor;

/// Per-competitor statistics over all trials of a league forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub competitor: Competitor,
    pub mean_points: f64,
    pub min_points: u32,
    pub max_points: u32,
    pub mean_position: f64,
    /// Percentage of trials finishing in each position; index 0 is first place
    pub position_percentages: Vec<f64>,
}

impl SummaryRow {
    /// Percentage of trials finishing first
    pub fn title_percentage(&self) -> f64 {
        self.position_percentages.first().copied().unwrap_or(0.0)
    }

    /// Percentage of trials finishing last
    pub fn bottom_percentage(&self) -> f64 {
        self.position_percentages.last().copied().unwrap_or(0.0)
    }

    /// Percentage of trials finishing in `position` (1-based)
    pub fn position_percentage(&self, position: usize) -> f64 {
        position
            .checked_sub(1)
            .and_then(|i| self.position_percentages.get(i))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Rank-frequency table of a league forecast, best expected finish first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub trials: u32,
    pub rows: Vec<SummaryRow>,
}

#[derive(Default)]
struct Tally {
    points_sum: u64,
    min_points: Option<u32>,
    max_points: u32,
    position_sum: u64,
    position_counts: Vec<u32>,
}

impl LeagueSummary {
    pub fn from_forecast(forecast: &LeagueForecast) -> Self {
        let table_size = forecast
            .rankings
            .iter()
            .map(|rankings| rankings.len())
            .max()
            .unwrap_or(0);
        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

        for standings in &forecast.standings {
            for (competitor, points) in standings.iter() {
                let tally = tallies.entry(competitor).or_default();
                tally.points_sum += u64::from(points);
                tally.min_points = Some(tally.min_points.map_or(points, |m| m.min(points)));
                tally.max_points = tally.max_points.max(points);
            }
        }

        for rankings in &forecast.rankings {
            for (competitor, &position) in rankings {
                let tally = tallies.entry(competitor.as_str()).or_default();
                if tally.position_counts.is_empty() {
                    tally.position_counts = vec![0; table_size];
                }
                tally.position_sum += position as u64;
                if let Some(count) = position
                    .checked_sub(1)
                    .and_then(|i| tally.position_counts.get_mut(i))
                {
                    *count += 1;
                }
            }
        }

        let trials = forecast.standings.len().max(1) as f64;
        let mut rows: Vec<SummaryRow> = tallies
            .into_iter()
            .map(|(competitor, tally)| SummaryRow {
                competitor: competitor.to_string(),
                mean_points: tally.points_sum as f64 / trials,
                min_points: tally.min_points.unwrap_or(0),
                max_points: tally.max_points,
                mean_position: tally.position_sum as f64 / trials,
                position_percentages: tally
                    .position_counts
                    .iter()
                    .map(|&count| f64::from(count) * 100.0 / trials)
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.mean_points
                .total_cmp(&a.mean_points)
                .then_with(|| a.mean_position.total_cmp(&b.mean_position))
                .then_with(|| a.competitor.cmp(&b.competitor))
        });

        Self {
            trials: forecast.trials,
            rows,
        }
    }

    pub fn row(&self, competitor: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.competitor == competitor)
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod summary_tests;

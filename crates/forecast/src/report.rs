//! Forecast reports: text tables and JSON export

use forecast_core::{LeagueSummary, Ratings, SimConfig, TournamentForecast};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ForecastError, Result};
use crate::scenario::{Competition, Forecast, Scenario};

/// Knockout forecast with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentReport {
    pub name: String,
    pub config: SimConfig,
    pub ratings: Ratings,
    pub forecast: TournamentForecast,
}

/// League forecast reduced to its rank-frequency table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueReport {
    pub name: String,
    pub config: SimConfig,
    pub ratings: Ratings,
    pub fixtures: usize,
    pub seed: u64,
    pub summary: LeagueSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Tournament(TournamentReport),
    League(LeagueReport),
}

impl Report {
    pub fn new(scenario: &Scenario, forecast: Forecast) -> Self {
        match forecast {
            Forecast::Tournament(forecast) => Report::Tournament(TournamentReport {
                name: scenario.name.clone(),
                config: scenario.config.clone(),
                ratings: scenario.ratings.clone(),
                forecast,
            }),
            Forecast::League(forecast) => {
                let fixtures = match &scenario.competition {
                    Competition::League { fixtures, .. } => fixtures.len(),
                    Competition::Tournament(_) => 0,
                };
                Report::League(LeagueReport {
                    name: scenario.name.clone(),
                    config: scenario.config.clone(),
                    ratings: scenario.ratings.clone(),
                    fixtures,
                    seed: forecast.seed,
                    summary: LeagueSummary::from_forecast(&forecast),
                })
            }
        }
    }

    pub fn generate_report(&self) -> String {
        match self {
            Report::Tournament(report) => report.generate_report(),
            Report::League(report) => report.generate_report(),
        }
    }

    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }

    /// Save report to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ForecastError::io(path, e))
    }

    /// Load report from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ForecastError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

fn header(name: &str, config: &SimConfig, trials: u32, seed: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Forecast: {} ===\n\n", name));
    out.push_str(&format!(
        "Trials: {}, seed {}, K-factor {}\n",
        trials, seed, config.k_factor
    ));
    out
}

impl TournamentReport {
    pub fn generate_report(&self) -> String {
        let mut report = header(&self.name, &self.config, self.forecast.trials, self.forecast.seed);
        report.push('\n');

        report.push_str(&format!(
            "{:<30} {:>8} {:>8} {:>8}\n",
            "Competitor", "Elo", "Titles", "Win %"
        ));
        report.push_str(&"-".repeat(57));
        report.push('\n');

        for (name, pct) in self.forecast.sorted() {
            let rating = self.ratings.get(name).unwrap_or(f64::NAN);
            let titles = self.forecast.wins.get(name).copied().unwrap_or(0);
            report.push_str(&format!(
                "{:<30} {:>8.1} {:>8} {:>7.2}%\n",
                name, rating, titles, pct
            ));
        }

        report
    }
}

impl LeagueReport {
    pub fn generate_report(&self) -> String {
        let mut report = header(&self.name, &self.config, self.summary.trials, self.seed);
        report.push_str(&format!(
            "Fixtures: {}, draw rate {}, home advantage {}\n\n",
            self.fixtures, self.config.draw_rate, self.config.home_advantage
        ));

        let positions = self
            .summary
            .rows
            .iter()
            .map(|row| row.position_percentages.len())
            .max()
            .unwrap_or(0);

        report.push_str(&format!(
            "{:<24} {:>8} {:>8} {:>5} {:>5} {:>7}",
            "Competitor", "Elo", "Pts", "Min", "Max", "Pos"
        ));
        for position in 1..=positions {
            report.push_str(&format!(" {:>6}", format!("#{position}")));
        }
        report.push('\n');
        report.push_str(&"-".repeat(62 + 7 * positions));
        report.push('\n');

        for row in &self.summary.rows {
            let rating = self.ratings.get(&row.competitor).unwrap_or(f64::NAN);
            report.push_str(&format!(
                "{:<24} {:>8.1} {:>8.2} {:>5} {:>5} {:>7.2}",
                row.competitor,
                rating,
                row.mean_points,
                row.min_points,
                row.max_points,
                row.mean_position
            ));
            for position in 1..=positions {
                report.push_str(&format!(" {:>5.1}%", row.position_percentage(position)));
            }
            report.push('\n');
        }

        report
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;

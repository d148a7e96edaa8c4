use super::*;
use crate::types::{Rankings, Standings};

fn forecast() -> LeagueForecast {
    let standings = vec![
        [("A", 6), ("B", 0)].into_iter().collect::<Standings>(),
        [("A", 3), ("B", 3)].into_iter().collect::<Standings>(),
        [("A", 0), ("B", 6)].into_iter().collect::<Standings>(),
        [("A", 4), ("B", 1)].into_iter().collect::<Standings>(),
    ];
    let rankings: Vec<Rankings> = vec![
        [("A".to_string(), 1), ("B".to_string(), 2)].into_iter().collect(),
        [("A".to_string(), 2), ("B".to_string(), 1)].into_iter().collect(),
        [("A".to_string(), 2), ("B".to_string(), 1)].into_iter().collect(),
        [("A".to_string(), 1), ("B".to_string(), 2)].into_iter().collect(),
    ];
    LeagueForecast {
        trials: 4,
        seed: 0,
        standings,
        rankings,
    }
}

#[test]
fn test_summary_statistics() {
    let summary = LeagueSummary::from_forecast(&forecast());
    assert_eq!(summary.trials, 4);
    assert_eq!(summary.rows.len(), 2);

    let a = summary.row("A").unwrap();
    assert_eq!(a.mean_points, 13.0 / 4.0);
    assert_eq!(a.min_points, 0);
    assert_eq!(a.max_points, 6);
    assert_eq!(a.mean_position, 1.5);
    assert_eq!(a.title_percentage(), 50.0);
    assert_eq!(a.bottom_percentage(), 50.0);
    assert_eq!(a.position_percentage(2), 50.0);
    assert_eq!(a.position_percentage(0), 0.0);
    assert_eq!(a.position_percentage(3), 0.0);
}

#[test]
fn test_rows_sorted_by_mean_points() {
    let summary = LeagueSummary::from_forecast(&forecast());
    // A: 13/4 points, B: 10/4 points
    assert_eq!(summary.rows[0].competitor, "A");
    assert_eq!(summary.rows[1].competitor, "B");
}

#[test]
fn test_position_percentages_sum_to_hundred() {
    let summary = LeagueSummary::from_forecast(&forecast());
    for row in &summary.rows {
        let total: f64 = row.position_percentages.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_empty_forecast() {
    let empty = LeagueForecast {
        trials: 0,
        seed: 0,
        standings: Vec::new(),
        rankings: Vec::new(),
    };
    assert!(LeagueSummary::from_forecast(&empty).rows.is_empty());
}

#[test]
fn test_zero_rank_is_ignored() {
    let mut forecast = forecast();
    forecast.rankings[0].insert("A".to_string(), 0);
    let summary = LeagueSummary::from_forecast(&forecast);

    let a = summary.row("A").unwrap();
    assert_eq!(a.position_percentage(1), 25.0);
    assert_eq!(a.position_percentage(2), 50.0);
}

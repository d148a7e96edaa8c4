use super::*;
use crate::error::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ratings() -> Ratings {
    [("A", 1400.0), ("B", 1200.0)].into_iter().collect()
}

#[test]
fn test_knockout_returns_a_participant_and_conserves_total() {
    let config = SimConfig::default();
    for seed in 0..50 {
        let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(seed));
        let before = ctx.ratings.total();
        let winner = ctx.play_knockout("A", "B").unwrap();
        assert!(winner == "A" || winner == "B");
        assert!((ctx.ratings.total() - before).abs() < 1e-9);
        assert_eq!(ctx.games_played(), 1);
    }
}

#[test]
fn test_knockout_winner_gains_rating() {
    let config = SimConfig::default();
    for seed in 0..50 {
        let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(seed));
        let winner = ctx.play_knockout("A", "B").unwrap();
        let loser = if winner == "A" { "B" } else { "A" };
        let start = ratings();
        assert!(ctx.ratings.get(&winner).unwrap() > start.get(&winner).unwrap());
        assert!(ctx.ratings.get(loser).unwrap() < start.get(loser).unwrap());
    }
}

#[test]
fn test_rating_update_reports_change() {
    let config = SimConfig::default();
    let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(3));
    let change = ctx
        .apply_rating_update("A", "B", 1400.0, 1200.0, Outcome::Loss, 0.75)
        .unwrap();
    assert!((change - (-3.75)).abs() < 1e-9);
    assert!((ctx.ratings.get("A").unwrap() - 1396.25).abs() < 1e-9);
    assert!((ctx.ratings.get("B").unwrap() - 1203.75).abs() < 1e-9);
}

#[test]
fn test_knockout_favourite_wins_expected_share() {
    let config = SimConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let n = 10_000;
    let mut a_wins = 0;
    for _ in 0..n {
        let mut ctx = TrialContext::new(ratings(), &config, &mut rng);
        if ctx.play_knockout("A", "B").unwrap() == "A" {
            a_wins += 1;
        }
    }
    let pct = a_wins as f64 * 100.0 / n as f64;
    assert!((pct - 75.97).abs() < 2.0, "A won {pct:.2}%");
}

#[test]
fn test_knockout_missing_rating() {
    let config = SimConfig::default();
    let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(1));
    assert_eq!(
        ctx.play_knockout("A", "Z"),
        Err(SimError::MissingRating {
            competitor: "Z".to_string()
        })
    );
    assert_eq!(ctx.ratings, ratings());
}

#[test]
fn test_league_fixture_awards_points() {
    let config = SimConfig::default();
    for seed in 0..50 {
        let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(seed))
            .with_standings(Standings::zeroed(["A", "B"]));
        let outcome = ctx.play_league("A", "B").unwrap();
        let (a, b) = (ctx.standings.points("A"), ctx.standings.points("B"));
        match outcome {
            Outcome::Win => assert_eq!((a, b), (3, 0)),
            Outcome::Draw => assert_eq!((a, b), (1, 1)),
            Outcome::Loss => assert_eq!((a, b), (0, 3)),
        }
        assert!((ctx.ratings.total() - 2600.0).abs() < 1e-9);
    }
}

#[test]
fn test_league_without_draws_never_draws() {
    let config = SimConfig {
        draw_rate: 0.0,
        ..Default::default()
    };
    let mut ctx = TrialContext::new(ratings(), &config, ChaCha8Rng::seed_from_u64(9));
    for _ in 0..200 {
        assert_ne!(ctx.play_league("A", "B").unwrap(), Outcome::Draw);
    }
    assert_eq!(ctx.games_played(), 200);
}

#[test]
fn test_head_to_head() {
    let ratings: Ratings = [("A", 1500.0), ("B", 1500.0)].into_iter().collect();
    let config = SimConfig {
        home_advantage: 0.0,
        ..Default::default()
    };
    let probs = head_to_head(&ratings, "A", "B", &config).unwrap();
    assert!((probs.win - 0.35).abs() < 1e-9);
    assert!((probs.draw - 0.3).abs() < 1e-9);
    assert!(head_to_head(&ratings, "A", "C", &config).is_err());
}

use super::*;
use crate::config::SimConfig;
use crate::types::Ratings;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn four_team_ratings() -> Ratings {
    [("A", 1600.0), ("B", 1500.0), ("C", 1450.0), ("D", 1300.0)]
        .into_iter()
        .collect()
}

fn semi_finals() -> DrawTree {
    DrawTree::node(DrawTree::leaf("A", "B"), DrawTree::leaf("C", "D"))
}

#[test]
fn test_single_game_resolves_directly() {
    let config = SimConfig::default();
    let draw = DrawTree::leaf("A", "B");
    for seed in 0..20 {
        let mut ctx = TrialContext::new(four_team_ratings(), &config, ChaCha8Rng::seed_from_u64(seed));
        let before = ctx.ratings.total();
        let winner = draw.resolve(&mut ctx).unwrap();
        assert!(winner == "A" || winner == "B");
        assert_eq!(ctx.games_played(), 1);
        assert_ne!(ctx.ratings.get("A").unwrap(), 1600.0);
        assert_ne!(ctx.ratings.get("B").unwrap(), 1500.0);
        assert!((ctx.ratings.total() - before).abs() < 1e-9);
    }
}

#[test]
fn test_four_team_bracket_plays_three_games() {
    let config = SimConfig::default();
    let draw = semi_finals();
    for seed in 0..50 {
        let mut ctx = TrialContext::new(four_team_ratings(), &config, ChaCha8Rng::seed_from_u64(seed));
        let winner = draw.resolve(&mut ctx).unwrap();
        assert!(["A", "B", "C", "D"].contains(&winner.as_str()));
        assert_eq!(ctx.games_played(), 3);
    }
}

#[test]
fn test_uneven_bracket() {
    // A bye-style draw: one half is a single game, the other a two-game half
    let config = SimConfig::default();
    let draw = DrawTree::node(
        DrawTree::leaf("A", "B"),
        DrawTree::node(DrawTree::leaf("C", "D"), DrawTree::leaf("E", "F")),
    );
    let mut ratings = four_team_ratings();
    ratings.insert("E", 1400.0);
    ratings.insert("F", 1350.0);

    let mut ctx = TrialContext::new(ratings, &config, ChaCha8Rng::seed_from_u64(5));
    draw.resolve(&mut ctx).unwrap();
    assert_eq!(ctx.games_played(), draw.games());
    assert_eq!(draw.games(), 5);
    assert_eq!(draw.rounds(), 3);
}

#[test]
fn test_missing_rating_fails_resolution() {
    let config = SimConfig::default();
    let draw = DrawTree::node(DrawTree::leaf("A", "B"), DrawTree::leaf("C", "X"));
    let mut ctx = TrialContext::new(four_team_ratings(), &config, ChaCha8Rng::seed_from_u64(0));
    assert!(matches!(
        draw.resolve(&mut ctx),
        Err(SimError::MissingRating { competitor }) if competitor == "X"
    ));
}

#[test]
fn test_shape_queries() {
    let draw = semi_finals();
    assert_eq!(draw.competitors(), vec!["A", "B", "C", "D"]);
    assert_eq!(draw.rounds(), 2);
    assert_eq!(draw.games(), 3);
    assert_eq!(DrawTree::leaf("A", "B").rounds(), 1);
}

#[test]
fn test_validate_rejects_duplicates_and_blanks() {
    let dup = DrawTree::node(DrawTree::leaf("A", "B"), DrawTree::leaf("A", "D"));
    assert!(matches!(dup.validate(), Err(SimError::MalformedDraw { .. })));

    assert!(DrawTree::leaf("A", "A").validate().is_err());
    assert!(DrawTree::leaf("A", " ").validate().is_err());
    assert!(semi_finals().validate().is_ok());
}

#[test]
fn test_from_seeding() {
    let draw = DrawTree::from_seeding(&["A", "B", "C", "D", "E", "F", "G", "H"]).unwrap();
    assert_eq!(draw.rounds(), 3);
    assert_eq!(draw.games(), 7);
    assert_eq!(draw.competitors(), vec!["A", "B", "C", "D", "E", "F", "G", "H"]);

    assert_eq!(DrawTree::from_seeding(&["A", "B"]).unwrap(), DrawTree::leaf("A", "B"));
    assert_eq!(DrawTree::from_seeding(&["A", "B", "C", "D"]).unwrap(), semi_finals());
    assert!(DrawTree::from_seeding(&["A", "B", "C"]).is_err());
    assert!(DrawTree::from_seeding::<&str>(&[]).is_err());
}

#[test]
fn test_nested_array_format() {
    let draw: DrawTree = serde_json::from_str(r#"[["A","B"],["C","D"]]"#).unwrap();
    assert_eq!(draw, semi_finals());
    assert_eq!(serde_json::to_string(&draw).unwrap(), r#"[["A","B"],["C","D"]]"#);

    let deep: DrawTree = serde_json::from_str(r#"[[["A","B"],["C","D"]],[["E","F"],["G","H"]]]"#).unwrap();
    assert_eq!(deep.games(), 7);
}

#[test]
fn test_malformed_arrays_rejected() {
    assert!(serde_json::from_str::<DrawTree>(r#"["A","B","C"]"#).is_err());
    assert!(serde_json::from_str::<DrawTree>(r#"["A"]"#).is_err());
    assert!(serde_json::from_str::<DrawTree>(r#"[["A","B"],"C"]"#).is_err());
}

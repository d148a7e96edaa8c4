use super::*;
use std::io::Write;

#[test]
fn test_format_from_extension() {
    assert_eq!(RatingFormat::from_path(Path::new("r.json")).unwrap(), RatingFormat::Json);
    assert_eq!(RatingFormat::from_path(Path::new("r.TOML")).unwrap(), RatingFormat::Toml);
    assert_eq!(RatingFormat::from_path(Path::new("data/latest.csv")).unwrap(), RatingFormat::Csv);
    assert!(matches!(
        RatingFormat::from_path(Path::new("ratings.xlsx")),
        Err(ForecastError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_parse_json() {
    let ratings = parse_ratings(r#"{"Arsenal": 1905.5, "Leeds": 1650}"#, RatingFormat::Json).unwrap();
    assert_eq!(ratings.get("Arsenal").unwrap(), 1905.5);
    assert_eq!(ratings.get("Leeds").unwrap(), 1650.0);
}

#[test]
fn test_parse_toml() {
    let ratings = parse_ratings("Arsenal = 1905.5\n\"Man City\" = 2010.0\n", RatingFormat::Toml).unwrap();
    assert_eq!(ratings.get("Man City").unwrap(), 2010.0);
}

#[test]
fn test_parse_csv_ranking_export() {
    let csv = "Rank,Club,Country,Elo,date\n1,Man City,ENG,2010.4,2024-05-01\n2,Real Madrid,ESP,1985,2024-05-01\n";
    let ratings = parse_ratings(csv, RatingFormat::Csv).unwrap();
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings.get("Real Madrid").unwrap(), 1985.0);
}

#[test]
fn test_parse_csv_bad_rating() {
    let csv = "Club,Elo\nArsenal,strong\n";
    assert!(matches!(
        parse_ratings(csv, RatingFormat::Csv),
        Err(ForecastError::Parse { line: 2, .. })
    ));
}

#[test]
fn test_parse_csv_missing_header() {
    let csv = "Team,Points\nArsenal,80\n";
    assert!(matches!(
        parse_ratings(csv, RatingFormat::Csv),
        Err(ForecastError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_load_ratings_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ratings.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Club,Elo").unwrap();
    writeln!(file, "Ajax,1720").unwrap();
    writeln!(file, "PSV,1760").unwrap();

    let ratings = load_ratings(&path).unwrap();
    assert_eq!(ratings.len(), 2);

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_ratings(&missing), Err(ForecastError::Io { .. })));
}

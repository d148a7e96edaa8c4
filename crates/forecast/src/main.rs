//! Forecast CLI
//!
//! Simulate knockout brackets and leagues from Elo ratings.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use forecast::{load_ratings, Report, Scenario, ScenarioFile};
use forecast_core::{head_to_head, win_probability, DrawTree, Fixture, SimConfig, TieBreak};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forecast")]
#[command(about = "Monte Carlo tournament and league forecasts from Elo ratings", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Win probabilities for a single-elimination draw
    Tournament {
        #[command(flatten)]
        input: InputArgs,
        /// Draw as nested JSON arrays, e.g. [["A","B"],["C","D"]]
        #[arg(long, conflicts_with = "seeding")]
        draw: Option<PathBuf>,
        /// Seeded entry list (power of two), paired 1v2, 3v4, ...
        #[arg(long, value_delimiter = ',')]
        seeding: Option<Vec<String>>,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Final table distribution for a round-robin league
    League {
        #[command(flatten)]
        input: InputArgs,
        /// Fixture list as a JSON array of [home, away] pairs
        #[arg(long, conflicts_with = "teams")]
        fixtures: Option<PathBuf>,
        /// Teams for a generated round robin
        #[arg(long, value_delimiter = ',')]
        teams: Option<Vec<String>>,
        /// Play every pairing home and away
        #[arg(long)]
        double: bool,
        /// Rank equal points by fixture order instead of a random jitter
        #[arg(long)]
        stable_tiebreak: bool,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Model probabilities for one fixture
    Odds {
        /// Home (first-listed) competitor
        home: String,
        /// Away (second-listed) competitor
        away: String,
        /// Rating table (.json, .toml or .csv)
        #[arg(short, long)]
        ratings: PathBuf,
        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Scenario file (TOML); other inputs override its values
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Rating table (.json, .toml or .csv)
    #[arg(short, long)]
    ratings: Option<PathBuf>,
    /// Write the report as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SimArgs {
    /// Number of Monte Carlo trials
    #[arg(short = 'n', long)]
    trials: Option<u32>,
    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long)]
    k_factor: Option<f64>,
    #[arg(long)]
    draw_rate: Option<f64>,
    #[arg(long)]
    home_advantage: Option<f64>,
}

impl SimArgs {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(k) = self.k_factor {
            config.k_factor = k;
        }
        if let Some(rate) = self.draw_rate {
            config.draw_rate = rate;
        }
        if let Some(home) = self.home_advantage {
            config.home_advantage = home;
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Start from the scenario file (if any), then layer command-line inputs on top
fn base_file(input: &InputArgs) -> Result<(ScenarioFile, PathBuf, String)> {
    match &input.scenario {
        Some(path) => ScenarioFile::load(path)
            .with_context(|| format!("loading scenario {}", path.display())),
        None => Ok((ScenarioFile::default(), PathBuf::from("."), "forecast".to_string())),
    }
}

fn finish(mut file: ScenarioFile, input: &InputArgs, dir: &Path, name: &str) -> Result<()> {
    if let Some(ratings) = &input.ratings {
        // Command-line paths are relative to the working directory
        file.ratings_file = Some(std::env::current_dir()?.join(ratings));
    }

    let scenario = Scenario::from_file(file, dir, name)?;
    let forecast = scenario.run().context("simulation failed")?;
    let report = Report::new(&scenario, forecast);
    report.print_report();

    if let Some(path) = &input.output {
        report
            .save(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}

fn run_tournament(
    input: InputArgs,
    draw: Option<PathBuf>,
    seeding: Option<Vec<String>>,
    sim: SimArgs,
) -> Result<()> {
    let (mut file, dir, name) = base_file(&input)?;
    if let Some(path) = &draw {
        let tree: DrawTree = read_json(path)?;
        file.draw = Some(tree);
        file.seeding = None;
    }
    if let Some(seeding) = seeding {
        file.seeding = Some(seeding);
        file.draw = None;
    }
    if file.draw.is_none() && file.seeding.is_none() {
        bail!("a tournament needs --draw, --seeding or a scenario with a draw");
    }
    file.fixtures = None;
    file.teams = None;
    sim.apply(&mut file.config);

    finish(file, &input, &dir, &name)
}

fn run_league(
    input: InputArgs,
    fixtures: Option<PathBuf>,
    teams: Option<Vec<String>>,
    double: bool,
    stable_tiebreak: bool,
    sim: SimArgs,
) -> Result<()> {
    let (mut file, dir, name) = base_file(&input)?;
    if let Some(path) = &fixtures {
        let list: Vec<Fixture> = read_json(path)?;
        file.fixtures = Some(list);
        file.teams = None;
    }
    if let Some(teams) = teams {
        file.teams = Some(teams);
        file.fixtures = None;
    }
    if file.fixtures.is_none() && file.teams.is_none() {
        bail!("a league needs --fixtures, --teams or a scenario with fixtures");
    }
    file.draw = None;
    file.seeding = None;
    file.double_round_robin |= double;
    if stable_tiebreak {
        file.config.tiebreak = TieBreak::Stable;
    }
    sim.apply(&mut file.config);

    finish(file, &input, &dir, &name)
}

fn run_odds(home: &str, away: &str, ratings_path: &Path, sim: SimArgs) -> Result<()> {
    let ratings = load_ratings(ratings_path)?;
    let mut config = SimConfig::default();
    sim.apply(&mut config);
    config.validate()?;

    let knockout = win_probability(ratings.get(home)?, ratings.get(away)?);
    let league = head_to_head(&ratings, home, away, &config)?;

    println!("=== {} vs {} ===", home, away);
    println!(
        "Ratings: {:.1} vs {:.1}",
        ratings.get(home)?,
        ratings.get(away)?
    );
    println!("Knockout (neutral): {} {:.1}%", home, knockout * 100.0);
    println!(
        "League (home advantage {}, draw rate {}): win {:.1}%, draw {:.1}%, loss {:.1}%",
        config.home_advantage,
        config.draw_rate,
        league.win * 100.0,
        league.draw * 100.0,
        league.loss * 100.0
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tournament {
            input,
            draw,
            seeding,
            sim,
        } => run_tournament(input, draw, seeding, sim),
        Commands::League {
            input,
            fixtures,
            teams,
            double,
            stable_tiebreak,
            sim,
        } => run_league(input, fixtures, teams, double, stable_tiebreak, sim),
        Commands::Odds {
            home,
            away,
            ratings,
            sim,
        } => run_odds(&home, &away, &ratings, sim),
    }
}


//! Round-robin league simulation

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::{TieBreak, TIEBREAK_JITTER};
use crate::error::{Result, SimError};
use crate::game::TrialContext;
use crate::types::{Competitor, Rankings, Standings};

/// A league fixture, home side first.
///
/// Serialized as a two-element array `["Home", "Away"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Competitor, Competitor)", into = "(Competitor, Competitor)")]
pub struct Fixture {
    pub home: Competitor,
    pub away: Competitor,
}

impl Fixture {
    pub fn new(home: impl Into<Competitor>, away: impl Into<Competitor>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

impl From<(Competitor, Competitor)> for Fixture {
    fn from((home, away): (Competitor, Competitor)) -> Self {
        Self { home, away }
    }
}

impl From<Fixture> for (Competitor, Competitor) {
    fn from(fixture: Fixture) -> Self {
        (fixture.home, fixture.away)
    }
}

/// Standings and final positions of one simulated season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueOutcome {
    pub standings: Standings,
    pub rankings: Rankings,
}

/// Every pairing once (or twice with venues swapped when `double` is set).
///
/// The first leg lists pairs in team order; the return leg follows in the
/// same order with home and away reversed.
pub fn round_robin<S: AsRef<str>>(teams: &[S], double: bool) -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            fixtures.push(Fixture::new(home.as_ref(), away.as_ref()));
        }
    }
    if double {
        let return_leg: Vec<_> = fixtures
            .iter()
            .map(|f| Fixture::new(f.away.clone(), f.home.clone()))
            .collect();
        fixtures.extend(return_leg);
    }
    fixtures
}

/// Reject fixtures with blank names or a competitor facing itself
pub fn validate_fixtures(fixtures: &[Fixture]) -> Result<()> {
    for (i, fixture) in fixtures.iter().enumerate() {
        if fixture.home.trim().is_empty() || fixture.away.trim().is_empty() {
            return Err(SimError::MalformedFixture {
                reason: format!("fixture {} has an empty competitor name", i + 1),
            });
        }
        if fixture.home == fixture.away {
            return Err(SimError::MalformedFixture {
                reason: format!("fixture {} pits '{}' against itself", i + 1, fixture.home),
            });
        }
    }
    Ok(())
}

/// Competitors of a fixture list in order of first appearance
pub fn fixture_competitors(fixtures: &[Fixture]) -> Vec<&str> {
    let mut seen = HashSet::new();
    fixtures
        .iter()
        .flat_map(|f| [f.home.as_str(), f.away.as_str()])
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Play every fixture in order and rank the final table.
///
/// Fixtures resolve one after another against the context's live ratings.
/// Reported standings are the exact integer points; the tie-break only
/// affects the ranking order.
pub fn simulate_league<R: Rng>(
    fixtures: &[Fixture],
    ctx: &mut TrialContext<'_, R>,
) -> Result<LeagueOutcome> {
    for fixture in fixtures {
        ctx.play_league(&fixture.home, &fixture.away)?;
    }

    let standings = ctx.standings.clone();
    let order = table_order(fixtures, &standings);
    let tiebreak = ctx.config().tiebreak;
    let rankings = rank_standings(&standings, &order, tiebreak, ctx.rng());

    Ok(LeagueOutcome { standings, rankings })
}

/// Fixture competitors by first appearance, then standings-only entries by name
fn table_order<'a>(fixtures: &'a [Fixture], standings: &'a Standings) -> Vec<&'a str> {
    let mut order = fixture_competitors(fixtures);
    let listed: HashSet<&str> = order.iter().copied().collect();
    order.extend(standings.competitors().filter(|c| !listed.contains(c)));
    order
}

/// Assign positions 1..=n by points, highest first.
///
/// With [`TieBreak::Jitter`] each total gets an independent uniform
/// perturbation in `[0, TIEBREAK_JITTER)`, far below one point, so equal
/// totals end up in random order. With [`TieBreak::Stable`] equal totals
/// keep their order in `order`.
pub fn rank_standings<R: Rng + ?Sized>(
    standings: &Standings,
    order: &[&str],
    tiebreak: TieBreak,
    rng: &mut R,
) -> Rankings {
    let mut table: Vec<(&str, f64)> = order
        .iter()
        .map(|&competitor| {
            let jitter = match tiebreak {
                TieBreak::Jitter => rng.gen_range(0.0..TIEBREAK_JITTER),
                TieBreak::Stable => 0.0,
            };
            (competitor, f64::from(standings.points(competitor)) + jitter)
        })
        .collect();

    // Stable sort: equal keys keep `order`
    table.sort_by(|a, b| b.1.total_cmp(&a.1));

    table
        .into_iter()
        .enumerate()
        .map(|(i, (competitor, _))| (competitor.to_string(), i + 1))
        .collect()
}

#[cfg(test)]
#[path = "league_tests.rs"]
mod league_tests;

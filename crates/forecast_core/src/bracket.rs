//! Single-elimination draw trees and their recursive resolution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::game::TrialContext;
use crate::types::{first_duplicate, Competitor};

/// Nested single-elimination draw.
///
/// Serialized as nested two-element arrays, e.g. `[["A", "B"], ["C", "D"]]`:
/// a pair of names is a game, a pair of sub-draws is the two halves of a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrawTree {
    Leaf(Competitor, Competitor),
    Node(Box<DrawTree>, Box<DrawTree>),
}

impl DrawTree {
    pub fn leaf(first: impl Into<Competitor>, second: impl Into<Competitor>) -> Self {
        DrawTree::Leaf(first.into(), second.into())
    }

    pub fn node(left: DrawTree, right: DrawTree) -> Self {
        DrawTree::Node(Box::new(left), Box::new(right))
    }

    /// Build a balanced bracket from a seeded list.
    ///
    /// Adjacent entries meet in the first round (1v2, 3v4, ...), then adjacent
    /// games are paired up round by round. The list length must be a power of
    /// two, at least 2.
    pub fn from_seeding<S: AsRef<str>>(seeding: &[S]) -> Result<Self> {
        let n = seeding.len();
        if n < 2 || !n.is_power_of_two() {
            return Err(SimError::malformed_draw(format!(
                "a bracket needs a power-of-two number of competitors (got {n})"
            )));
        }

        let mut round: Vec<DrawTree> = seeding
            .chunks(2)
            .map(|pair| DrawTree::leaf(pair[0].as_ref(), pair[1].as_ref()))
            .collect();

        while round.len() > 1 {
            let mut next = Vec::with_capacity(round.len() / 2);
            let mut halves = round.into_iter();
            while let (Some(left), Some(right)) = (halves.next(), halves.next()) {
                next.push(DrawTree::node(left, right));
            }
            round = next;
        }

        let draw = round
            .pop()
            .ok_or_else(|| SimError::malformed_draw("empty seeding"))?;
        draw.validate()?;
        Ok(draw)
    }

    /// Competitors in bracket order
    pub fn competitors(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_competitors(&mut out);
        out
    }

    fn collect_competitors<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            DrawTree::Leaf(a, b) => {
                out.push(a);
                out.push(b);
            }
            DrawTree::Node(left, right) => {
                left.collect_competitors(out);
                right.collect_competitors(out);
            }
        }
    }

    /// Number of rounds needed to produce a winner from the deepest game
    pub fn rounds(&self) -> usize {
        match self {
            DrawTree::Leaf(..) => 1,
            DrawTree::Node(left, right) => 1 + left.rounds().max(right.rounds()),
        }
    }

    /// Games played in one resolution (one fewer than the competitors)
    pub fn games(&self) -> usize {
        match self {
            DrawTree::Leaf(..) => 1,
            DrawTree::Node(left, right) => left.games() + right.games() + 1,
        }
    }

    /// Reject empty names and competitors that appear more than once
    pub fn validate(&self) -> Result<()> {
        let competitors = self.competitors();
        if competitors.iter().any(|c| c.trim().is_empty()) {
            return Err(SimError::malformed_draw("empty competitor name"));
        }
        if let Some(dup) = first_duplicate(competitors.iter().copied()) {
            return Err(SimError::malformed_draw(format!(
                "'{dup}' appears more than once"
            )));
        }
        Ok(())
    }

    /// Play the bracket out and return the champion.
    ///
    /// A game resolves directly. Two halves resolve to one winner each, and
    /// those two winners are then resolved as a new game, so the final takes
    /// the same path as any first-round game.
    pub fn resolve<R: Rng>(&self, ctx: &mut TrialContext<'_, R>) -> Result<Competitor> {
        match self {
            DrawTree::Leaf(first, second) => ctx.play_knockout(first, second),
            DrawTree::Node(left, right) => {
                let left_winner = left.resolve(ctx)?;
                let right_winner = right.resolve(ctx)?;
                DrawTree::Leaf(left_winner, right_winner).resolve(ctx)
            }
        }
    }
}

#[cfg(test)]
#[path = "bracket_tests.rs"]
mod bracket_tests;

use std::{cmp::Ordering, fmt};

use crate::common::outcome::OutcomeKind;

/// Cumulative statistics for one team.
///
/// Counters only move through [`Team::apply_outcome`] and
/// [`Team::undo_outcome`]; the record keeps no history of its own, so an undo
/// is only correct when it replays the exact goals that were applied.
#[derive(Debug, Clone, Default)]
pub struct Team {
    name: String,
    wins: i32,
    losses: i32,
    scored_draws: i32,
    no_score_draws: i32,
    goals_scored: i32,
    goals_against: i32,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a team with pre-seeded counters, in the persisted column order.
    pub fn with_stats(
        name: impl Into<String>,
        wins: i32,
        losses: i32,
        scored_draws: i32,
        no_score_draws: i32,
        goals_scored: i32,
        goals_against: i32,
    ) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            scored_draws,
            no_score_draws,
            goals_scored,
            goals_against,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wins(&self) -> i32 {
        self.wins
    }

    pub fn losses(&self) -> i32 {
        self.losses
    }

    pub fn scored_draws(&self) -> i32 {
        self.scored_draws
    }

    pub fn no_score_draws(&self) -> i32 {
        self.no_score_draws
    }

    pub fn goals_scored(&self) -> i32 {
        self.goals_scored
    }

    pub fn goals_against(&self) -> i32 {
        self.goals_against
    }

    // Counters are trusted and unchecked; all arithmetic on them wraps.

    pub fn goal_difference(&self) -> i32 {
        self.goals_scored.wrapping_sub(self.goals_against)
    }

    pub fn win_points(&self) -> i32 {
        self.wins.wrapping_mul(OutcomeKind::Win.points())
    }

    pub fn scored_draw_points(&self) -> i32 {
        self.scored_draws.wrapping_mul(OutcomeKind::ScoredDraw.points())
    }

    pub fn no_score_draw_points(&self) -> i32 {
        self.no_score_draws.wrapping_mul(OutcomeKind::ScorelessDraw.points())
    }

    pub fn points(&self) -> i32 {
        self.win_points()
            .wrapping_add(self.scored_draw_points())
            .wrapping_add(self.no_score_draw_points())
    }

    pub fn matches_played(&self) -> i32 {
        self.wins
            .wrapping_add(self.losses)
            .wrapping_add(self.scored_draws)
            .wrapping_add(self.no_score_draws)
    }

    pub fn apply_outcome(&mut self, goals_scored: i32, goals_against: i32) -> OutcomeKind {
        self.goals_scored = self.goals_scored.wrapping_add(goals_scored);
        self.goals_against = self.goals_against.wrapping_add(goals_against);

        let kind = OutcomeKind::classify(goals_scored, goals_against);
        let counter = self.counter_mut(kind);
        *counter = counter.wrapping_add(1);
        kind
    }

    pub fn undo_outcome(&mut self, goals_scored: i32, goals_against: i32) -> OutcomeKind {
        self.goals_scored = self.goals_scored.wrapping_sub(goals_scored);
        self.goals_against = self.goals_against.wrapping_sub(goals_against);

        let kind = OutcomeKind::classify(goals_scored, goals_against);
        let counter = self.counter_mut(kind);
        *counter = counter.wrapping_sub(1);
        kind
    }

    fn counter_mut(&mut self, kind: OutcomeKind) -> &mut i32 {
        match kind {
            OutcomeKind::Win => &mut self.wins,
            OutcomeKind::Loss => &mut self.losses,
            OutcomeKind::ScoredDraw => &mut self.scored_draws,
            OutcomeKind::ScorelessDraw => &mut self.no_score_draws,
        }
    }

    /// Compares on the two ranking keys only: wins, then goal difference.
    ///
    /// This is a total preorder, so records with different statistics can
    /// still compare `Equal` here.
    pub fn ranking_key_cmp(&self, other: &Self) -> Ordering {
        self.wins
            .cmp(&other.wins)
            .then_with(|| self.goal_difference().cmp(&other.goal_difference()))
    }

    /// The extended row used by the ranked export, `rank` appended last.
    pub fn ranked_line(&self, rank: usize) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.name,
            self.wins,
            self.win_points(),
            self.scored_draws,
            self.scored_draw_points(),
            self.no_score_draws,
            self.no_score_draw_points(),
            self.losses,
            self.goals_scored,
            self.goals_against,
            self.goal_difference(),
            self.points(),
            rank
        )
    }
}

/// Statistical equality: all six counters match. The name is ignored.
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.wins == other.wins
            && self.losses == other.losses
            && self.scored_draws == other.scored_draws
            && self.no_score_draws == other.no_score_draws
            && self.goals_scored == other.goals_scored
            && self.goals_against == other.goals_against
    }
}

/// Ranking order: wins, then goal difference.
///
/// Records that tie on both keys but differ elsewhere (draws, losses) have no
/// defined order and return `None`.
impl PartialOrd for Team {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.ranking_key_cmp(other) {
            Ordering::Equal => None,
            ord => Some(ord),
        }
    }
}

/// Compact positional form used by the persisted ledger file.
impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.name,
            self.wins,
            self.losses,
            self.scored_draws,
            self.no_score_draws,
            self.goals_scored,
            self.goals_against
        )
    }
}

use std::cmp::Ordering;

use crate::domain::team::Team;

/// How the ledger orders its teams when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingRule {
    /// Wins first, goal difference among equal wins. Points are not consulted.
    #[default]
    WinsThenGoalDifference,
    /// Points, then goal difference, then name ascending. A strict total order
    /// for teams with distinct names.
    PointsThenGoalDifference,
}

impl RankingRule {
    /// Orders two teams for a descending table: `Less` means `a` ranks above `b`.
    pub fn compare(self, a: &Team, b: &Team) -> Ordering {
        match self {
            RankingRule::WinsThenGoalDifference => b.ranking_key_cmp(a),
            RankingRule::PointsThenGoalDifference => b
                .points()
                .cmp(&a.points())
                .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
                .then_with(|| a.name().cmp(b.name())),
        }
    }

    /// Stable in-place sort; teams the rule cannot separate keep their order.
    pub fn sort(self, teams: &mut [Team]) {
        teams.sort_by(|a, b| self.compare(a, b));
    }
}

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The classification of a single match from one team's point of view.
///
/// Every `(goals_scored, goals_against)` pair maps to exactly one kind, and
/// the same mapping is used when a result is reversed, so undoing a result
/// always touches the counter that applying it touched.
///
/// # Examples
/// ```
/// use standings_ledger::common::outcome::OutcomeKind;
///
/// assert_eq!(OutcomeKind::classify(2, 0), OutcomeKind::Win);
/// assert_eq!(OutcomeKind::classify(1, 1), OutcomeKind::ScoredDraw);
/// assert_eq!(OutcomeKind::classify(0, 0), OutcomeKind::ScorelessDraw);
/// assert_eq!(OutcomeKind::Win.points(), 3);
/// ```
pub enum OutcomeKind {
    Win,
    Loss,
    ScoredDraw,
    ScorelessDraw,
}

impl OutcomeKind {
    pub fn classify(goals_scored: i32, goals_against: i32) -> Self {
        if goals_scored > goals_against {
            OutcomeKind::Win
        } else if goals_against > goals_scored {
            OutcomeKind::Loss
        } else if goals_scored > 0 {
            OutcomeKind::ScoredDraw
        } else {
            OutcomeKind::ScorelessDraw
        }
    }

    /// League points awarded for this outcome.
    pub fn points(self) -> i32 {
        match self {
            OutcomeKind::Win => 3,
            OutcomeKind::ScoredDraw => 2,
            OutcomeKind::ScorelessDraw => 1,
            OutcomeKind::Loss => 0,
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(self, OutcomeKind::ScoredDraw | OutcomeKind::ScorelessDraw)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeKind::Win => "win",
            OutcomeKind::Loss => "loss",
            OutcomeKind::ScoredDraw => "scored draw",
            OutcomeKind::ScorelessDraw => "scoreless draw",
        };
        f.write_str(label)
    }
}

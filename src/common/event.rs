/// One team's line in a round of results, as handed to the ledger.
///
/// Entries flagged `did_not_play` stay in their batch so the round reads back
/// exactly as submitted, but they never touch team statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub team: String,
    pub goals_scored: i32,
    pub goals_against: i32,
    pub did_not_play: bool,
}

impl MatchResult {
    pub fn played(team: impl Into<String>, goals_scored: i32, goals_against: i32) -> Self {
        Self {
            team: team.into(),
            goals_scored,
            goals_against,
            did_not_play: false,
        }
    }

    pub fn did_not_play(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            goals_scored: 0,
            goals_against: 0,
            did_not_play: true,
        }
    }
}

/// A round of results applied to the ledger as one unit and undone as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchBatch {
    entries: Vec<MatchResult>,
}

impl MatchBatch {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: MatchResult) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MatchResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that carry a statistical effect.
    pub fn played(&self) -> impl DoubleEndedIterator<Item = &MatchResult> {
        self.entries.iter().filter(|e| !e.did_not_play)
    }
}

impl From<Vec<MatchResult>> for MatchBatch {
    fn from(entries: Vec<MatchResult>) -> Self {
        Self { entries }
    }
}

impl FromIterator<MatchResult> for MatchBatch {
    fn from_iter<T: IntoIterator<Item = MatchResult>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

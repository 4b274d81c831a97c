use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use log::{debug, info, warn};

use crate::{
    common::{
        error::{LedgerError, LedgerResult},
        event::MatchBatch,
        outcome::OutcomeKind,
    },
    domain::{ranking::RankingRule, team::Team},
    io::{export, store},
};

/// Addresses a team in the ledger, by position or by exact name.
///
/// Positions change whenever the ledger is sorted; names do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for TeamRef<'_> {
    fn from(index: usize) -> Self {
        TeamRef::Index(index)
    }
}

impl<'a> From<&'a str> for TeamRef<'a> {
    fn from(name: &'a str) -> Self {
        TeamRef::Name(name)
    }
}

/// A division's standings: the teams, the history of applied rounds, and
/// whether anything changed since the last save.
///
/// Every round applied with [`Standings::apply_match_batch`] is kept on an
/// undo stack, so undoing all of them restores each team to the counters it
/// had before the first round.
#[derive(Debug, Default)]
pub struct Standings {
    teams: Vec<Team>,
    history: Vec<MatchBatch>,
    modified: bool,
    ranking_rule: RankingRule,
}

impl Standings {
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            history: Vec::new(),
            modified: false,
            ranking_rule: RankingRule::default(),
        }
    }

    /// A ledger of zero-statistics teams. Not marked modified.
    pub fn with_teams<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_teams(names.into_iter().map(Team::new).collect())
    }

    pub fn from_teams(teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::new()
        }
    }

    pub fn with_ranking_rule(mut self, rule: RankingRule) -> Self {
        self.ranking_rule = rule;
        self
    }

    pub fn ranking_rule(&self) -> RankingRule {
        self.ranking_rule
    }

    pub fn set_ranking_rule(&mut self, rule: RankingRule) {
        self.ranking_rule = rule;
    }

    /// Loads a ledger from a persisted file. The result is not modified.
    pub fn load(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let teams = store::load_from_path(path)?;
        info!("loaded {} teams from {}", teams.len(), path.display());
        Ok(Self::from_teams(teams))
    }

    /// Reads persisted ledger lines from any reader.
    pub fn read_from<R: Read>(rdr: R) -> LedgerResult<Self> {
        let mut rdr = store::reader_from(rdr);
        let teams = store::read_teams(&mut rdr).collect::<LedgerResult<Vec<_>>>()?;
        Ok(Self::from_teams(teams))
    }

    pub fn add_teams<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.teams.len();
        self.teams.extend(names.into_iter().map(Team::new));
        debug!("added {} teams", self.teams.len() - before);
        self.modified = true;
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get_team(&self, index: usize) -> LedgerResult<&Team> {
        self.teams.get(index).ok_or(LedgerError::IndexOutOfRange {
            index,
            len: self.teams.len(),
        })
    }

    /// First team whose name matches exactly (case-sensitive).
    pub fn find_team(&self, name: &str) -> LedgerResult<&Team> {
        let index = self.position_of(name)?;
        Ok(&self.teams[index])
    }

    pub fn position_of(&self, name: &str) -> LedgerResult<usize> {
        self.teams
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| LedgerError::TeamNotFound(name.to_string()))
    }

    fn resolve(&self, team: TeamRef<'_>) -> LedgerResult<usize> {
        match team {
            TeamRef::Index(index) if index < self.teams.len() => Ok(index),
            TeamRef::Index(index) => Err(LedgerError::IndexOutOfRange {
                index,
                len: self.teams.len(),
            }),
            TeamRef::Name(name) => self.position_of(name),
        }
    }

    /// Applies one result outside any round; it is not recorded for undo.
    pub fn apply_match_result<'a>(
        &mut self,
        team: impl Into<TeamRef<'a>>,
        goals_scored: i32,
        goals_against: i32,
    ) -> LedgerResult<OutcomeKind> {
        let index = self.resolve(team.into())?;
        let kind = self.teams[index].apply_outcome(goals_scored, goals_against);
        self.modified = true;
        Ok(kind)
    }

    /// Reverses one result previously applied with the same goals.
    pub fn undo_match_result<'a>(
        &mut self,
        team: impl Into<TeamRef<'a>>,
        goals_scored: i32,
        goals_against: i32,
    ) -> LedgerResult<OutcomeKind> {
        let index = self.resolve(team.into())?;
        let kind = self.teams[index].undo_outcome(goals_scored, goals_against);
        self.modified = true;
        Ok(kind)
    }

    /// Applies a round and pushes it onto the undo stack.
    ///
    /// All team names are resolved before anything is applied. If any played
    /// entry names an unknown team the call fails with
    /// [`LedgerError::TeamNotFound`] and the ledger is left untouched.
    pub fn apply_match_batch(&mut self, batch: MatchBatch) -> LedgerResult<()> {
        let targets = batch
            .played()
            .map(|entry| self.position_of(&entry.team))
            .collect::<LedgerResult<Vec<_>>>()
            .inspect_err(|e| warn!("rejected round of {} results: {e}", batch.len()))?;

        for (index, entry) in targets.into_iter().zip(batch.played()) {
            let kind = self.teams[index].apply_outcome(entry.goals_scored, entry.goals_against);
            debug!(
                "{} {}-{}: {kind}",
                entry.team, entry.goals_scored, entry.goals_against
            );
        }

        debug!(
            "applied round of {} results, {} rounds on record",
            batch.len(),
            self.history.len() + 1
        );
        self.history.push(batch);
        self.modified = true;
        Ok(())
    }

    /// Pops the latest round, reverses its results and hands it back.
    ///
    /// Returns `None`, changing nothing, when there is no round to undo.
    pub fn undo_match_batch(&mut self) -> Option<MatchBatch> {
        let batch = self.history.pop()?;

        for entry in batch.played().rev() {
            if let Some(team) = self.teams.iter_mut().find(|t| t.name() == entry.team) {
                team.undo_outcome(entry.goals_scored, entry.goals_against);
            }
        }

        debug!(
            "undid round of {} results, {} rounds on record",
            batch.len(),
            self.history.len()
        );
        self.modified = true;
        Some(batch)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Orders teams best-first by the ranking rule. Stable: teams the rule
    /// cannot separate keep their relative order, so sorting twice changes
    /// nothing.
    pub fn sort(&mut self) {
        self.ranking_rule.sort(&mut self.teams);
        debug!("sorted {} teams by {:?}", self.teams.len(), self.ranking_rule);
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Saves every team to `path`. Clears the modified flag only on success.
    pub fn save(&mut self, path: impl AsRef<Path>) -> LedgerResult<()> {
        let path = path.as_ref();
        store::save_to_path(path, &self.teams)?;
        self.modified = false;
        info!("saved {} teams to {}", self.teams.len(), path.display());
        Ok(())
    }

    /// Writes persisted ledger lines to any writer. Does not touch the modified flag.
    pub fn write_to<W: Write>(&self, writer: W) -> LedgerResult<()> {
        store::write_teams(writer, &self.teams)?;
        Ok(())
    }

    /// Sorts, then writes the ranked CSV table to `path`.
    pub fn export_csv(&mut self, path: impl AsRef<Path>) -> LedgerResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.export_to(BufWriter::new(file))?;
        info!("exported {} ranked teams to {}", self.teams.len(), path.display());
        Ok(())
    }

    /// Sorts, then writes the ranked CSV table to any writer.
    pub fn export_to<W: Write>(&mut self, writer: W) -> LedgerResult<()> {
        self.sort();
        export::write_standings(writer, &self.teams)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::event::MatchResult;

    fn division() -> Standings {
        Standings::with_teams(["Arsenal", "Chelsea", "Spurs"])
    }

    fn snapshot(standings: &Standings) -> Vec<(String, Team)> {
        standings
            .teams()
            .iter()
            .map(|t| (t.name().to_string(), t.clone()))
            .collect()
    }

    #[test]
    fn new_ledgers_are_not_modified() {
        assert!(!Standings::new().is_modified());
        assert!(!division().is_modified());
        assert_eq!(division().len(), 3);
    }

    #[test]
    fn add_teams_appends_and_marks_modified() {
        let mut standings = Standings::new();
        standings.add_teams(["Leeds", "Wolves"]);

        assert!(standings.is_modified());
        assert_eq!(standings.len(), 2);
        assert_eq!(standings.get_team(1).unwrap().name(), "Wolves");
        assert_eq!(standings.get_team(1).unwrap().matches_played(), 0);
    }

    #[test]
    fn find_team_is_exact_and_case_sensitive() {
        let standings = division();
        assert_eq!(standings.find_team("Chelsea").unwrap().name(), "Chelsea");

        let err = standings.find_team("chelsea").unwrap_err();
        assert!(matches!(err, LedgerError::TeamNotFound(name) if name == "chelsea"));
    }

    #[test]
    fn get_team_out_of_range() {
        let err = division().get_team(3).unwrap_err();
        assert!(matches!(err, LedgerError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn apply_match_result_by_index_and_name() {
        let mut standings = division();
        standings.apply_match_result(0usize, 2, 1).unwrap();
        let kind = standings.apply_match_result("Spurs", 0, 0).unwrap();

        assert_eq!(kind, OutcomeKind::ScorelessDraw);
        assert_eq!(standings.find_team("Arsenal").unwrap().wins(), 1);
        assert_eq!(standings.find_team("Spurs").unwrap().no_score_draws(), 1);
        assert!(standings.is_modified());
        assert!(!standings.can_undo());
    }

    #[test]
    fn apply_match_result_failures_leave_state_untouched() {
        let mut standings = division();
        let before = snapshot(&standings);

        assert!(matches!(
            standings.apply_match_result("Fulham", 1, 0),
            Err(LedgerError::TeamNotFound(_))
        ));
        assert!(matches!(
            standings.apply_match_result(7usize, 1, 0),
            Err(LedgerError::IndexOutOfRange { index: 7, len: 3 })
        ));

        assert_eq!(snapshot(&standings), before);
        assert!(!standings.is_modified());
    }

    #[test]
    fn undo_match_result_reverses_single_outcome() {
        let mut standings = division();
        standings.apply_match_result("Chelsea", 3, 1).unwrap();
        standings.undo_match_result("Chelsea", 3, 1).unwrap();

        assert_eq!(standings.find_team("Chelsea").unwrap(), &Team::new("Chelsea"));
    }

    #[test]
    fn batch_apply_skips_did_not_play_and_records_history() {
        let mut standings = division();
        let batch: MatchBatch = vec![
            MatchResult::played("Arsenal", 2, 0),
            MatchResult::played("Chelsea", 0, 2),
            MatchResult::did_not_play("Spurs"),
        ]
        .into();

        standings.apply_match_batch(batch).unwrap();

        assert_eq!(standings.find_team("Arsenal").unwrap().wins(), 1);
        assert_eq!(standings.find_team("Chelsea").unwrap().losses(), 1);
        assert_eq!(standings.find_team("Spurs").unwrap().matches_played(), 0);
        assert_eq!(standings.history_len(), 1);
        assert!(standings.is_modified());
    }

    #[test]
    fn batch_with_unknown_team_changes_nothing() {
        let mut standings = division();
        let before = snapshot(&standings);
        let batch: MatchBatch = vec![
            MatchResult::played("Arsenal", 2, 0),
            MatchResult::played("Fulham", 0, 2),
        ]
        .into();

        let err = standings.apply_match_batch(batch).unwrap_err();

        assert!(matches!(err, LedgerError::TeamNotFound(name) if name == "Fulham"));
        assert_eq!(snapshot(&standings), before);
        assert_eq!(standings.history_len(), 0);
        assert!(!standings.is_modified());
    }

    #[test]
    fn unknown_team_marked_did_not_play_is_accepted() {
        let mut standings = division();
        let batch: MatchBatch = vec![MatchResult::did_not_play("Fulham")].into();
        standings.apply_match_batch(batch).unwrap();
        assert_eq!(standings.history_len(), 1);
    }

    #[test]
    fn undo_batch_restores_counters_and_returns_batch() {
        let mut standings = division();
        standings.apply_match_result("Spurs", 1, 1).unwrap();
        let before = snapshot(&standings);

        let batch: MatchBatch = vec![
            MatchResult::played("Arsenal", 1, 1),
            MatchResult::played("Spurs", 1, 1),
            MatchResult::did_not_play("Chelsea"),
        ]
        .into();
        standings.apply_match_batch(batch.clone()).unwrap();

        let undone = standings.undo_match_batch();
        assert_eq!(undone, Some(batch));
        assert_eq!(snapshot(&standings), before);
        assert!(!standings.can_undo());
    }

    #[test]
    fn undo_is_last_in_first_out() {
        let mut standings = division();
        let first: MatchBatch = vec![MatchResult::played("Arsenal", 1, 0)].into();
        let second: MatchBatch = vec![MatchResult::played("Chelsea", 4, 0)].into();
        standings.apply_match_batch(first.clone()).unwrap();
        standings.apply_match_batch(second.clone()).unwrap();

        assert_eq!(standings.undo_match_batch(), Some(second));
        assert_eq!(standings.find_team("Chelsea").unwrap().wins(), 0);
        assert_eq!(standings.find_team("Arsenal").unwrap().wins(), 1);
        assert_eq!(standings.undo_match_batch(), Some(first));
        assert_eq!(standings.undo_match_batch(), None);
    }

    #[test]
    fn undo_batch_reverses_every_entry_for_a_repeated_team() {
        let mut standings = division();
        let before = snapshot(&standings);

        let batch: MatchBatch = vec![
            MatchResult::played("Arsenal", 2, 0),
            MatchResult::played("Arsenal", 0, 0),
            MatchResult::played("Arsenal", 1, 3),
        ]
        .into();
        standings.apply_match_batch(batch).unwrap();
        assert_eq!(standings.find_team("Arsenal").unwrap().matches_played(), 3);

        standings.undo_match_batch().unwrap();
        assert_eq!(snapshot(&standings), before);
    }

    #[test]
    fn undo_on_empty_history_changes_nothing() {
        let mut standings = division();
        let before = snapshot(&standings);

        assert_eq!(standings.undo_match_batch(), None);
        assert_eq!(snapshot(&standings), before);
        assert!(!standings.is_modified());
    }

    #[test]
    fn undo_survives_sorting() {
        let mut standings = division();
        let batch: MatchBatch = vec![
            MatchResult::played("Spurs", 5, 0),
            MatchResult::played("Arsenal", 0, 5),
        ]
        .into();
        standings.apply_match_batch(batch).unwrap();
        standings.sort();
        assert_eq!(standings.get_team(0).unwrap().name(), "Spurs");

        standings.undo_match_batch().unwrap();
        for team in standings.teams() {
            assert_eq!(team, &Team::new(team.name()));
        }
    }

    #[test]
    fn sort_ranks_wins_above_goal_difference() {
        let mut standings = Standings::from_teams(vec![
            Team::with_stats("B", 2, 0, 0, 0, 12, 2),
            Team::with_stats("A", 3, 0, 0, 0, 6, 2),
        ]);
        standings.sort();

        let names: Vec<&str> = standings.teams().iter().map(Team::name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(!standings.is_modified());
    }

    #[test]
    fn sort_by_points_rule() {
        let mut standings = Standings::from_teams(vec![
            Team::with_stats("Wins", 2, 4, 0, 0, 4, 9),
            Team::with_stats("Draws", 1, 0, 5, 0, 8, 3),
        ])
        .with_ranking_rule(RankingRule::PointsThenGoalDifference);
        standings.sort();

        assert_eq!(standings.get_team(0).unwrap().name(), "Draws");
    }

    #[test]
    fn read_and_write_persisted_lines() {
        let standings = Standings::read_from("Arsenal,3,1,0,2,9,4\nSpurs,,,,,,\n".as_bytes()).unwrap();
        assert_eq!(standings.len(), 2);
        assert!(!standings.is_modified());

        let mut out = Vec::new();
        standings.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Arsenal,3,1,0,2,9,4\nSpurs,0,0,0,0,0,0\n"
        );
    }

    #[test]
    fn export_sorts_first() {
        let mut standings = Standings::from_teams(vec![
            Team::with_stats("Low", 0, 2, 0, 0, 1, 5),
            Team::with_stats("High", 2, 0, 0, 0, 5, 1),
        ]);
        let mut out = Vec::new();
        standings.export_to(&mut out).unwrap();

        let s = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = s.lines().skip(1).collect();
        assert!(rows[0].starts_with("High,") && rows[0].ends_with(",1"));
        assert!(rows[1].starts_with("Low,") && rows[1].ends_with(",2"));
        assert_eq!(standings.get_team(0).unwrap().name(), "High");
    }
}

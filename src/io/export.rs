use std::io::Write;

use crate::domain::team::Team;

/// Header columns of the ranked export, in [`StandingRow`] field order.
const HEADER: [&str; 13] = [
    "Team",
    "WIN",
    "T W",
    "SCORED DRAW",
    "T S D",
    "SCORELESSDRAW",
    "T SL D",
    "LOSS",
    "G scored",
    " G scored Against",
    "G D",
    "TOTAL",
    "RANK",
];

#[derive(serde::Serialize)]
/// Ranked export row, one field per [`HEADER`] column.
///
/// Points per outcome are spelled out next to each counter so the table can
/// be checked by hand.
struct StandingRow<'a> {
    name: &'a str,
    wins: i32,
    win_points: i32,
    scored_draws: i32,
    scored_draw_points: i32,
    no_score_draws: i32,
    no_score_draw_points: i32,
    losses: i32,
    goals_scored: i32,
    goals_against: i32,
    goal_difference: i32,
    points: i32,
    rank: usize,
}

impl<'a> StandingRow<'a> {
    fn new(team: &'a Team, rank: usize) -> Self {
        Self {
            name: team.name(),
            wins: team.wins(),
            win_points: team.win_points(),
            scored_draws: team.scored_draws(),
            scored_draw_points: team.scored_draw_points(),
            no_score_draws: team.no_score_draws(),
            no_score_draw_points: team.no_score_draw_points(),
            losses: team.losses(),
            goals_scored: team.goals_scored(),
            goals_against: team.goals_against(),
            goal_difference: team.goal_difference(),
            points: team.points(),
            rank,
        }
    }
}

/// Writes a ranked standings table to a CSV writer.
///
/// Teams must already be in rank order; the row position (1-based) is
/// written as `RANK`. The header is always written, even for an empty table.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use standings_ledger::domain::team::Team;
/// use standings_ledger::io::export::write_standings;
///
/// let teams = vec![Team::with_stats("X", 2, 1, 1, 0, 5, 3)];
/// let mut out = Vec::new();
/// write_standings(&mut out, &teams).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("Team,WIN,T W,"));
/// assert!(s.ends_with("X,2,6,1,2,0,0,1,5,3,2,8,1\n"));
/// ```
pub fn write_standings<W: Write>(writer: W, teams: &[Team]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for (i, team) in teams.iter().enumerate() {
        wtr.serialize(StandingRow::new(team, i + 1))?;
    }

    wtr.flush()?;
    Ok(())
}

use std::{
    fs::{self, File},
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use crate::{
    common::error::{LedgerError, LedgerResult},
    domain::team::Team,
};

/// Counter columns in persisted order, after the leading name column.
const COUNTER_COLUMNS: [&str; 6] = [
    "wins",
    "losses",
    "scored_draws",
    "no_score_draws",
    "goals_scored",
    "goals_against",
];

#[derive(serde::Serialize)]
/// One persisted line: `name,wins,losses,scored_draws,no_score_draws,goals_scored,goals_against`.
struct StoredRow<'a> {
    name: &'a str,
    wins: i32,
    losses: i32,
    scored_draws: i32,
    no_score_draws: i32,
    goals_scored: i32,
    goals_against: i32,
}

impl<'a> From<&'a Team> for StoredRow<'a> {
    fn from(team: &'a Team) -> Self {
        Self {
            name: team.name(),
            wins: team.wins(),
            losses: team.losses(),
            scored_draws: team.scored_draws(),
            no_score_draws: team.no_score_draws(),
            goals_scored: team.goals_scored(),
            goals_against: team.goals_against(),
        }
    }
}

/// CSV reader configured for the headerless ledger file.
///
/// Names are kept verbatim; counters are trimmed when parsed. Rows may be
/// short, and missing trailing columns read as zero.
pub fn reader_from<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::None)
        .flexible(true)
        .from_reader(rdr)
}

/// Reads teams from persisted ledger lines.
///
/// Empty or missing counters are treated as `0`. A counter that is present
/// but not an integer yields [`LedgerError::MalformedRow`] with the line
/// number and column name. Whitespace-only lines are skipped.
///
/// # Examples
///
/// ```
/// use standings_ledger::io::store::{read_teams, reader_from};
///
/// let data = "Arsenal,3,1,0,2,9,4\nChelsea,,,,,, \n";
/// let mut rdr = reader_from(data.as_bytes());
/// let teams: Vec<_> = read_teams(&mut rdr).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(teams[0].wins(), 3);
/// assert_eq!(teams[1].name(), "Chelsea");
/// assert_eq!(teams[1].matches_played(), 0);
/// ```
pub fn read_teams<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = LedgerResult<Team>> + '_ {
    rdr.records().filter_map(|res| match res {
        Ok(record) if record.iter().all(|f| f.trim().is_empty()) => None,
        Ok(record) => Some(team_from_record(&record)),
        Err(e) => Some(Err(LedgerError::Csv(e))),
    })
}

fn team_from_record(record: &csv::StringRecord) -> LedgerResult<Team> {
    let line = record.position().map_or(0, |p| p.line());
    let name = record.get(0).unwrap_or_default();

    let mut counters = [0i32; 6];
    for (i, (slot, field)) in counters.iter_mut().zip(COUNTER_COLUMNS).enumerate() {
        let raw = record.get(i + 1).unwrap_or_default();
        *slot = parse_counter(raw).ok_or_else(|| LedgerError::MalformedRow {
            line,
            field,
            value: raw.to_string(),
        })?;
    }

    let [wins, losses, scored_draws, no_score_draws, goals_scored, goals_against] = counters;
    Ok(Team::with_stats(
        name,
        wins,
        losses,
        scored_draws,
        no_score_draws,
        goals_scored,
        goals_against,
    ))
}

fn parse_counter(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

/// Writes one persisted line per team, in the given order, without a header.
pub fn write_teams<W: Write>(writer: W, teams: &[Team]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for team in teams {
        wtr.serialize(StoredRow::from(team))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Saves teams to `path` through a sibling temporary file and a rename, so
/// the target is either the old file or the complete new one.
pub fn save_to_path(path: &Path, teams: &[Team]) -> LedgerResult<()> {
    let temp_path = temp_path_for(path);

    let written = write_file(&temp_path, teams).and_then(|()| {
        fs::rename(&temp_path, path)?;
        Ok(())
    });
    if written.is_err() {
        // best effort; the write error is what the caller needs
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn write_file(path: &Path, teams: &[Team]) -> LedgerResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_teams(&mut writer, teams)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Loads every team from the ledger file at `path`.
pub fn load_from_path(path: &Path) -> LedgerResult<Vec<Team>> {
    let file = File::open(path)?;
    let mut rdr = reader_from(file);
    read_teams(&mut rdr).collect()
}

//! Division standings: per-team win/loss/draw records, a reversible history of
//! applied rounds, ranking, and the persisted and exported table formats.

pub mod common {
    pub mod error;
    pub mod event;
    pub mod outcome;
}

pub mod domain {
    pub mod ledger;
    pub mod ranking;
    pub mod team;
}

pub mod io {
    pub mod export;
    pub mod store;
}

pub use common::{
    error::{LedgerError, LedgerResult},
    event::{MatchBatch, MatchResult},
    outcome::OutcomeKind,
};
pub use domain::{
    ledger::{Standings, TeamRef},
    ranking::RankingRule,
    team::Team,
};

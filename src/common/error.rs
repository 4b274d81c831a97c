#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("team not found: {0}")]
    TeamNotFound(String),
    #[error("team index {index} out of range for {len} teams")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("malformed row at line {line}: field `{field}` has non-numeric value {value:?}")]
    MalformedRow {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

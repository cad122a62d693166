/// Domain-specific error types for the journal service.
/// Malformed trade records are skipped during aggregation, never fatal.
/// Only startup failures (config, fixtures) stop the process.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("invalid trade record: {0}")]
    InvalidRecord(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid month: {0}")]
    InvalidMonth(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("fixture error: {0}")]
    Fixture(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for JournalError {
    fn from(e: serde_json::Error) -> Self {
        JournalError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for JournalError {
    fn from(e: std::io::Error) -> Self {
        JournalError::Io(e.to_string())
    }
}

pub type JournalResult<T> = Result<T, JournalError>;

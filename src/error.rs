//! Error types for the poisoned chocolate client

use thiserror::Error;

/// Main error type for the chomp client
#[derive(Debug, Error)]
pub enum ChompError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },

    #[error("Invalid move: ({row}, {col}) is off the board or already eaten")]
    InvalidMove { row: usize, col: usize },

    #[error("The game has already been decided")]
    GameConcluded,

    #[error(
        "Invalid board size {rows}x{cols}: must be between {min_rows}x{min_cols} and {max_rows}x{max_cols}"
    )]
    InvalidBoardSize {
        rows: usize,
        cols: usize,
        min_rows: usize,
        min_cols: usize,
        max_rows: usize,
        max_cols: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Reasons a single protocol line could not be turned into a message.
///
/// Every variant is recoverable: the listener drops the offending line and
/// keeps reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty line")]
    Empty,

    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("message is not an array")]
    NotAnArray,

    #[error("message has no integer code")]
    MissingCode,

    #[error("unknown message code {0}")]
    UnknownCode(i64),

    #[error("code {code} expects {expected} fields, got {found}")]
    Arity {
        code: i64,
        expected: usize,
        found: usize,
    },

    #[error("code {code} has an invalid `{field}` field")]
    InvalidField { code: i64, field: &'static str },

    #[error("line exceeds the maximum frame length")]
    LineTooLong,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Type alias for the main result type used throughout the library
pub type ChompResult<T> = Result<T, ChompError>;

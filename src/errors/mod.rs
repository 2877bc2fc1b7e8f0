use anyhow::Context as _;
use thiserror::Error;

/// Failures of the scoring core. These are caller data or configuration
/// errors and are never transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Cannot compute {what} of an empty review set")]
    EmptyInput { what: &'static str },

    #[error("Invalid vote counts: helpful_yes={helpful_yes}, total_vote={total_vote}")]
    InvalidVoteCount { helpful_yes: i64, total_vote: i64 },

    #[error("Bucket weights must sum to 100, got {sum}")]
    InvalidWeight { sum: f64 },

    #[error("Confidence must be strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    #[error("Unparseable review date: {0:?}")]
    InvalidDate(String),
}

/// Add context to load errors
pub fn load_context(path: &str) -> String {
    format!("Failed to load reviews from: {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to row errors
pub fn row_context(row: usize) -> String {
    format!("Failed to parse review row {}", row)
}

/// Wrap result with load context
pub fn with_load_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(load_context(path))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

/// Wrap result with row context
pub fn with_row_context<T, E>(result: Result<T, E>, row: usize) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(row_context(row))
}

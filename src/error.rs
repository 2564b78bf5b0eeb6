//! Configuration errors
//!
//! Raised while building catalogs, timelines and patterns. These indicate a
//! data defect, never a runtime condition: the per-tick simulation itself is
//! total.

use thiserror::Error;

/// Errors raised when validating or instantiating engine data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("pattern `{name}`: {reason}")]
    InvalidPattern { name: String, reason: String },
    #[error("timeline entry {index} (tick {at}): unknown command `{cmd}`")]
    UnknownCommand { index: usize, at: u64, cmd: String },
    #[error("timeline entry {index} (tick {at}): `use` requires a pattern name")]
    MissingPatternName { index: usize, at: u64 },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error type for the io boundary.
//!
//! The analytics functions themselves never fail on data variance; errors
//! here cover what can genuinely go wrong around them: unreadable files
//! and malformed JSON exports.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeetmapError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

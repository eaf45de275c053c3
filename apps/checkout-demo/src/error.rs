//! # App Error Type
//!
//! Everything that can stop the demo run.
//!
//! ```text
//! CoreError (invalid item/rule arguments, unknown rule kind) ──┐
//! io::Error (rules file unreadable) ───────────────────────────┼──► AppError ──► main exits
//! serde_json::Error (rules file malformed) ────────────────────┘
//! ```

use std::path::PathBuf;

use checkout_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read rules file {path}: {source}")]
    ReadRules {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule records: {0}")]
    ParseRules(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

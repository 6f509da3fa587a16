//! Error types for the planner core.
//!
//! Every variant is recoverable. The store turns decode failures into a
//! reseed and persistence failures into a log line; only caller mistakes
//! (unknown ids, future birthdates) come back as `Err`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the task store and its persistence layer.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// An operation referenced a task id the store does not hold.
    #[error("Task {id} not found")]
    NotFound { id: Uuid },

    /// Persisted bytes under `key` could not be decoded.
    #[error("Could not decode saved entry '{key}': {source}")]
    DecodeFailure {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A birthdate after today was supplied.
    #[error("Birthdate {date} is in the future")]
    InvalidDate { date: NaiveDate },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

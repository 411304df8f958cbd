//! crates/logging/src/error.rs
//!
//! Error types for logger configuration and dispatch.

use thiserror::Error;

use crate::registry::SinkId;

/// Result type for logger operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors reported by the logger. None of them are fatal; a failed call
/// leaves the logger unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum LogError {
    /// An argument was outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Every sink slot is in use.
    #[error("sink registry is full ({capacity} slots)")]
    Full {
        /// Fixed number of slots.
        capacity: usize,
    },
    /// No sink is registered under the id.
    #[error("no sink registered as {0}")]
    InvalidId(SinkId),
    /// The process-wide logger is already in use on this thread.
    #[error("logger is busy")]
    Busy,
}

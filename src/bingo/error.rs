//! Error types for the bingo core.

use thiserror::Error;

/// Errors raised by the board manager and presenter sequencer.
#[derive(Debug, Error)]
pub enum BingoError {
    /// The pool is missing or too small for the component that needs it.
    /// The component is disabled and the message is shown in its place.
    #[error("{component} unavailable: {reason}")]
    Configuration {
        component: &'static str,
        reason: String,
    },

    /// A programmatic board update had the wrong shape. Nothing was applied.
    #[error("invalid board data: {reason}")]
    InvalidShape { reason: String },

    /// A cell index outside the 25-cell grid.
    #[error("cell index {index} is out of range (expected 0..25)")]
    OutOfRange { index: usize },

    /// A persisted record could not be decoded. Callers recover from this by
    /// falling back to the default state.
    #[error("persisted state '{key}' is unreadable: {reason}")]
    PersistenceParse { key: String, reason: String },
}

/// Errors from a [`StateStore`](super::store::StateStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

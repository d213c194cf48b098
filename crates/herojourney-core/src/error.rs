//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The content catalog could not be read or parsed.
    #[error("content load error: {0}")]
    ContentLoad(String),

    /// The caller asked for a node that cannot be played.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A save slot number outside the configured range.
    #[error("invalid save slot: {0}")]
    InvalidSlot(u32),

    /// No save exists in the requested slot.
    #[error("no save found in slot {0}")]
    SlotNotFound(u32),

    /// A save could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),
}

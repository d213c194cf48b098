//! Hero Journey: driver error types.

use herojourney_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the headless driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable or argument is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The engine refused an operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Terminal or filesystem I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error. Configuration problems exit with
    /// 2, missing saves with 3, everything else with 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Domain(DomainError::InvalidSlot(_)) => 2,
            AppError::Domain(DomainError::Validation(msg)) if msg.contains("HEROJOURNEY_") => 2,
            AppError::Domain(DomainError::SlotNotFound(_)) => 3,
            AppError::Domain(_) | AppError::Io(_) => 1,
        }
    }
}

//! Save repository abstraction.

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Stored representation of one save slot.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSave {
    /// Slot number; slot 0 is the autosave.
    pub slot: u32,
    /// Human-readable save name.
    pub name: String,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Serialized save bundle.
    pub payload: serde_json::Value,
}

/// Repository trait for reading and writing save slots.
///
/// Implementations are synchronous; every call either completes or returns
/// an error, with no partial results.
pub trait SaveRepository: Send + Sync {
    /// Load the save in `slot`, or `None` if the slot is empty.
    fn load(&self, slot: u32) -> Result<Option<StoredSave>, DomainError>;

    /// Write `save` into its slot, replacing any previous content.
    fn store(&self, save: &StoredSave) -> Result<(), DomainError>;

    /// Delete the save in `slot`. Returns whether anything was removed.
    fn delete(&self, slot: u32) -> Result<bool, DomainError>;

    /// Returns the occupied slot numbers in ascending order.
    fn slots(&self) -> Result<Vec<u32>, DomainError>;
}

//! Commands for the Session context.

/// Slot reserved for automatic saves.
pub const AUTOSAVE_SLOT: u32 = 0;
/// Name given to automatic saves.
pub const AUTOSAVE_NAME: &str = "AutoSave";

/// Command to save the running playthrough into a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveGame {
    /// Target slot.
    pub slot: u32,
    /// Save name; a dated default is used when absent.
    pub name: Option<String>,
}

/// Command to resume the playthrough stored in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGame {
    /// Slot to read.
    pub slot: u32,
}

/// Command to clear a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSave {
    /// Slot to clear.
    pub slot: u32,
}

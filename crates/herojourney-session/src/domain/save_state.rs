//! Serializable snapshot of a playthrough.

use herojourney_character::domain::stats::StatBlock;
use herojourney_narrative::domain::history::ChoiceRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::playthrough::Phase;

/// Current save layout version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Everything needed to resume a playthrough. Slot, name, and timestamp
/// travel alongside it in the stored save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    /// Layout version; restore rejects anything but `SAVE_FORMAT_VERSION`.
    pub version: u32,
    /// Stable id of the run, kept across save and load.
    pub playthrough_id: Uuid,
    /// Background the hero started from.
    pub background_id: String,
    /// Hero stats at the time of the snapshot.
    pub stats: StatBlock,
    /// Last round started; zero before the first.
    pub round: u32,
    /// Round after which the final confrontation opens.
    pub horizon: u32,
    /// Lifecycle phase of the run.
    pub phase: Phase,
    /// Node ids that may be offered, sorted.
    pub available: Vec<String>,
    /// Node ids waiting for an unlock, sorted.
    pub locked: Vec<String>,
    /// Node ids that have been played at least once, sorted.
    pub completed: Vec<String>,
    /// Every resolved choice, oldest first.
    pub history: Vec<ChoiceRecord>,
    /// Fingerprint of the catalog the playthrough ran against.
    pub catalog_fingerprint: String,
    /// Accumulated play time across sessions.
    pub total_play_time_secs: u64,
}

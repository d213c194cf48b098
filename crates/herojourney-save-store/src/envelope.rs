//! On-disk layout of one save slot.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use herojourney_core::repository::StoredSave;
use serde::{Deserialize, Serialize};

/// File name prefix for slot documents.
pub const SLOT_FILE_PREFIX: &str = "save_slot_";
/// File extension for slot documents.
pub const SLOT_FILE_EXTENSION: &str = "json";

/// The JSON document written for each slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    pub slot: u32,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl From<&StoredSave> for SaveEnvelope {
    fn from(save: &StoredSave) -> Self {
        Self {
            slot: save.slot,
            name: save.name.clone(),
            saved_at: save.saved_at,
            payload: save.payload.clone(),
        }
    }
}

impl From<SaveEnvelope> for StoredSave {
    fn from(envelope: SaveEnvelope) -> Self {
        Self {
            slot: envelope.slot,
            name: envelope.name,
            saved_at: envelope.saved_at,
            payload: envelope.payload,
        }
    }
}

/// Path of the document for `slot` under `dir`.
#[must_use]
pub fn slot_path(dir: &Path, slot: u32) -> PathBuf {
    dir.join(format!("{SLOT_FILE_PREFIX}{slot}.{SLOT_FILE_EXTENSION}"))
}

/// Parses a slot number back out of a document file name.
#[must_use]
pub fn slot_from_file_name(name: &str) -> Option<u32> {
    name.strip_prefix(SLOT_FILE_PREFIX)?
        .strip_suffix(SLOT_FILE_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_path_and_parse_agree() {
        let path = slot_path(Path::new("saves"), 7);
        assert_eq!(path, PathBuf::from("saves/save_slot_7.json"));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert_eq!(slot_from_file_name(name), Some(7));
    }

    #[test]
    fn test_foreign_file_names_are_ignored() {
        assert_eq!(slot_from_file_name("save_slot_x.json"), None);
        assert_eq!(slot_from_file_name("save_slot_3.json.tmp"), None);
        assert_eq!(slot_from_file_name("notes.txt"), None);
        assert_eq!(slot_from_file_name("save_slot_-1.json"), None);
    }

    #[test]
    fn test_envelope_uses_camel_case_keys() {
        let envelope = SaveEnvelope {
            slot: 0,
            name: "AutoSave".into(),
            saved_at: DateTime::from_timestamp(0, 0).unwrap(),
            payload: serde_json::json!({"round": 3}),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["savedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["payload"]["round"], 3);
    }
}

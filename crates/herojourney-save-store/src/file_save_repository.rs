//! Filesystem implementation of the `SaveRepository` trait.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use herojourney_core::error::DomainError;
use herojourney_core::repository::{SaveRepository, StoredSave};
use tracing::{debug, warn};

use crate::envelope::{SaveEnvelope, slot_from_file_name, slot_path};

/// Save repository writing one JSON document per slot into a directory.
///
/// Writes go to a sibling temp file which is then renamed over the slot
/// document, so a crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    dir: PathBuf,
}

impl FileSaveRepository {
    /// Creates a repository rooted at `dir`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn persistence(action: &str, path: &Path, e: impl std::fmt::Display) -> DomainError {
    DomainError::Persistence(format!("failed to {action} {}: {e}", path.display()))
}

fn write_synced(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(body)?;
    file.sync_all()
}

/// Removes a half-written temp file after a failed store.
fn discard_temp(tmp: &Path) {
    match fs::remove_file(tmp) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            warn!(path = %tmp.display(), error = %e, "could not remove temporary save file");
        }
        _ => {}
    }
}

impl SaveRepository for FileSaveRepository {
    fn load(&self, slot: u32) -> Result<Option<StoredSave>, DomainError> {
        let path = slot_path(&self.dir, slot);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(persistence("read", &path, e)),
        };
        let envelope: SaveEnvelope =
            serde_json::from_str(&text).map_err(|e| persistence("parse", &path, e))?;
        if envelope.slot != slot {
            warn!(
                path = %path.display(),
                recorded = envelope.slot,
                slot,
                "slot number inside save file disagrees with its name"
            );
        }
        let mut save = StoredSave::from(envelope);
        save.slot = slot;
        Ok(Some(save))
    }

    fn store(&self, save: &StoredSave) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir).map_err(|e| persistence("create", &self.dir, e))?;

        let path = slot_path(&self.dir, save.slot);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&SaveEnvelope::from(save))
            .map_err(|e| persistence("serialize", &path, e))?;

        let written = write_synced(&tmp, &body)
            .map_err(|e| persistence("write", &tmp, e))
            .and_then(|()| fs::rename(&tmp, &path).map_err(|e| persistence("replace", &path, e)));
        if let Err(e) = written {
            discard_temp(&tmp);
            return Err(e);
        }

        debug!(path = %path.display(), bytes = body.len(), "save slot written");
        Ok(())
    }

    fn delete(&self, slot: u32) -> Result<bool, DomainError> {
        let path = slot_path(&self.dir, slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(persistence("delete", &path, e)),
        }
    }

    fn slots(&self) -> Result<Vec<u32>, DomainError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence("list", &self.dir, e)),
        };

        let mut slots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| persistence("list", &self.dir, e))?;
            if let Some(slot) = entry.file_name().to_str().and_then(slot_from_file_name) {
                slots.push(slot);
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

//! Test repositories: mock `SaveRepository` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use herojourney_core::error::DomainError;
use herojourney_core::repository::{SaveRepository, StoredSave};

/// A save repository backed by a map. Behaves like a real store and lets
/// tests inspect what was written.
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    saves: Mutex<BTreeMap<u32, StoredSave>>,
}

impl InMemorySaveRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored save, in slot order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Vec<StoredSave> {
        self.saves.lock().unwrap().values().cloned().collect()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn load(&self, slot: u32) -> Result<Option<StoredSave>, DomainError> {
        Ok(self.saves.lock().unwrap().get(&slot).cloned())
    }

    fn store(&self, save: &StoredSave) -> Result<(), DomainError> {
        self.saves.lock().unwrap().insert(save.slot, save.clone());
        Ok(())
    }

    fn delete(&self, slot: u32) -> Result<bool, DomainError> {
        Ok(self.saves.lock().unwrap().remove(&slot).is_some())
    }

    fn slots(&self) -> Result<Vec<u32>, DomainError> {
        Ok(self.saves.lock().unwrap().keys().copied().collect())
    }
}

/// A save repository with nothing in it that silently accepts writes.
/// Useful for testing "slot not found" scenarios.
#[derive(Debug)]
pub struct EmptySaveRepository;

impl SaveRepository for EmptySaveRepository {
    fn load(&self, _slot: u32) -> Result<Option<StoredSave>, DomainError> {
        Ok(None)
    }

    fn store(&self, _save: &StoredSave) -> Result<(), DomainError> {
        Ok(())
    }

    fn delete(&self, _slot: u32) -> Result<bool, DomainError> {
        Ok(false)
    }

    fn slots(&self) -> Result<Vec<u32>, DomainError> {
        Ok(vec![])
    }
}

/// A save repository that always returns a persistence error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingSaveRepository;

impl SaveRepository for FailingSaveRepository {
    fn load(&self, _slot: u32) -> Result<Option<StoredSave>, DomainError> {
        Err(DomainError::Persistence("disk unavailable".into()))
    }

    fn store(&self, _save: &StoredSave) -> Result<(), DomainError> {
        Err(DomainError::Persistence("disk unavailable".into()))
    }

    fn delete(&self, _slot: u32) -> Result<bool, DomainError> {
        Err(DomainError::Persistence("disk unavailable".into()))
    }

    fn slots(&self) -> Result<Vec<u32>, DomainError> {
        Err(DomainError::Persistence("disk unavailable".into()))
    }
}

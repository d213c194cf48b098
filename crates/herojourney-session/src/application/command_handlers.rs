//! Command handlers for the Session context.
//!
//! Each handler validates the slot, moves a playthrough snapshot between
//! the domain and the save repository, and stamps saves with the injected
//! clock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use herojourney_content::domain::catalog::ContentCatalog;
use herojourney_core::clock::Clock;
use herojourney_core::config::EngineConfig;
use herojourney_core::error::DomainError;
use herojourney_core::repository::{SaveRepository, StoredSave};
use herojourney_core::rng::DeterministicRng;
use tracing::{info, instrument};

use crate::domain::commands::{AUTOSAVE_NAME, AUTOSAVE_SLOT, DeleteSave, LoadGame, SaveGame};
use crate::domain::playthrough::Playthrough;
use crate::domain::save_state::SaveState;

/// Rejects slots outside `0..=max_save_slots`.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlot` for an out-of-range slot.
pub fn validate_slot(slot: u32, config: &EngineConfig) -> Result<(), DomainError> {
    if slot > config.max_save_slots {
        return Err(DomainError::InvalidSlot(slot));
    }
    Ok(())
}

/// Name used when a manual save is not given one, e.g.
/// `Save Mar 01, 2025 12:00`.
#[must_use]
pub fn default_save_name(at: DateTime<Utc>) -> String {
    format!("Save {}", at.format("%b %d, %Y %H:%M"))
}

/// Handles the `SaveGame` command: snapshots the playthrough and writes it
/// to the slot, replacing what was there.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlot` for an out-of-range slot, or
/// `DomainError::Persistence` if serialization or the write fails.
#[instrument(skip_all, fields(slot = command.slot, playthrough_id = %playthrough.id()))]
pub fn handle_save_game(
    command: &SaveGame,
    playthrough: &Playthrough,
    config: &EngineConfig,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<StoredSave, DomainError> {
    validate_slot(command.slot, config)?;

    let now = clock.now();
    let state = playthrough.snapshot(now);
    let payload = serde_json::to_value(&state)
        .map_err(|e| DomainError::Persistence(format!("save serialization failed: {e}")))?;

    let save = StoredSave {
        slot: command.slot,
        name: command
            .name
            .clone()
            .unwrap_or_else(|| default_save_name(now)),
        saved_at: now,
        payload,
    };
    repo.store(&save)?;

    info!(name = %save.name, round = state.round, "game saved");
    Ok(save)
}

/// Saves into the autosave slot under the autosave name.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the write fails.
pub fn handle_autosave(
    playthrough: &Playthrough,
    config: &EngineConfig,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<StoredSave, DomainError> {
    let command = SaveGame {
        slot: AUTOSAVE_SLOT,
        name: Some(AUTOSAVE_NAME.to_owned()),
    };
    handle_save_game(&command, playthrough, config, clock, repo)
}

/// Handles the `LoadGame` command: reads the slot and resumes the
/// playthrough against `catalog`.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlot` for an out-of-range slot,
/// `DomainError::SlotNotFound` if the slot is empty,
/// `DomainError::Persistence` if the save cannot be read or decoded, and
/// `DomainError::Validation` if the snapshot cannot be restored.
#[instrument(skip_all, fields(slot = command.slot))]
pub fn handle_load_game(
    command: &LoadGame,
    catalog: Arc<ContentCatalog>,
    config: &EngineConfig,
    rng: Box<dyn DeterministicRng>,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<Playthrough, DomainError> {
    validate_slot(command.slot, config)?;

    let stored = repo
        .load(command.slot)?
        .ok_or(DomainError::SlotNotFound(command.slot))?;
    let state: SaveState = serde_json::from_value(stored.payload).map_err(|e| {
        DomainError::Persistence(format!("save in slot {} is corrupt: {e}", command.slot))
    })?;

    let playthrough = Playthrough::restore(
        state,
        catalog,
        config.stat_delta_policy,
        rng,
        clock.now(),
    )?;
    info!(name = %stored.name, round = playthrough.round(), "game loaded");
    Ok(playthrough)
}

/// Handles the `DeleteSave` command. Returns whether a save was removed.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlot` for an out-of-range slot, or
/// `DomainError::Persistence` if the delete fails.
#[instrument(skip_all, fields(slot = command.slot))]
pub fn handle_delete_save(
    command: &DeleteSave,
    config: &EngineConfig,
    repo: &dyn SaveRepository,
) -> Result<bool, DomainError> {
    validate_slot(command.slot, config)?;
    let removed = repo.delete(command.slot)?;
    info!(removed, "save deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use herojourney_core::config::StatDeltaPolicy;
    use herojourney_test_support::fixtures::varied_catalog;
    use herojourney_test_support::{
        EmptySaveRepository, FailingSaveRepository, FixedClock, InMemorySaveRepository, MockRng,
    };

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 12, 5, 0).unwrap())
    }

    fn playthrough() -> Playthrough {
        let mut playthrough = Playthrough::new(
            varied_catalog(),
            &EngineConfig::default(),
            Some("child_soldier"),
            Box::new(MockRng),
            clock().0,
        );
        playthrough.start_round().unwrap();
        playthrough.make_choice("combat_1").unwrap();
        playthrough
    }

    #[test]
    fn test_default_save_name_format() {
        assert_eq!(default_save_name(clock().0), "Save Mar 01, 2025 12:05");
    }

    #[test]
    fn test_save_then_load_restores_playthrough() {
        let repo = InMemorySaveRepository::new();
        let config = EngineConfig::default();
        let original = playthrough();

        let saved = handle_save_game(
            &SaveGame {
                slot: 3,
                name: Some("Before the dragon".into()),
            },
            &original,
            &config,
            &clock(),
            &repo,
        )
        .unwrap();
        assert_eq!(saved.name, "Before the dragon");
        assert_eq!(saved.saved_at, clock().0);

        let loaded = handle_load_game(
            &LoadGame { slot: 3 },
            varied_catalog(),
            &config,
            Box::new(MockRng),
            &clock(),
            &repo,
        )
        .unwrap();
        assert_eq!(loaded.snapshot(clock().0), original.snapshot(clock().0));
        assert_eq!(loaded.background_id(), "child_soldier");
    }

    #[test]
    fn test_save_without_name_uses_dated_default() {
        let repo = InMemorySaveRepository::new();
        let saved = handle_save_game(
            &SaveGame {
                slot: 1,
                name: None,
            },
            &playthrough(),
            &EngineConfig::default(),
            &clock(),
            &repo,
        )
        .unwrap();
        assert_eq!(saved.name, "Save Mar 01, 2025 12:05");
    }

    #[test]
    fn test_autosave_uses_slot_zero() {
        let repo = InMemorySaveRepository::new();
        handle_autosave(&playthrough(), &EngineConfig::default(), &clock(), &repo).unwrap();
        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].slot, AUTOSAVE_SLOT);
        assert_eq!(stored[0].name, AUTOSAVE_NAME);
    }

    #[test]
    fn test_out_of_range_slot_is_rejected() {
        let repo = InMemorySaveRepository::new();
        let config = EngineConfig {
            max_save_slots: 10,
            ..EngineConfig::default()
        };
        let result = handle_save_game(
            &SaveGame {
                slot: 11,
                name: None,
            },
            &playthrough(),
            &config,
            &clock(),
            &repo,
        );
        assert!(matches!(result, Err(DomainError::InvalidSlot(11))));
        assert!(repo.stored().is_empty());
        assert!(matches!(
            handle_delete_save(&DeleteSave { slot: 42 }, &config, &repo),
            Err(DomainError::InvalidSlot(42))
        ));
    }

    #[test]
    fn test_load_empty_slot_is_slot_not_found() {
        let result = handle_load_game(
            &LoadGame { slot: 2 },
            varied_catalog(),
            &EngineConfig::default(),
            Box::new(MockRng),
            &clock(),
            &EmptySaveRepository,
        );
        match result {
            Err(DomainError::SlotNotFound(2)) => {}
            other => panic!("expected SlotNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_payload_is_persistence_error() {
        let repo = InMemorySaveRepository::new();
        repo.store(&StoredSave {
            slot: 4,
            name: "broken".into(),
            saved_at: clock().0,
            payload: serde_json::json!({"stats": "nope"}),
        })
        .unwrap();

        let result = handle_load_game(
            &LoadGame { slot: 4 },
            varied_catalog(),
            &EngineConfig::default(),
            Box::new(MockRng),
            &clock(),
            &repo,
        );
        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[test]
    fn test_repository_failure_propagates() {
        let result = handle_autosave(
            &playthrough(),
            &EngineConfig::default(),
            &clock(),
            &FailingSaveRepository,
        );
        match result {
            Err(DomainError::Persistence(msg)) => assert_eq!(msg, "disk unavailable"),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_reports_whether_anything_was_removed() {
        let repo = InMemorySaveRepository::new();
        let config = EngineConfig::default();
        handle_autosave(&playthrough(), &config, &clock(), &repo).unwrap();

        assert!(handle_delete_save(&DeleteSave { slot: 0 }, &config, &repo).unwrap());
        assert!(!handle_delete_save(&DeleteSave { slot: 0 }, &config, &repo).unwrap());
    }

    #[test]
    fn test_loaded_playthrough_uses_configured_policy() {
        let repo = InMemorySaveRepository::new();
        let config = EngineConfig {
            stat_delta_policy: StatDeltaPolicy::Always,
            ..EngineConfig::default()
        };
        handle_autosave(&playthrough(), &config, &clock(), &repo).unwrap();
        let loaded = handle_load_game(
            &LoadGame { slot: 0 },
            varied_catalog(),
            &config,
            Box::new(MockRng),
            &clock(),
            &repo,
        )
        .unwrap();
        assert_eq!(loaded.round(), 1);
        assert_eq!(loaded.history().len(), 1);
    }
}

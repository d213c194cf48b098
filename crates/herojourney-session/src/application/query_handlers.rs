//! Query handlers for the Session context.

use chrono::{DateTime, Utc};
use herojourney_character::domain::backgrounds::background_by_id;
use herojourney_core::error::DomainError;
use herojourney_core::repository::{SaveRepository, StoredSave};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::save_state::SaveState;

/// What the slot picker shows for one save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveSummary {
    /// Slot number; 0 is the autosave.
    pub slot: u32,
    /// Player-given or generated save name.
    pub name: String,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Run the save belongs to.
    pub playthrough_id: Uuid,
    /// Last round started when the save was taken.
    pub round: u32,
    /// Round after which the final confrontation opens.
    pub horizon: u32,
    /// Mean of the six power stats.
    pub hero_level: i32,
    /// Display name of the background, or its raw id when unknown.
    pub background_name: String,
    /// Accumulated play time across sessions.
    pub total_play_time_secs: u64,
}

impl SaveSummary {
    fn from_stored(save: StoredSave) -> Result<Self, serde_json::Error> {
        let state: SaveState = serde_json::from_value(save.payload)?;
        let background_name = background_by_id(&state.background_id)
            .map_or_else(|| state.background_id.clone(), |b| b.name.to_owned());
        Ok(Self {
            slot: save.slot,
            name: save.name,
            saved_at: save.saved_at,
            playthrough_id: state.playthrough_id,
            round: state.round,
            horizon: state.horizon,
            hero_level: state.stats.hero_level(),
            background_name,
            total_play_time_secs: state.total_play_time_secs,
        })
    }
}

/// Lists every readable save, newest first. Slots holding a save that
/// cannot be decoded are skipped with a warning.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the repository fails.
pub fn list_saves(repo: &dyn SaveRepository) -> Result<Vec<SaveSummary>, DomainError> {
    let mut summaries = Vec::new();
    for slot in repo.slots()? {
        let Some(save) = repo.load(slot)? else {
            continue;
        };
        match SaveSummary::from_stored(save) {
            Ok(summary) => summaries.push(summary),
            Err(e) => warn!(slot, error = %e, "skipping unreadable save"),
        }
    }
    summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then(a.slot.cmp(&b.slot)));
    Ok(summaries)
}

/// Returns whether `slot` holds a save.
///
/// # Errors
///
/// Returns `DomainError::Persistence` if the repository fails.
pub fn has_save(slot: u32, repo: &dyn SaveRepository) -> Result<bool, DomainError> {
    Ok(repo.load(slot)?.is_some())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use herojourney_core::config::EngineConfig;
    use herojourney_test_support::fixtures::varied_catalog;
    use herojourney_test_support::{
        EmptySaveRepository, FailingSaveRepository, FixedClock, InMemorySaveRepository, MockRng,
    };

    use super::*;
    use crate::application::command_handlers::handle_save_game;
    use crate::domain::commands::SaveGame;
    use crate::domain::playthrough::Playthrough;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn save_at(repo: &InMemorySaveRepository, slot: u32, minutes: i64) {
        let now = base_time() + TimeDelta::minutes(minutes);
        let playthrough = Playthrough::new(
            varied_catalog(),
            &EngineConfig::default(),
            Some("child_of_noble"),
            Box::new(MockRng),
            base_time(),
        );
        handle_save_game(
            &SaveGame {
                slot,
                name: Some(format!("slot {slot}")),
            },
            &playthrough,
            &EngineConfig::default(),
            &FixedClock(now),
            repo,
        )
        .unwrap();
    }

    #[test]
    fn test_list_saves_newest_first() {
        let repo = InMemorySaveRepository::new();
        save_at(&repo, 1, 0);
        save_at(&repo, 2, 30);
        save_at(&repo, 3, 10);

        let slots: Vec<u32> = list_saves(&repo).unwrap().iter().map(|s| s.slot).collect();
        assert_eq!(slots, vec![2, 3, 1]);
    }

    #[test]
    fn test_summary_describes_the_hero() {
        let repo = InMemorySaveRepository::new();
        save_at(&repo, 5, 90);

        let summaries = list_saves(&repo).unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.name, "slot 5");
        assert_eq!(summary.round, 0);
        assert_eq!(summary.horizon, 24);
        assert_eq!(summary.total_play_time_secs, 90 * 60);
        assert_eq!(
            summary.background_name,
            background_by_id("child_of_noble").unwrap().name
        );
    }

    #[test]
    fn test_unreadable_saves_are_skipped() {
        let repo = InMemorySaveRepository::new();
        save_at(&repo, 1, 0);
        repo.store(&StoredSave {
            slot: 2,
            name: "garbage".into(),
            saved_at: base_time(),
            payload: serde_json::json!([1, 2, 3]),
        })
        .unwrap();

        let summaries = list_saves(&repo).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].slot, 1);
    }

    #[test]
    fn test_has_save() {
        let repo = InMemorySaveRepository::new();
        save_at(&repo, 4, 0);
        assert!(has_save(4, &repo).unwrap());
        assert!(!has_save(5, &repo).unwrap());
        assert!(!has_save(4, &EmptySaveRepository).unwrap());
    }

    #[test]
    fn test_repository_failure_propagates() {
        assert!(matches!(
            list_saves(&FailingSaveRepository),
            Err(DomainError::Persistence(_))
        ));
    }
}

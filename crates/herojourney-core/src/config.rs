//! Engine configuration.
//!
//! Values come from environment variables with sensible defaults. Parsing is
//! routed through a lookup function so tests never touch the process
//! environment.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Environment variable for the round horizon.
pub const HORIZON_VAR: &str = "HEROJOURNEY_HORIZON";
/// Environment variable for the content catalog path.
pub const CONTENT_PATH_VAR: &str = "HEROJOURNEY_CONTENT_PATH";
/// Environment variable for the save directory.
pub const SAVE_DIR_VAR: &str = "HEROJOURNEY_SAVE_DIR";
/// Environment variable for the highest manual save slot.
pub const MAX_SAVE_SLOTS_VAR: &str = "HEROJOURNEY_MAX_SAVE_SLOTS";
/// Environment variable for the catalog cache lifetime in seconds.
pub const CATALOG_TTL_VAR: &str = "HEROJOURNEY_CATALOG_TTL_SECS";
/// Environment variable for the stat delta policy.
pub const STAT_DELTA_POLICY_VAR: &str = "HEROJOURNEY_STAT_DELTA_POLICY";

/// When an outcome's named stat deltas are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatDeltaPolicy {
    /// Only when the resolved outcome passed a stat check.
    #[default]
    OnCheckPassed,
    /// Every time the outcome is applied.
    Always,
}

impl FromStr for StatDeltaPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_check_passed" => Ok(Self::OnCheckPassed),
            "always" => Ok(Self::Always),
            other => Err(DomainError::Validation(format!(
                "{STAT_DELTA_POLICY_VAR} must be 'on_check_passed' or 'always', got '{other}'"
            ))),
        }
    }
}

/// Runtime configuration for a playthrough session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of rounds before the final confrontation.
    pub horizon: u32,
    /// Path of the content catalog document.
    pub content_path: PathBuf,
    /// Directory holding save slot files.
    pub save_dir: PathBuf,
    /// Highest manual save slot number (slot 0 is the autosave).
    pub max_save_slots: u32,
    /// Catalog cache lifetime in seconds; 0 disables caching.
    pub catalog_ttl_secs: u64,
    /// When outcome stat deltas apply.
    pub stat_delta_policy: StatDeltaPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon: 24,
            content_path: PathBuf::from("assets/story_nodes.json"),
            save_dir: PathBuf::from("saves"),
            max_save_slots: 10,
            catalog_ttl_secs: 300,
            stat_delta_policy: StatDeltaPolicy::OnCheckPassed,
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a value is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let horizon = parse_or(&lookup, HORIZON_VAR, defaults.horizon)?;
        if horizon == 0 {
            return Err(DomainError::Validation(format!(
                "{HORIZON_VAR} must be at least 1"
            )));
        }

        Ok(Self {
            horizon,
            content_path: lookup(CONTENT_PATH_VAR).map_or(defaults.content_path, PathBuf::from),
            save_dir: lookup(SAVE_DIR_VAR).map_or(defaults.save_dir, PathBuf::from),
            max_save_slots: parse_or(&lookup, MAX_SAVE_SLOTS_VAR, defaults.max_save_slots)?,
            catalog_ttl_secs: parse_or(&lookup, CATALOG_TTL_VAR, defaults.catalog_ttl_secs)?,
            stat_delta_policy: match lookup(STAT_DELTA_POLICY_VAR) {
                Some(raw) => raw.parse()?,
                None => defaults.stat_delta_policy,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, DomainError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DomainError::Validation(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_with_nothing_set_returns_defaults() {
        let config = EngineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.horizon, 24);
        assert_eq!(config.catalog_ttl_secs, 300);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (HORIZON_VAR, "20"),
            (CONTENT_PATH_VAR, "content/nodes.yaml"),
            (SAVE_DIR_VAR, "/tmp/saves"),
            (MAX_SAVE_SLOTS_VAR, "5"),
            (CATALOG_TTL_VAR, "0"),
            (STAT_DELTA_POLICY_VAR, "always"),
        ]))
        .unwrap();

        assert_eq!(config.horizon, 20);
        assert_eq!(config.content_path, PathBuf::from("content/nodes.yaml"));
        assert_eq!(config.save_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(config.max_save_slots, 5);
        assert_eq!(config.catalog_ttl_secs, 0);
        assert_eq!(config.stat_delta_policy, StatDeltaPolicy::Always);
    }

    #[test]
    fn test_from_lookup_rejects_non_numeric_horizon() {
        let result = EngineConfig::from_lookup(lookup_from(&[(HORIZON_VAR, "two years")]));
        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains(HORIZON_VAR)),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_from_lookup_rejects_zero_horizon() {
        let result = EngineConfig::from_lookup(lookup_from(&[(HORIZON_VAR, "0")]));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_unknown_stat_delta_policy_is_rejected() {
        let result = EngineConfig::from_lookup(lookup_from(&[(STAT_DELTA_POLICY_VAR, "sometimes")]));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}

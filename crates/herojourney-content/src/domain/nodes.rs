//! Story nodes and their outcomes.

use std::collections::BTreeMap;

use herojourney_character::domain::stats::{StatBlock, StatType};
use serde::{Deserialize, Serialize};

/// Challenge tier of an outcome. Each tier carries the bonus granted to the
/// stat whose check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DifficultyTier {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
    #[serde(alias = "extreme")]
    Extreme,
}

impl DifficultyTier {
    /// All tiers from easiest to hardest.
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Extreme,
    ];

    /// Bonus added to the passed stat.
    #[must_use]
    pub fn bonus(self) -> i32 {
        match self {
            DifficultyTier::Easy => 3,
            DifficultyTier::Medium => 5,
            DifficultyTier::Hard => 8,
            DifficultyTier::Extreme => 12,
        }
    }
}

/// Minimum effective stats an outcome requires. Zero means no requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatRequirements {
    pub min_martial: i32,
    pub min_equipment: i32,
    pub min_social: i32,
    pub min_financial: i32,
    pub min_nobility: i32,
    pub min_magical: i32,
}

impl StatRequirements {
    /// The minimum for `stat`; non-positive values mean no requirement.
    #[must_use]
    pub fn minimum(&self, stat: StatType) -> i32 {
        match stat {
            StatType::Martial => self.min_martial,
            StatType::Equipment => self.min_equipment,
            StatType::Social => self.min_social,
            StatType::Financial => self.min_financial,
            StatType::Nobility => self.min_nobility,
            StatType::Magical => self.min_magical,
        }
    }

    /// Returns a copy with `stat` requiring at least `minimum`.
    #[must_use]
    pub fn with(mut self, stat: StatType, minimum: i32) -> Self {
        let slot = match stat {
            StatType::Martial => &mut self.min_martial,
            StatType::Equipment => &mut self.min_equipment,
            StatType::Social => &mut self.min_social,
            StatType::Financial => &mut self.min_financial,
            StatType::Nobility => &mut self.min_nobility,
            StatType::Magical => &mut self.min_magical,
        };
        *slot = minimum;
        self
    }

    /// Requirements with a positive minimum, in stat declaration order.
    pub fn positive(&self) -> impl Iterator<Item = (StatType, i32)> + '_ {
        StatType::ALL
            .into_iter()
            .map(|stat| (stat, self.minimum(stat)))
            .filter(|(_, min)| *min > 0)
    }

    /// True when nothing is required.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.positive().next().is_none()
    }

    /// True when every requirement is met by the hero's effective stats.
    #[must_use]
    pub fn is_satisfied_by(&self, stats: &StatBlock) -> bool {
        self.positive()
            .all(|(stat, min)| stats.effective_stat(stat) >= min)
    }
}

/// What applying an outcome does to the hero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeEffects {
    #[serde(default)]
    pub motivation_change: i32,
    #[serde(default, rename = "insanityChange", alias = "madnessChange")]
    pub madness_change: i32,
    #[serde(default)]
    pub insight_change: i32,
    /// Named power-stat deltas, keyed by stat name.
    #[serde(default)]
    pub stat_changes: BTreeMap<String, i32>,
    /// Narrative text shown after the outcome resolves.
    pub result_text: String,
}

/// One resolution branch of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub description: String,
    pub requirements: StatRequirements,
    pub effects: OutcomeEffects,
    pub unlocks_nodes: Vec<String>,
    pub locks_nodes: Vec<String>,
    /// Lower values are evaluated first.
    pub priority: i32,
    pub difficulty: DifficultyTier,
}

/// A discrete story event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-form tag used to diversify each round's slate.
    pub category: String,
    /// Starts in the locked set instead of the available set.
    pub initially_locked: bool,
    /// Returns to the available set after completion. One-shot nodes set
    /// this to false and retire once played.
    pub repeatable: bool,
    pub outcomes: Vec<Outcome>,
}

impl ContentNode {
    /// True when some outcome has no requirements, so resolution always has
    /// a legitimate match.
    #[must_use]
    pub fn has_catch_all(&self) -> bool {
        self.outcomes.iter().any(|o| o.requirements.is_catch_all())
    }

    /// True when every outcome's tier is in `allowed`.
    #[must_use]
    pub fn fits_tiers(&self, allowed: &[DifficultyTier]) -> bool {
        self.outcomes.iter().all(|o| allowed.contains(&o.difficulty))
    }
}

//! Hero background templates.

use serde::Serialize;

use super::stats::{StatBlock, StatValues};

/// Identifier of the background used when none is chosen.
pub const DEFAULT_BACKGROUND_ID: &str = "humble_origins";

/// How hard a background makes the playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundDifficulty {
    VeryHard,
    Hard,
    Medium,
    Easy,
}

impl BackgroundDifficulty {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            BackgroundDifficulty::VeryHard => "Very Hard",
            BackgroundDifficulty::Hard => "Hard",
            BackgroundDifficulty::Medium => "Medium",
            BackgroundDifficulty::Easy => "Easy",
        }
    }
}

/// A starting template for a new hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroBackground {
    /// Stable identifier recorded in saves.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Text shown when the background is picked.
    pub flavor_text: &'static str,
    /// Difficulty label.
    pub difficulty: BackgroundDifficulty,
    /// Attribute values the hero starts with.
    pub initial: StatValues,
}

impl HeroBackground {
    /// Builds the starting stat block for this background.
    #[must_use]
    pub fn initial_stats(&self) -> StatBlock {
        StatBlock::from(self.initial)
    }
}

const fn values(power: [i32; 6], motivation: i32, madness: i32, insight: i32) -> StatValues {
    StatValues {
        martial: power[0],
        equipment: power[1],
        social: power[2],
        financial: power[3],
        nobility: power[4],
        magical: power[5],
        motivation,
        madness,
        insight,
    }
}

static BACKGROUNDS: [HeroBackground; 8] = [
    HeroBackground {
        id: DEFAULT_BACKGROUND_ID,
        name: "Humble Origins",
        description: "Born to nothing, destined for greatness through sheer willpower.",
        flavor_text: "You have no advantages, only determination. Every victory will be hard-earned.",
        difficulty: BackgroundDifficulty::VeryHard,
        initial: StatValues::DEFAULT,
    },
    HeroBackground {
        id: "child_soldier",
        name: "Child Soldier",
        description: "Forged in battle, scarred by war.",
        flavor_text: "You know only combat. Your past haunts you, but your blade is sharp.",
        difficulty: BackgroundDifficulty::Easy,
        initial: values([25, 10, 1, 10, 1, 1], 25, 25, 0),
    },
    HeroBackground {
        id: "child_of_noble",
        name: "Child of a Noble",
        description: "Born into privilege and power.",
        flavor_text: "You have resources and connections, but lack combat experience.",
        difficulty: BackgroundDifficulty::VeryHard,
        initial: values([10, 15, 15, 25, 15, 1], 0, 10, 0),
    },
    HeroBackground {
        id: "dreamer_farm_child",
        name: "Dreamer Farm Child",
        description: "A simple life filled with big dreams.",
        flavor_text: "You grew up listening to tales of heroes. Now it's your turn to become one.",
        difficulty: BackgroundDifficulty::Easy,
        initial: values([1, 1, 20, 1, 1, 5], 25, 0, 10),
    },
    HeroBackground {
        id: "city_urchin",
        name: "City Urchin",
        description: "Survived the streets through wit and charm.",
        flavor_text: "The streets taught you to read people and survive by your wits.",
        difficulty: BackgroundDifficulty::Easy,
        initial: values([5, 5, 25, 5, 1, 1], 25, 10, 10),
    },
    HeroBackground {
        id: "dignitary_child",
        name: "Dignitary Child",
        description: "Raised in the halls of power and diplomacy.",
        flavor_text: "You excel at negotiation and politics, but the battlefield is foreign to you.",
        difficulty: BackgroundDifficulty::VeryHard,
        initial: values([10, 15, 25, 10, 10, 1], 0, 0, 0),
    },
    HeroBackground {
        id: "magical_academy_orphan",
        name: "Magical Academy Orphan",
        description: "Abandoned at a magical academy, raised among ancient tomes.",
        flavor_text: "Magic flows through you, but the world outside the academy is strange and dangerous.",
        difficulty: BackgroundDifficulty::Medium,
        initial: values([1, 10, 1, 5, 5, 25], 15, 10, 20),
    },
    HeroBackground {
        id: "tinkers_child",
        name: "Tinker's Child",
        description: "Grew up in a workshop surrounded by gears and inventions.",
        flavor_text: "You understand machines and commerce, but lack combat prowess.",
        difficulty: BackgroundDifficulty::Medium,
        initial: values([1, 25, 1, 25, 10, 15], 10, 0, 10),
    },
];

/// All backgrounds, in menu order.
#[must_use]
pub fn all_backgrounds() -> &'static [HeroBackground] {
    &BACKGROUNDS
}

/// Looks up a background by id.
#[must_use]
pub fn background_by_id(id: &str) -> Option<&'static HeroBackground> {
    BACKGROUNDS.iter().find(|b| b.id == id)
}

/// The background used when none is chosen.
#[must_use]
pub fn default_background() -> &'static HeroBackground {
    &BACKGROUNDS[0]
}

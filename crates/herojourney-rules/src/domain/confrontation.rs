//! The final confrontation.
//!
//! Ten fixed strategies. Six lean on one effective stat and need 120; four
//! combine two effective stats and need 75 in each. Judging a strategy is a
//! pure function of the hero's final stats.

use std::fmt;

use herojourney_character::domain::stats::{StatBlock, StatType};
use serde::{Deserialize, Serialize};

/// Threshold for strategies that rely on one stat.
pub const SINGLE_STAT_REQUIREMENT: i32 = 120;
/// Threshold for each stat of a two-stat strategy.
pub const DUAL_STAT_REQUIREMENT: i32 = 75;

/// How the hero faces the final enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    HandToHand,
    Army,
    Mercenaries,
    MagicSeal,
    Firearms,
    Befriend,
    MartialMagic,
    ArmyMercenaries,
    Ceremony,
    MagicalWeapons,
}

impl Strategy {
    /// Every strategy, single-stat ones first.
    pub const ALL: [Strategy; 10] = [
        Strategy::HandToHand,
        Strategy::Army,
        Strategy::Mercenaries,
        Strategy::MagicSeal,
        Strategy::Firearms,
        Strategy::Befriend,
        Strategy::MartialMagic,
        Strategy::ArmyMercenaries,
        Strategy::Ceremony,
        Strategy::MagicalWeapons,
    ];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::HandToHand => "Hand-to-Hand Combat",
            Strategy::Army => "Lead an Army",
            Strategy::Mercenaries => "Hire Mercenaries",
            Strategy::MagicSeal => "Seal with Magic",
            Strategy::Firearms => "Modern Firearms",
            Strategy::Befriend => "Befriend the Entity",
            Strategy::MartialMagic => "Martial Arts & Magic",
            Strategy::ArmyMercenaries => "Army & Mercenaries",
            Strategy::Ceremony => "Royal Ceremony",
            Strategy::MagicalWeapons => "Magical Weapons",
        }
    }

    /// The stats checked and the minimum each needs.
    #[must_use]
    pub fn requirements(self) -> &'static [(StatType, i32)] {
        const SINGLE: i32 = SINGLE_STAT_REQUIREMENT;
        const DUAL: i32 = DUAL_STAT_REQUIREMENT;
        match self {
            Strategy::HandToHand => &[(StatType::Martial, SINGLE)],
            Strategy::Army => &[(StatType::Nobility, SINGLE)],
            Strategy::Mercenaries => &[(StatType::Financial, SINGLE)],
            Strategy::MagicSeal => &[(StatType::Magical, SINGLE)],
            Strategy::Firearms => &[(StatType::Equipment, SINGLE)],
            Strategy::Befriend => &[(StatType::Social, SINGLE)],
            Strategy::MartialMagic => &[(StatType::Martial, DUAL), (StatType::Magical, DUAL)],
            Strategy::ArmyMercenaries => &[(StatType::Nobility, DUAL), (StatType::Financial, DUAL)],
            Strategy::Ceremony => &[(StatType::Magical, DUAL), (StatType::Nobility, DUAL)],
            Strategy::MagicalWeapons => &[(StatType::Martial, DUAL), (StatType::Equipment, DUAL)],
        }
    }

    fn victory_text(self) -> &'static str {
        match self {
            Strategy::HandToHand => "Your years of training culminate in a legendary duel. You defeat the entity in single combat, becoming a legend yourself.",
            Strategy::Army => "You rally the kingdoms under your banner. The combined might of all nations drives back the darkness.",
            Strategy::Mercenaries => "Gold buys loyalty, and loyalty buys victory. Your hired warriors fight with unmatched ferocity, vanquishing the threat.",
            Strategy::MagicSeal => "You weave an ancient spell of binding, sealing the entity in an eternal prison beyond reality itself.",
            Strategy::Firearms => "Modern technology triumphs over ancient evil. Your advanced weaponry tears through the entity's defenses.",
            Strategy::Befriend => "Through empathy and understanding, you reach the entity's core. It agrees to depart peacefully, ending the conflict without bloodshed.",
            Strategy::MartialMagic => "You blend blade and spell into a devastating combination. The spellblade technique proves unstoppable.",
            Strategy::ArmyMercenaries => "You command both noble knights and hired soldiers. This unprecedented alliance overwhelms the entity.",
            Strategy::Ceremony => "You perform an ancient royal ritual, channeling the collective will of the kingdom through arcane means. The entity is banished.",
            Strategy::MagicalWeapons => "Armed with enchanted weapons and the skill to wield them, you strike down the entity in glorious combat.",
        }
    }

    fn defeat_text(self) -> &'static str {
        match self {
            Strategy::HandToHand => "Your martial prowess, though impressive, is not enough. The entity's power overwhelms you.",
            Strategy::Army => "Your influence was insufficient. The armies scatter before the entity's terrible power.",
            Strategy::Mercenaries => "Even your vast wealth cannot buy victory against such a foe. Your mercenaries flee or fall.",
            Strategy::MagicSeal => "Your magic is insufficient. The seal shatters, and the entity breaks free with terrible vengeance.",
            Strategy::Firearms => "Your weapons, though powerful, cannot harm what exists beyond the physical realm.",
            Strategy::Befriend => "Your words fall on deaf ears. The entity has no interest in diplomacy or mercy.",
            Strategy::MartialMagic => "Your attempt to balance martial and magical arts leaves you master of neither. You are defeated.",
            Strategy::ArmyMercenaries => "Divided loyalties doom your forces. Nobility and mercenaries refuse to fight together effectively.",
            Strategy::Ceremony => "The ceremony requires perfect execution. Your incomplete mastery causes it to fail catastrophically.",
            Strategy::MagicalWeapons => "Magical weapons require both skill and equipment. Your deficiency in one proves fatal.",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One stat compared against its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatCheck {
    pub stat: StatType,
    /// The hero's effective value.
    pub value: i32,
    pub required: i32,
    pub passed: bool,
}

/// The verdict of one confrontation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfrontationResult {
    pub strategy: Strategy,
    pub success: bool,
    pub checks: Vec<StatCheck>,
    /// The strategy's victory or defeat line.
    pub summary: String,
    /// The full closing story.
    pub narrative: String,
}

impl ConfrontationResult {
    /// How far the hero got toward the requirements, from 0.0 to 1.0. Used
    /// to pick the most promising strategy.
    #[must_use]
    pub fn readiness(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .checks
            .iter()
            .map(|c| (f64::from(c.value) / f64::from(c.required)).min(1.0))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.checks.len() as f64;
        total / count
    }
}

/// Judges `strategy` against the hero's effective stats.
#[must_use]
pub fn evaluate(strategy: Strategy, stats: &StatBlock) -> ConfrontationResult {
    let checks: Vec<StatCheck> = strategy
        .requirements()
        .iter()
        .map(|&(stat, required)| {
            let value = stats.effective_stat(stat);
            StatCheck {
                stat,
                value,
                required,
                passed: value >= required,
            }
        })
        .collect();
    let success = checks.iter().all(|c| c.passed);
    let summary = if success {
        strategy.victory_text()
    } else {
        strategy.defeat_text()
    };

    ConfrontationResult {
        strategy,
        success,
        narrative: ClosingStory {
            strategy,
            success,
            checks: &checks,
        }
        .to_string(),
        summary: summary.to_owned(),
        checks,
    }
}

/// Evaluates every strategy, in `Strategy::ALL` order.
#[must_use]
pub fn evaluate_all(stats: &StatBlock) -> Vec<ConfrontationResult> {
    Strategy::ALL.iter().map(|s| evaluate(*s, stats)).collect()
}

/// The closing text for a confrontation: the battle, the stat checks and
/// the aftermath.
struct ClosingStory<'a> {
    strategy: Strategy,
    success: bool,
    checks: &'a [StatCheck],
}

impl fmt::Display for ClosingStory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            self.write_victory(f)
        } else {
            self.write_defeat(f)
        }
    }
}

impl ClosingStory<'_> {
    fn write_victory(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = self.strategy;
        writeln!(out, "=== THE HERO'S TRIUMPH ===")?;
        writeln!(out)?;
        writeln!(
            out,
            "After months of trials and challenges, your champion has grown strong enough to face the ultimate evil."
        )?;
        writeln!(out)?;
        writeln!(out, "--- THE FINAL BATTLE ---")?;
        writeln!(out, "{}", strategy.victory_text())?;
        writeln!(out)?;
        writeln!(out, "--- HOW VICTORY WAS ACHIEVED ---")?;
        writeln!(out, "Strategy: {strategy}")?;
        writeln!(out)?;
        for check in self.checks.iter().filter(|c| c.passed) {
            writeln!(
                out,
                "✓ {}: {} (Required: {}) - PASSED",
                check.stat, check.value, check.required
            )?;
        }
        writeln!(out)?;
        for line in [
            "--- THE AFTERMATH ---",
            "The dark entity is vanquished. Light returns to the realm.",
            "Your hero's name will echo through the ages.",
            "Songs will be sung of their courage and sacrifice.",
            "",
            "As the god who guided them, you watch with pride.",
            "Your champion has proven worthy.",
            "The world is saved.",
            "",
            "But you know... new threats always emerge.",
            "New heroes will need your guidance.",
            "The cycle continues.",
            "",
            "=== YOUR LEGEND IS COMPLETE ===",
        ] {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn write_defeat(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = self.strategy;
        writeln!(out, "=== THE HERO'S END ===")?;
        writeln!(out)?;
        writeln!(
            out,
            "Despite months of preparation, your champion was not strong enough."
        )?;
        writeln!(out)?;
        writeln!(out, "--- THE FINAL BATTLE ---")?;
        writeln!(out, "{}", strategy.defeat_text())?;
        writeln!(out)?;
        writeln!(out, "--- WHY THEY FAILED ---")?;
        writeln!(out, "Strategy Attempted: {strategy}")?;
        writeln!(out)?;
        for check in self.checks {
            let (mark, note) = if check.passed { ("✓", "") } else { ("✗", " - FAILED") };
            writeln!(
                out,
                "{mark} {}: {} (Required: {}){note}",
                check.stat, check.value, check.required
            )?;
        }
        writeln!(out)?;
        for line in [
            "--- THE AFTERMATH ---",
            "Darkness spreads across the realm.",
            "Your champion's sacrifice was valiant, but insufficient.",
            "The evil entity claims victory.",
            "",
            "As the god who guided them, you feel the weight of failure.",
            "Perhaps different choices would have led to victory.",
            "Perhaps a different path...",
            "",
            "The world falls into shadow.",
            "",
            "=== TRY AGAIN ===",
            "(New Game to attempt a different path)",
        ] {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

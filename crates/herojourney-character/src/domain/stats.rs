//! The hero's attribute block.
//!
//! Six power stats live in `[0, 999]` and three mental-state bars in
//! `[0, 100]`. Every write path clamps, so a `StatBlock` never holds a value
//! outside its declared range, including one deserialized from a save.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for power stats.
pub const POWER_STAT_MAX: i32 = 999;
/// Upper bound for mental-state bars.
pub const MENTAL_STAT_MAX: i32 = 100;
/// Madness above this value starts distorting effective stats.
pub const MADNESS_THRESHOLD: i32 = 50;
/// Madness or insight at this value ends the playthrough.
pub const TERMINAL_THRESHOLD: i32 = 100;

/// The six power stats checked by outcome requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    /// Combat prowess.
    Martial,
    /// Gear and tools.
    Equipment,
    /// Charm and connections.
    Social,
    /// Wealth.
    Financial,
    /// Standing among the nobility.
    Nobility,
    /// Arcane power.
    Magical,
}

impl StatType {
    /// All power stats in declaration order. This order also breaks ties
    /// when two checks share the same threshold.
    pub const ALL: [StatType; 6] = [
        StatType::Martial,
        StatType::Equipment,
        StatType::Social,
        StatType::Financial,
        StatType::Nobility,
        StatType::Magical,
    ];

    /// Lowercase key used in content documents.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            StatType::Martial => "martial",
            StatType::Equipment => "equipment",
            StatType::Social => "social",
            StatType::Financial => "financial",
            StatType::Nobility => "nobility",
            StatType::Magical => "magical",
        }
    }

    /// Capitalized name for narrative text.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            StatType::Martial => "Martial",
            StatType::Equipment => "Equipment",
            StatType::Social => "Social",
            StatType::Financial => "Financial",
            StatType::Nobility => "Nobility",
            StatType::Magical => "Magical",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a stat name does not match any power stat.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stat name: {0}")]
pub struct UnknownStat(pub String);

impl FromStr for StatType {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StatType::ALL
            .into_iter()
            .find(|stat| stat.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStat(s.to_owned()))
    }
}

/// The three mental-state bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentalStat {
    /// Drive; feeds a flat bonus to every power stat each round.
    Motivation,
    /// Instability; distorts effective stats above the threshold.
    Madness,
    /// Self-knowledge; adds to every effective stat.
    Insight,
}

impl MentalStat {
    /// All mental-state bars.
    pub const ALL: [MentalStat; 3] = [
        MentalStat::Motivation,
        MentalStat::Madness,
        MentalStat::Insight,
    ];

    /// Capitalized name for narrative text.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            MentalStat::Motivation => "Motivation",
            MentalStat::Madness => "Madness",
            MentalStat::Insight => "Insight",
        }
    }
}

/// Any one of the nine attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// A power stat.
    Power(StatType),
    /// A mental-state bar.
    Mental(MentalStat),
}

impl Attribute {
    /// Inclusive upper bound of this attribute's range. The lower bound is 0.
    #[must_use]
    pub fn max(self) -> i32 {
        match self {
            Attribute::Power(_) => POWER_STAT_MAX,
            Attribute::Mental(_) => MENTAL_STAT_MAX,
        }
    }

    /// Clamps `value` into this attribute's range.
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(0, self.max())
    }
}

/// Why a playthrough ended before the final confrontation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Madness reached 100.
    Madness,
    /// Insight reached 100.
    SelfAwareness,
}

impl TerminalReason {
    /// Player-facing explanation.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            TerminalReason::Madness => "Hero succumbed to madness",
            TerminalReason::SelfAwareness => "Hero gained self-awareness and retired",
        }
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Plain attribute values, used to build a `StatBlock` and as its wire form.
///
/// Converting into a `StatBlock` clamps every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValues {
    pub martial: i32,
    pub equipment: i32,
    pub social: i32,
    pub financial: i32,
    pub nobility: i32,
    pub magical: i32,
    pub motivation: i32,
    pub madness: i32,
    pub insight: i32,
}

impl StatValues {
    /// Starting values for a hero with no background advantages.
    pub const DEFAULT: StatValues = StatValues {
        martial: 10,
        equipment: 10,
        social: 10,
        financial: 10,
        nobility: 10,
        magical: 10,
        motivation: 50,
        madness: 0,
        insight: 0,
    };
}

impl Default for StatValues {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The mutable hero attribute container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatValues")]
pub struct StatBlock {
    martial: i32,
    equipment: i32,
    social: i32,
    financial: i32,
    nobility: i32,
    magical: i32,
    motivation: i32,
    madness: i32,
    insight: i32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::from(StatValues::DEFAULT)
    }
}

impl From<StatValues> for StatBlock {
    fn from(v: StatValues) -> Self {
        let power = |value: i32| value.clamp(0, POWER_STAT_MAX);
        let mental = |value: i32| value.clamp(0, MENTAL_STAT_MAX);
        Self {
            martial: power(v.martial),
            equipment: power(v.equipment),
            social: power(v.social),
            financial: power(v.financial),
            nobility: power(v.nobility),
            magical: power(v.magical),
            motivation: mental(v.motivation),
            madness: mental(v.madness),
            insight: mental(v.insight),
        }
    }
}

impl StatBlock {
    /// Creates a block with the default starting values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw values.
    #[must_use]
    pub fn values(&self) -> StatValues {
        StatValues {
            martial: self.martial,
            equipment: self.equipment,
            social: self.social,
            financial: self.financial,
            nobility: self.nobility,
            magical: self.magical,
            motivation: self.motivation,
            madness: self.madness,
            insight: self.insight,
        }
    }

    /// Reads any attribute.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Power(stat) => self.power(stat),
            Attribute::Mental(bar) => self.mental(bar),
        }
    }

    /// Writes any attribute, clamping into its range.
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        let clamped = attribute.clamp(value);
        *self.slot_mut(attribute) = clamped;
    }

    /// Adds `delta` to an attribute, clamping the result.
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) {
        let current = self.get(attribute);
        self.set(attribute, current.saturating_add(delta));
    }

    /// Reads a power stat.
    #[must_use]
    pub fn power(&self, stat: StatType) -> i32 {
        match stat {
            StatType::Martial => self.martial,
            StatType::Equipment => self.equipment,
            StatType::Social => self.social,
            StatType::Financial => self.financial,
            StatType::Nobility => self.nobility,
            StatType::Magical => self.magical,
        }
    }

    /// Reads a mental-state bar.
    #[must_use]
    pub fn mental(&self, bar: MentalStat) -> i32 {
        match bar {
            MentalStat::Motivation => self.motivation,
            MentalStat::Madness => self.madness,
            MentalStat::Insight => self.insight,
        }
    }

    /// Adds `delta` to a power stat, clamping the result.
    pub fn adjust_power(&mut self, stat: StatType, delta: i32) {
        self.adjust(Attribute::Power(stat), delta);
    }

    /// Adds `delta` to a mental-state bar, clamping the result.
    pub fn adjust_mental(&mut self, bar: MentalStat, delta: i32) {
        self.adjust(Attribute::Mental(bar), delta);
    }

    #[must_use]
    pub fn motivation(&self) -> i32 {
        self.motivation
    }

    #[must_use]
    pub fn madness(&self) -> i32 {
        self.madness
    }

    #[must_use]
    pub fn insight(&self) -> i32 {
        self.insight
    }

    /// The value used for every requirement check: base plus
    /// `insight / 10`, plus the madness modifier once madness exceeds
    /// the threshold, floored at 0.
    ///
    /// Above the threshold madness adds `madness / 10` to martial,
    /// subtracts it from equipment, social, financial and nobility, and
    /// leaves magical alone.
    #[must_use]
    pub fn effective_stat(&self, stat: StatType) -> i32 {
        let insight_bonus = self.insight / 10;
        let madness_mod = if self.madness > MADNESS_THRESHOLD {
            let swing = self.madness / 10;
            match stat {
                StatType::Martial => swing,
                StatType::Equipment
                | StatType::Social
                | StatType::Financial
                | StatType::Nobility => -swing,
                StatType::Magical => 0,
            }
        } else {
            0
        };
        (self.power(stat) + insight_bonus + madness_mod).max(0)
    }

    /// Effective martial, the stat most confrontation strategies lean on.
    #[must_use]
    pub fn effective_martial(&self) -> i32 {
        self.effective_stat(StatType::Martial)
    }

    /// Returns why the playthrough must end, if it must. Madness is checked
    /// before insight.
    #[must_use]
    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        if self.madness >= TERMINAL_THRESHOLD {
            Some(TerminalReason::Madness)
        } else if self.insight >= TERMINAL_THRESHOLD {
            Some(TerminalReason::SelfAwareness)
        } else {
            None
        }
    }

    /// Whether the hero has reached a terminal mental state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal_reason().is_some()
    }

    /// Mean of the six power stats, shown in save listings.
    #[must_use]
    pub fn hero_level(&self) -> i32 {
        StatType::ALL.iter().map(|s| self.power(*s)).sum::<i32>() / 6
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Power(StatType::Martial) => &mut self.martial,
            Attribute::Power(StatType::Equipment) => &mut self.equipment,
            Attribute::Power(StatType::Social) => &mut self.social,
            Attribute::Power(StatType::Financial) => &mut self.financial,
            Attribute::Power(StatType::Nobility) => &mut self.nobility,
            Attribute::Power(StatType::Magical) => &mut self.magical,
            Attribute::Mental(MentalStat::Motivation) => &mut self.motivation,
            Attribute::Mental(MentalStat::Madness) => &mut self.madness,
            Attribute::Mental(MentalStat::Insight) => &mut self.insight,
        }
    }
}

//! Difficulty curve.
//!
//! Tiers open up as the playthrough advances: rounds 1 to 5 offer only EASY
//! nodes, 6 to 10 add MEDIUM, 11 to 15 add HARD, and 16 onward add EXTREME.

use herojourney_content::domain::nodes::DifficultyTier;

static TIERS: [DifficultyTier; 4] = DifficultyTier::ALL;

/// Tiers permitted at `round`.
#[must_use]
pub fn allowed_tiers(round: u32) -> &'static [DifficultyTier] {
    let open = match round {
        0..=5 => 1,
        6..=10 => 2,
        11..=15 => 3,
        _ => 4,
    };
    &TIERS[..open]
}

//! Applying a resolved outcome to the hero.

use herojourney_character::domain::stats::{MentalStat, StatBlock, StatType};
use herojourney_content::domain::nodes::Outcome;
use herojourney_core::config::StatDeltaPolicy;
use serde::Serialize;
use tracing::warn;

/// What `apply_outcome` changed, for the choice-result payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AppliedEffects {
    /// Flat bonus added to every power stat.
    pub motivation_bonus: i32,
    /// Stat and amount of the difficulty-tier bonus, when a check passed.
    pub tier_bonus: Option<(StatType, i32)>,
    /// Whether the outcome's named stat deltas were applied.
    pub stat_deltas_applied: bool,
    /// Stat names in the outcome that match no power stat.
    pub ignored_stats: Vec<String>,
}

/// Applies `outcome` to `stats`.
///
/// The motivation bonus is computed from motivation before anything else
/// changes. Named stat deltas are skipped when no check passed unless the
/// policy is `Always`. Every write clamps.
pub fn apply_outcome(
    stats: &mut StatBlock,
    outcome: &Outcome,
    passed_check: Option<StatType>,
    policy: StatDeltaPolicy,
) -> AppliedEffects {
    let motivation_bonus = stats.motivation() / 10;
    for stat in StatType::ALL {
        stats.adjust_power(stat, motivation_bonus);
    }

    let tier_bonus = passed_check.map(|stat| {
        let bonus = outcome.difficulty.bonus();
        stats.adjust_power(stat, bonus);
        (stat, bonus)
    });

    let effects = &outcome.effects;
    stats.adjust_mental(MentalStat::Motivation, effects.motivation_change);
    stats.adjust_mental(MentalStat::Madness, effects.madness_change);
    stats.adjust_mental(MentalStat::Insight, effects.insight_change);

    let stat_deltas_applied = match policy {
        StatDeltaPolicy::Always => true,
        StatDeltaPolicy::OnCheckPassed => passed_check.is_some(),
    };
    let mut ignored_stats = Vec::new();
    if stat_deltas_applied {
        for (name, delta) in &effects.stat_changes {
            match name.parse::<StatType>() {
                Ok(stat) => stats.adjust_power(stat, *delta),
                Err(_) => {
                    warn!(stat = %name, "ignoring unknown stat in outcome effects");
                    ignored_stats.push(name.clone());
                }
            }
        }
    }

    AppliedEffects {
        motivation_bonus,
        tier_bonus,
        stat_deltas_applied,
        ignored_stats,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use herojourney_character::domain::stats::{
        MENTAL_STAT_MAX, POWER_STAT_MAX, StatValues,
    };
    use herojourney_content::domain::nodes::DifficultyTier;
    use herojourney_test_support::fixtures::{catch_all, gated};

    use super::*;

    fn with_effects(mut outcome: Outcome, changes: &[(&str, i32)]) -> Outcome {
        outcome.effects.motivation_change = 5;
        outcome.effects.madness_change = 3;
        outcome.effects.insight_change = 2;
        outcome.effects.stat_changes = changes
            .iter()
            .map(|(k, v)| ((*k).to_owned(), *v))
            .collect::<BTreeMap<_, _>>();
        outcome
    }

    #[test]
    fn test_motivation_bonus_uses_pre_mutation_motivation() {
        let mut stats = StatBlock::from(StatValues {
            motivation: 39,
            ..StatValues::DEFAULT
        });
        let mut outcome = catch_all("Rest", DifficultyTier::Easy);
        outcome.effects.motivation_change = 50;

        let applied = apply_outcome(&mut stats, &outcome, None, StatDeltaPolicy::OnCheckPassed);
        assert_eq!(applied.motivation_bonus, 3);
        for stat in StatType::ALL {
            assert_eq!(stats.power(stat), 13);
        }
        assert_eq!(stats.motivation(), 89);
    }

    #[test]
    fn test_failed_check_applies_mental_deltas_only() {
        let mut stats = StatBlock::new();
        let outcome = with_effects(
            gated("Strike", StatType::Martial, 50, 1, DifficultyTier::Hard),
            &[("martial", 10)],
        );

        let applied = apply_outcome(&mut stats, &outcome, None, StatDeltaPolicy::OnCheckPassed);
        assert_eq!(applied.tier_bonus, None);
        assert!(!applied.stat_deltas_applied);
        assert_eq!(stats.power(StatType::Martial), 15);
        assert_eq!(stats.motivation(), 55);
        assert_eq!(stats.madness(), 3);
        assert_eq!(stats.insight(), 2);
    }

    #[test]
    fn test_passed_check_adds_tier_bonus_and_stat_deltas() {
        let mut stats = StatBlock::from(StatValues {
            martial: 50,
            ..StatValues::DEFAULT
        });
        let outcome = with_effects(
            gated("Strike", StatType::Martial, 50, 1, DifficultyTier::Hard),
            &[("martial", 10), ("Social", -2)],
        );

        let applied = apply_outcome(
            &mut stats,
            &outcome,
            Some(StatType::Martial),
            StatDeltaPolicy::OnCheckPassed,
        );
        assert_eq!(applied.tier_bonus, Some((StatType::Martial, 8)));
        assert_eq!(stats.power(StatType::Martial), 50 + 5 + 8 + 10);
        assert_eq!(stats.power(StatType::Social), 10 + 5 - 2);
        assert_eq!(stats.power(StatType::Magical), 15);
    }

    #[test]
    fn test_always_policy_applies_deltas_without_check() {
        let mut stats = StatBlock::new();
        let outcome = with_effects(catch_all("Study", DifficultyTier::Easy), &[("magical", 4)]);
        let applied = apply_outcome(&mut stats, &outcome, None, StatDeltaPolicy::Always);
        assert!(applied.stat_deltas_applied);
        assert_eq!(stats.power(StatType::Magical), 19);
    }

    #[test]
    fn test_unknown_stat_names_are_ignored() {
        let mut stats = StatBlock::new();
        let outcome = with_effects(
            catch_all("Dance", DifficultyTier::Easy),
            &[("charisma", 9), ("social", 1)],
        );
        let applied = apply_outcome(&mut stats, &outcome, None, StatDeltaPolicy::Always);
        assert_eq!(applied.ignored_stats, vec!["charisma"]);
        assert_eq!(stats.power(StatType::Social), 16);
    }

    #[test]
    fn test_results_are_clamped() {
        let mut stats = StatBlock::from(StatValues {
            martial: POWER_STAT_MAX,
            motivation: MENTAL_STAT_MAX,
            madness: 99,
            insight: 1,
            ..StatValues::DEFAULT
        });
        let mut outcome = catch_all("Rage", DifficultyTier::Extreme);
        outcome.effects.madness_change = 40;
        outcome.effects.insight_change = -20;

        apply_outcome(&mut stats, &outcome, Some(StatType::Martial), StatDeltaPolicy::Always);
        assert_eq!(stats.power(StatType::Martial), POWER_STAT_MAX);
        assert_eq!(stats.madness(), MENTAL_STAT_MAX);
        assert_eq!(stats.insight(), 0);
    }
}

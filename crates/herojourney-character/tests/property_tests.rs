//! Property-based tests for stat range and effective-stat invariants.

use herojourney_character::domain::stats::{
    Attribute, MENTAL_STAT_MAX, MentalStat, POWER_STAT_MAX, StatBlock, StatType, StatValues,
};
use proptest::prelude::*;

fn any_stat() -> impl Strategy<Value = StatType> {
    prop::sample::select(StatType::ALL.to_vec())
}

fn any_attribute() -> impl Strategy<Value = Attribute> {
    prop_oneof![
        any_stat().prop_map(Attribute::Power),
        prop::sample::select(MentalStat::ALL.to_vec()).prop_map(Attribute::Mental),
    ]
}

fn any_block() -> impl Strategy<Value = StatBlock> {
    (
        prop::array::uniform6(-100i32..1200),
        -50i32..150,
        -50i32..150,
        -50i32..150,
    )
        .prop_map(|(p, motivation, madness, insight)| {
            StatBlock::from(StatValues {
                martial: p[0],
                equipment: p[1],
                social: p[2],
                financial: p[3],
                nobility: p[4],
                magical: p[5],
                motivation,
                madness,
                insight,
            })
        })
}

fn in_range(stats: &StatBlock) -> bool {
    StatType::ALL
        .iter()
        .all(|s| (0..=POWER_STAT_MAX).contains(&stats.power(*s)))
        && MentalStat::ALL
            .iter()
            .all(|m| (0..=MENTAL_STAT_MAX).contains(&stats.mental(*m)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Any sequence of deltas leaves all nine attributes in range.
    #[test]
    fn adjustments_never_escape_range(
        mut stats in any_block(),
        deltas in prop::collection::vec((any_attribute(), any::<i32>()), 0..40),
    ) {
        prop_assert!(in_range(&stats));
        for (attribute, delta) in deltas {
            stats.adjust(attribute, delta);
            prop_assert!(in_range(&stats));
        }
    }

    /// Raising insight never lowers an effective stat.
    #[test]
    fn effective_stat_monotonic_in_insight(
        stats in any_block(),
        stat in any_stat(),
        bump in 0i32..100,
    ) {
        let mut raised = stats.clone();
        raised.adjust_mental(MentalStat::Insight, bump);
        prop_assert!(raised.effective_stat(stat) >= stats.effective_stat(stat));
    }

    /// Above the madness threshold martial gains, magical is untouched,
    /// and the other four lose (down to the floor of 0).
    #[test]
    fn madness_distorts_effective_stats(
        stats in any_block(),
        madness in 51i32..=100,
    ) {
        let mut calm = stats.clone();
        calm.set(Attribute::Mental(MentalStat::Madness), 0);
        let mut mad = stats;
        mad.set(Attribute::Mental(MentalStat::Madness), madness);

        prop_assert!(mad.effective_stat(StatType::Martial) > calm.effective_stat(StatType::Martial));
        prop_assert_eq!(mad.effective_stat(StatType::Magical), calm.effective_stat(StatType::Magical));
        for stat in [StatType::Equipment, StatType::Social, StatType::Financial, StatType::Nobility] {
            let before = calm.effective_stat(stat);
            let after = mad.effective_stat(stat);
            prop_assert!(after < before || after == 0);
        }
    }

    /// Terminal iff madness or insight is at 100.
    #[test]
    fn terminal_iff_a_bar_is_full(stats in any_block()) {
        let expected = stats.madness() >= 100 || stats.insight() >= 100;
        prop_assert_eq!(stats.is_terminal(), expected);
    }
}

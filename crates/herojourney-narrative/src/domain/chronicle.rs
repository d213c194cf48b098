//! End-of-run story log.

use std::fmt;

use herojourney_character::domain::stats::{MentalStat, StatBlock, StatType};

use super::history::ChoiceRecord;

/// Body shown when nothing has been played yet.
pub const EMPTY_STORY: &str = "The story has not yet begun.";

/// Renders the journey: duration, final stats, and one entry per choice.
#[derive(Debug, Clone, Copy)]
pub struct Chronicle<'a> {
    history: &'a [ChoiceRecord],
    stats: &'a StatBlock,
    months: u32,
}

impl<'a> Chronicle<'a> {
    #[must_use]
    pub fn new(history: &'a [ChoiceRecord], stats: &'a StatBlock, months: u32) -> Self {
        Self {
            history,
            stats,
            months,
        }
    }
}

impl fmt::Display for Chronicle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== HERO'S JOURNEY ===")?;
        writeln!(f)?;
        writeln!(f, "Duration: {} months", self.months)?;
        writeln!(f, "Challenges Faced: {}", self.history.len())?;
        writeln!(f)?;

        writeln!(f, "Final Stats:")?;
        for stat in StatType::ALL {
            writeln!(f, "  {}: {}", stat.display_name(), self.stats.power(stat))?;
        }
        for bar in MentalStat::ALL {
            writeln!(f, "  {}: {}", bar.display_name(), self.stats.mental(bar))?;
        }
        writeln!(f)?;

        writeln!(f, "=== CHRONICLE OF EVENTS ===")?;
        writeln!(f)?;
        if self.history.is_empty() {
            return writeln!(f, "{EMPTY_STORY}");
        }
        for record in self.history {
            writeln!(f, "Month {}: {}", record.round, record.node_title)?;
            writeln!(f, "  Choice: {}", record.outcome_description)?;
            writeln!(f, "  Result: {}", record.result_text)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the story log for a finished or interrupted run.
#[must_use]
pub fn chronicle(history: &[ChoiceRecord], stats: &StatBlock, months: u32) -> String {
    Chronicle::new(history, stats, months).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_says_story_has_not_begun() {
        let log = chronicle(&[], &StatBlock::new(), 0);
        assert!(log.starts_with("=== HERO'S JOURNEY ==="));
        assert!(log.contains("Challenges Faced: 0"));
        assert!(log.contains(EMPTY_STORY));
    }

    #[test]
    fn test_entries_follow_history_order() {
        let history = vec![
            ChoiceRecord {
                round: 1,
                node_id: "market".into(),
                node_title: "Market Day".into(),
                outcome_description: "Haggle".into(),
                stats: StatBlock::new(),
                result_text: "A fair price.".into(),
            },
            ChoiceRecord {
                round: 2,
                node_id: "tavern".into(),
                node_title: "Tavern Brawl".into(),
                outcome_description: "Duck".into(),
                stats: StatBlock::new(),
                result_text: "You survive.".into(),
            },
        ];
        let log = chronicle(&history, &StatBlock::new(), 2);

        assert!(log.contains("Duration: 2 months"));
        assert!(log.contains("  Martial: 10"));
        assert!(log.contains("  Motivation: 50"));
        let first = log.find("Month 1: Market Day").unwrap();
        let second = log.find("Month 2: Tavern Brawl").unwrap();
        assert!(first < second);
        assert!(log.contains("  Result: You survive."));
        assert!(!log.contains(EMPTY_STORY));
    }
}

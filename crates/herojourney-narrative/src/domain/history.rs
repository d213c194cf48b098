//! Choice history.

use herojourney_character::domain::stats::StatBlock;
use serde::{Deserialize, Serialize};

/// Number of recent history entries whose nodes are held back from the next
/// slate.
pub const RECENT_WINDOW: usize = 3;

/// One resolved choice. Append-only: never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// Round the choice was made in, starting at 1.
    pub round: u32,
    /// Catalog id of the played node.
    pub node_id: String,
    /// Node title as it read when played.
    pub node_title: String,
    /// Description of the outcome that was resolved.
    pub outcome_description: String,
    /// Hero stats right after the outcome was applied.
    pub stats: StatBlock,
    /// Narrative text shown for the outcome.
    pub result_text: String,
}

/// Node ids of the last `RECENT_WINDOW` entries.
pub fn recent_node_ids(history: &[ChoiceRecord]) -> impl Iterator<Item = &str> {
    let start = history.len().saturating_sub(RECENT_WINDOW);
    history[start..].iter().map(|r| r.node_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, node_id: &str) -> ChoiceRecord {
        ChoiceRecord {
            round,
            node_id: node_id.to_owned(),
            node_title: node_id.to_uppercase(),
            outcome_description: "Did a thing".to_owned(),
            stats: StatBlock::new(),
            result_text: "It went fine.".to_owned(),
        }
    }

    #[test]
    fn test_recent_node_ids_takes_last_three() {
        let history: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(i, id)| record(u32::try_from(i).unwrap() + 1, id))
            .collect();
        let recent: Vec<&str> = recent_node_ids(&history).collect();
        assert_eq!(recent, vec!["c", "d", "e"]);
    }

    #[test]
    fn test_recent_node_ids_on_short_history() {
        let history = vec![record(1, "a")];
        assert_eq!(recent_node_ids(&history).collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(recent_node_ids(&[]).count(), 0);
    }
}

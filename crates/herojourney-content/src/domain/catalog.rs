//! The immutable set of story nodes for a playthrough.

use std::collections::BTreeMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::nodes::{ContentNode, DifficultyTier, Outcome, OutcomeEffects, StatRequirements};

/// Identifier of the single node in the fallback catalog.
pub const FALLBACK_NODE_ID: &str = "training_ground";

/// Validated story nodes keyed by id. Nodes are shared by reference and
/// never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    nodes: BTreeMap<String, Arc<ContentNode>>,
}

impl ContentCatalog {
    /// Builds a catalog from validated nodes. A later node with an id
    /// already present is ignored.
    #[must_use]
    pub fn new(nodes: impl IntoIterator<Item = ContentNode>) -> Self {
        let mut map = BTreeMap::new();
        for node in nodes {
            map.entry(node.id.clone()).or_insert_with(|| Arc::new(node));
        }
        Self { nodes: map }
    }

    /// The minimal catalog used when the content source cannot be loaded: a
    /// single always-available training node.
    #[must_use]
    pub fn fallback() -> Self {
        let mut stat_changes = BTreeMap::new();
        stat_changes.insert("martial".to_owned(), 3);

        Self::new([ContentNode {
            id: FALLBACK_NODE_ID.to_owned(),
            title: "Training Ground".to_owned(),
            description: "Practice your combat skills.".to_owned(),
            category: "combat".to_owned(),
            initially_locked: false,
            repeatable: true,
            outcomes: vec![Outcome {
                description: "Train intensely".to_owned(),
                requirements: StatRequirements::default(),
                effects: OutcomeEffects {
                    motivation_change: 5,
                    madness_change: 0,
                    insight_change: 2,
                    stat_changes,
                    result_text: "You improve your technique.".to_owned(),
                },
                unlocks_nodes: Vec::new(),
                locks_nodes: Vec::new(),
                priority: 0,
                difficulty: DifficultyTier::Easy,
            }],
        }])
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<ContentNode>> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<ContentNode>> {
        self.nodes.values()
    }

    /// Hex SHA-256 over the canonical JSON of every node in id order. Two
    /// catalogs with the same fingerprint hold identical content.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for node in self.nodes.values() {
            // Derived Serialize on plain data cannot fail.
            if let Ok(bytes) = serde_json::to_vec(node.as_ref()) {
                hasher.update(&bytes);
            }
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

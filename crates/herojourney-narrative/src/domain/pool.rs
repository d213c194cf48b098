//! Node pool: which nodes can be offered.
//!
//! Every catalog id sits in at most one of three sets. `available` nodes can
//! be offered, `locked` nodes wait for an unlock, and `completed` holds
//! one-shot nodes that have been played and are retired for the rest of the
//! playthrough. Repeatable nodes never enter `completed`; their plays are
//! recorded in the history instead.

use std::collections::BTreeSet;

use herojourney_content::domain::catalog::ContentCatalog;
use herojourney_content::domain::nodes::ContentNode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of locked nodes released when the selector comes up empty.
pub const EMERGENCY_UNLOCK_COUNT: usize = 3;

/// Pool membership for one playthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePool {
    available: BTreeSet<String>,
    locked: BTreeSet<String>,
    completed: BTreeSet<String>,
}

impl NodePool {
    /// Partitions every catalog node into `locked` or `available` by its
    /// `initially_locked` flag.
    #[must_use]
    pub fn seed(catalog: &ContentCatalog) -> Self {
        let mut pool = Self::default();
        for node in catalog.nodes() {
            if node.initially_locked {
                pool.locked.insert(node.id.clone());
            } else {
                pool.available.insert(node.id.clone());
            }
        }
        pool
    }

    #[must_use]
    pub fn available(&self) -> &BTreeSet<String> {
        &self.available
    }

    #[must_use]
    pub fn locked(&self) -> &BTreeSet<String> {
        &self.locked
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    #[must_use]
    pub fn is_available(&self, id: &str) -> bool {
        self.available.contains(id)
    }

    /// Records that `node` was played. One-shot nodes move to `completed`
    /// and never come back; repeatable nodes keep their membership.
    pub fn mark_completed(&mut self, node: &ContentNode) {
        if node.repeatable {
            return;
        }
        self.available.remove(&node.id);
        self.locked.remove(&node.id);
        self.completed.insert(node.id.clone());
        debug!(node_id = %node.id, "one-shot node retired");
    }

    /// Moves `id` from `locked` to `available`. Returns whether it moved.
    pub fn unlock(&mut self, id: &str) -> bool {
        if self.locked.remove(id) {
            self.available.insert(id.to_owned());
            true
        } else {
            false
        }
    }

    /// Moves `id` from `available` to `locked`. Returns whether it moved.
    pub fn lock(&mut self, id: &str) -> bool {
        if self.available.remove(id) {
            self.locked.insert(id.to_owned());
            true
        } else {
            false
        }
    }

    /// Releases up to `count` locked nodes in id order. Returns the ids
    /// released.
    pub fn emergency_unlock(&mut self, count: usize) -> Vec<String> {
        let released: Vec<String> = self.locked.iter().take(count).cloned().collect();
        for id in &released {
            self.locked.remove(id);
            self.available.insert(id.clone());
        }
        if !released.is_empty() {
            warn!(released = ?released, "emergency unlock");
        }
        released
    }

    /// Rebuilds a pool from saved lists. Later lists win when an id appears
    /// in more than one, so `completed` beats `locked` beats `available`.
    #[must_use]
    pub fn from_lists(available: Vec<String>, locked: Vec<String>, completed: Vec<String>) -> Self {
        let completed: BTreeSet<String> = completed.into_iter().collect();
        let locked: BTreeSet<String> = locked
            .into_iter()
            .filter(|id| !completed.contains(id))
            .collect();
        let available = available
            .into_iter()
            .filter(|id| !completed.contains(id) && !locked.contains(id))
            .collect();
        Self {
            available,
            locked,
            completed,
        }
    }

    /// Aligns a restored pool with the live catalog: ids the catalog does
    /// not know are dropped, and catalog nodes absent from every set are
    /// seeded as new. Returns the dropped ids.
    pub fn reconcile(&mut self, catalog: &ContentCatalog) -> Vec<String> {
        let mut dropped = Vec::new();
        for set in [&mut self.available, &mut self.locked, &mut self.completed] {
            set.retain(|id| {
                let known = catalog.contains(id);
                if !known {
                    dropped.push(id.clone());
                }
                known
            });
        }
        for id in &dropped {
            warn!(node_id = %id, "saved pool references a node missing from the catalog");
        }

        for node in catalog.nodes() {
            let tracked = self.available.contains(&node.id)
                || self.locked.contains(&node.id)
                || self.completed.contains(&node.id);
            if !tracked {
                if node.initially_locked {
                    self.locked.insert(node.id.clone());
                } else {
                    self.available.insert(node.id.clone());
                }
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use herojourney_test_support::fixtures::{NodeBuilder, catalog_of};

    use super::*;

    fn catalog() -> std::sync::Arc<ContentCatalog> {
        catalog_of([
            NodeBuilder::new("market").build(),
            NodeBuilder::new("tavern").build(),
            NodeBuilder::new("tragedy").one_shot().build(),
            NodeBuilder::new("castle").locked().build(),
            NodeBuilder::new("dragon").locked().build(),
            NodeBuilder::new("abyss").locked().build(),
            NodeBuilder::new("void").locked().build(),
        ])
    }

    fn disjoint(pool: &NodePool) -> bool {
        pool.available.is_disjoint(&pool.locked)
            && pool.available.is_disjoint(&pool.completed)
            && pool.locked.is_disjoint(&pool.completed)
    }

    #[test]
    fn test_seed_partitions_by_initially_locked() {
        let pool = NodePool::seed(&catalog());
        assert_eq!(pool.available().len(), 3);
        assert_eq!(pool.locked().len(), 4);
        assert!(pool.completed().is_empty());
        assert!(pool.locked().contains("castle"));
    }

    #[test]
    fn test_repeatable_node_stays_available_after_completion() {
        let catalog = catalog();
        let mut pool = NodePool::seed(&catalog);
        pool.mark_completed(catalog.get("market").unwrap());
        assert!(pool.is_available("market"));
        assert!(pool.completed().is_empty());
    }

    #[test]
    fn test_one_shot_node_is_retired() {
        let catalog = catalog();
        let mut pool = NodePool::seed(&catalog);
        pool.mark_completed(catalog.get("tragedy").unwrap());
        assert!(!pool.is_available("tragedy"));
        assert!(pool.completed().contains("tragedy"));

        assert!(!pool.unlock("tragedy"));
        assert!(!pool.lock("tragedy"));
        assert!(!pool.is_available("tragedy"));
        assert!(disjoint(&pool));
    }

    #[test]
    fn test_unlock_and_lock_move_between_sets() {
        let mut pool = NodePool::seed(&catalog());
        assert!(pool.unlock("castle"));
        assert!(pool.is_available("castle"));
        assert!(!pool.unlock("castle"));

        assert!(pool.lock("market"));
        assert!(pool.locked().contains("market"));
        assert!(!pool.lock("market"));
        assert!(disjoint(&pool));
    }

    #[test]
    fn test_unlock_unknown_id_is_a_no_op() {
        let mut pool = NodePool::seed(&catalog());
        let before = pool.clone();
        assert!(!pool.unlock("nowhere"));
        assert!(!pool.lock("nowhere"));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_emergency_unlock_releases_in_id_order() {
        let mut pool = NodePool::seed(&catalog());
        let released = pool.emergency_unlock(EMERGENCY_UNLOCK_COUNT);
        assert_eq!(released, vec!["abyss", "castle", "dragon"]);
        assert_eq!(pool.locked().iter().collect::<Vec<_>>(), vec!["void"]);
        assert_eq!(pool.emergency_unlock(3), vec!["void"]);
        assert!(pool.emergency_unlock(3).is_empty());
    }

    #[test]
    fn test_from_lists_enforces_disjoint_sets() {
        let pool = NodePool::from_lists(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["b".into(), "c".into()],
            vec!["c".into()],
        );
        assert_eq!(pool.available().iter().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(pool.locked().iter().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(pool.completed().iter().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_reconcile_drops_unknown_and_seeds_new_nodes() {
        let catalog = catalog();
        let mut pool = NodePool::from_lists(
            vec!["market".into(), "ghost".into()],
            vec!["castle".into()],
            vec!["tragedy".into()],
        );
        let dropped = pool.reconcile(&catalog);
        assert_eq!(dropped, vec!["ghost"]);
        assert!(pool.is_available("tavern"));
        assert!(pool.locked().contains("dragon"));
        assert!(pool.completed().contains("tragedy"));
        assert!(!pool.is_available("tragedy"));
        assert!(disjoint(&pool));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut pool = NodePool::seed(&catalog());
        pool.unlock("dragon");
        let json = serde_json::to_string(&pool).unwrap();
        let back: NodePool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
    }
}

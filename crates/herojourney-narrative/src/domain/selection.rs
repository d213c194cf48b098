//! Choice selection.
//!
//! Each round offers a small slate drawn from the available nodes. The
//! slate respects the difficulty curve, holds back nodes played in the last
//! few rounds, and spreads across categories before doubling up on any one.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use herojourney_content::domain::catalog::ContentCatalog;
use herojourney_content::domain::nodes::ContentNode;
use herojourney_core::rng::{DeterministicRng, shuffle};
use tracing::debug;

use super::curve::allowed_tiers;
use super::history::{ChoiceRecord, recent_node_ids};
use super::pool::NodePool;

/// Largest slate offered in one round.
pub const MAX_CHOICES: usize = 4;

/// Picks the nodes offered each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceSelector {
    max_choices: usize,
    apply_curve: bool,
}

impl Default for ChoiceSelector {
    fn default() -> Self {
        Self {
            max_choices: MAX_CHOICES,
            apply_curve: true,
        }
    }
}

impl ChoiceSelector {
    /// A selector that ignores the difficulty curve.
    #[must_use]
    pub fn without_curve() -> Self {
        Self {
            apply_curve: false,
            ..Self::default()
        }
    }

    /// Returns up to four distinct available nodes for `round`. An empty
    /// slate means the pool is starved.
    pub fn select(
        &self,
        pool: &NodePool,
        catalog: &ContentCatalog,
        history: &[ChoiceRecord],
        round: u32,
        rng: &mut dyn DeterministicRng,
    ) -> Vec<Arc<ContentNode>> {
        let available: Vec<Arc<ContentNode>> = pool
            .available()
            .iter()
            .filter_map(|id| catalog.get(id).cloned())
            .collect();
        if available.is_empty() {
            return Vec::new();
        }

        let tiered = if self.apply_curve {
            let allowed = allowed_tiers(round);
            let fitting: Vec<_> = available
                .iter()
                .filter(|node| node.fits_tiers(allowed))
                .cloned()
                .collect();
            if fitting.is_empty() {
                debug!(round, "no node fits the difficulty curve, ignoring it");
                available
            } else {
                fitting
            }
        } else {
            available
        };

        let recent: BTreeSet<&str> = recent_node_ids(history).collect();
        let fresh: Vec<_> = tiered
            .iter()
            .filter(|node| !recent.contains(node.id.as_str()))
            .cloned()
            .collect();
        let candidates = if fresh.len() < self.max_choices {
            tiered
        } else {
            fresh
        };

        let slate = self.diversify(candidates, rng);
        debug!(
            round,
            offered = ?slate.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            "slate selected"
        );
        slate
    }

    /// One node per category in random category order, then a random fill
    /// from whatever is left.
    fn diversify(
        &self,
        candidates: Vec<Arc<ContentNode>>,
        rng: &mut dyn DeterministicRng,
    ) -> Vec<Arc<ContentNode>> {
        let mut by_category: BTreeMap<String, Vec<Arc<ContentNode>>> = BTreeMap::new();
        for node in candidates {
            by_category
                .entry(node.category.clone())
                .or_default()
                .push(node);
        }

        let mut groups: Vec<Vec<Arc<ContentNode>>> = by_category.into_values().collect();
        shuffle(&mut groups, rng);

        let mut slate = Vec::with_capacity(self.max_choices);
        let mut leftover = Vec::new();
        for mut group in groups {
            shuffle(&mut group, rng);
            let mut members = group.into_iter();
            if slate.len() < self.max_choices {
                slate.extend(members.next());
            }
            leftover.extend(members);
        }

        if slate.len() < self.max_choices {
            shuffle(&mut leftover, rng);
            let missing = self.max_choices - slate.len();
            slate.extend(leftover.into_iter().take(missing));
        }
        slate
    }
}

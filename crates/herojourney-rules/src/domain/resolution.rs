//! Outcome resolution.
//!
//! Outcomes are tried in ascending priority order (ties keep content
//! order) and the first whose requirements the hero's effective stats meet
//! wins. A node without any reachable outcome resolves to its last sorted
//! outcome rather than failing.

use herojourney_character::domain::stats::{StatBlock, StatType};
use herojourney_content::domain::nodes::{ContentNode, Outcome, StatRequirements};
use herojourney_core::error::DomainError;
use tracing::{debug, error};

/// The outcome picked for a played node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub outcome: &'a Outcome,
    /// The satisfied requirement with the highest threshold, if any.
    pub passed_check: Option<StatType>,
    /// True when no outcome matched and the last one was used instead.
    pub fell_back: bool,
}

/// Picks the outcome of `node` for a hero with `stats`.
///
/// # Errors
///
/// Returns `DomainError::InvalidChoice` if the node has no outcomes.
pub fn resolve_outcome<'a>(
    node: &'a ContentNode,
    stats: &StatBlock,
) -> Result<Resolution<'a>, DomainError> {
    let mut ordered: Vec<&Outcome> = node.outcomes.iter().collect();
    ordered.sort_by_key(|o| o.priority);

    let Some(last) = ordered.last().copied() else {
        return Err(DomainError::InvalidChoice(format!(
            "node '{}' has no outcomes",
            node.id
        )));
    };

    let (outcome, fell_back) = match ordered
        .iter()
        .find(|o| o.requirements.is_satisfied_by(stats))
    {
        Some(matched) => (*matched, false),
        None => {
            error!(node_id = %node.id, "no outcome matched, using last outcome");
            (last, true)
        }
    };

    let passed_check = passed_check(&outcome.requirements, stats);
    debug!(
        node_id = %node.id,
        outcome = %outcome.description,
        passed = ?passed_check,
        "outcome resolved"
    );

    Ok(Resolution {
        outcome,
        passed_check,
        fell_back,
    })
}

/// Among the positive requirements the hero meets, the one with the highest
/// threshold. Equal thresholds go to the stat declared first.
#[must_use]
pub fn passed_check(requirements: &StatRequirements, stats: &StatBlock) -> Option<StatType> {
    let mut best: Option<(StatType, i32)> = None;
    for (stat, minimum) in requirements.positive() {
        if stats.effective_stat(stat) < minimum {
            continue;
        }
        if best.is_none_or(|(_, top)| minimum > top) {
            best = Some((stat, minimum));
        }
    }
    best.map(|(stat, _)| stat)
}

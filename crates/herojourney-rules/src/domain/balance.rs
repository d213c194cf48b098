//! Content balance analysis.
//!
//! Projects the average mental-state drift per outcome across a whole
//! playthrough to flag content that drives every hero mad or never builds
//! tension.

use std::fmt;

use herojourney_content::domain::catalog::ContentCatalog;
use serde::Serialize;

/// Projected madness at or above this is too hard.
pub const TOO_HARD_MADNESS: f64 = 100.0;
/// Projected madness below this is too easy.
pub const TOO_EASY_MADNESS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceVerdict {
    TooHard,
    TooEasy,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub node_count: usize,
    pub horizon: u32,
    pub average_motivation_change: f64,
    pub average_madness_change: f64,
    pub projected_motivation: f64,
    pub projected_madness: f64,
    pub verdict: BalanceVerdict,
}

/// Averages every outcome's motivation and madness deltas and projects
/// them over `horizon` rounds.
#[must_use]
pub fn analyze_balance(catalog: &ContentCatalog, horizon: u32) -> BalanceReport {
    let (count, motivation, madness) = catalog
        .nodes()
        .flat_map(|node| node.outcomes.iter())
        .fold((0u32, 0i64, 0i64), |(n, mot, mad), outcome| {
            (
                n + 1,
                mot + i64::from(outcome.effects.motivation_change),
                mad + i64::from(outcome.effects.madness_change),
            )
        });

    let average = |total: i64| {
        if count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let total = total as f64;
            total / f64::from(count)
        }
    };
    let average_motivation_change = average(motivation);
    let average_madness_change = average(madness);
    let projected_motivation = average_motivation_change * f64::from(horizon);
    let projected_madness = average_madness_change * f64::from(horizon);

    let verdict = if projected_madness >= TOO_HARD_MADNESS {
        BalanceVerdict::TooHard
    } else if projected_madness < TOO_EASY_MADNESS {
        BalanceVerdict::TooEasy
    } else {
        BalanceVerdict::Balanced
    };

    BalanceReport {
        node_count: catalog.len(),
        horizon,
        average_motivation_change,
        average_madness_change,
        projected_motivation,
        projected_madness,
        verdict,
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== GAME BALANCE ANALYSIS ===")?;
        writeln!(f, "Total Nodes: {}", self.node_count)?;
        writeln!(f, "Max Months: {}", self.horizon)?;
        writeln!(f)?;
        writeln!(f, "Average Motivation Change: {:.2}", self.average_motivation_change)?;
        writeln!(f, "Average Madness Change: {:.2}", self.average_madness_change)?;
        writeln!(f)?;
        writeln!(f, "Expected after {} months:", self.horizon)?;
        writeln!(f, "  Total Motivation: {:+.1}", self.projected_motivation)?;
        writeln!(f, "  Total Madness: {:+.1}", self.projected_madness)?;
        writeln!(f)?;
        match self.verdict {
            BalanceVerdict::TooHard => {
                writeln!(f, "WARNING: Game is too hard! Average player will go insane.")
            }
            BalanceVerdict::TooEasy => {
                writeln!(f, "WARNING: Game may be too easy! Not enough tension.")
            }
            BalanceVerdict::Balanced => writeln!(f, "Balance looks reasonable."),
        }
    }
}

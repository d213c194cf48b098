//! Round and choice results handed to the caller.

use std::fmt;
use std::sync::Arc;

use herojourney_character::domain::stats::{StatBlock, StatType, TerminalReason};
use herojourney_content::domain::nodes::{ContentNode, Outcome};
use herojourney_rules::domain::effects::AppliedEffects;
use serde::{Deserialize, Serialize};

/// Why a playthrough ended before the final confrontation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    Madness,
    SelfAwareness,
    /// The pool stayed empty after an emergency unlock.
    NoPathsAvailable,
}

impl GameOverReason {
    /// Short player-facing reason, e.g. for the game over banner.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            GameOverReason::Madness => TerminalReason::Madness.message(),
            GameOverReason::SelfAwareness => TerminalReason::SelfAwareness.message(),
            GameOverReason::NoPathsAvailable => "No paths available",
        }
    }
}

impl From<TerminalReason> for GameOverReason {
    fn from(reason: TerminalReason) -> Self {
        match reason {
            TerminalReason::Madness => GameOverReason::Madness,
            TerminalReason::SelfAwareness => GameOverReason::SelfAwareness,
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Payload of a round that offers choices.
#[derive(Debug, Clone)]
pub struct RoundStart {
    /// The round that just began.
    pub round: u32,
    /// Round after which the final confrontation opens.
    pub horizon: u32,
    /// The slate on offer, at most four distinct nodes.
    pub choices: Vec<Arc<ContentNode>>,
    /// Hero stats going into the round.
    pub stats: StatBlock,
}

/// Payload of a game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub reason: GameOverReason,
    pub message: String,
    /// The chronicle of the run.
    pub log: String,
}

/// What `start_round` produced.
#[derive(Debug, Clone)]
pub enum RoundResult {
    Continue(RoundStart),
    GameOver(GameOver),
    FinalBoss { stats: StatBlock },
}

/// Payload of a resolved choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub round: u32,
    pub node_id: String,
    pub node_title: String,
    pub outcome: Outcome,
    pub passed_check: Option<StatType>,
    pub effects: AppliedEffects,
    /// True when no outcome's requirements were met.
    pub fell_back: bool,
    pub before: StatBlock,
    pub after: StatBlock,
    /// Nodes this choice moved from locked to available.
    pub unlocked: Vec<String>,
    /// Nodes this choice moved from available to locked.
    pub locked: Vec<String>,
}

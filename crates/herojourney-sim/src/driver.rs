//! Auto-play loop.
//!
//! Plays the first offered node every round, autosaving after each choice,
//! and fights the final confrontation with the strongest strategy.

use herojourney_character::domain::stats::StatBlock;
use herojourney_core::clock::Clock;
use herojourney_core::config::EngineConfig;
use herojourney_core::error::DomainError;
use herojourney_core::repository::SaveRepository;
use herojourney_rules::domain::confrontation::{Strategy, evaluate_all};
use herojourney_session::application::command_handlers::handle_autosave;
use herojourney_session::domain::playthrough::Playthrough;
use herojourney_session::domain::results::{GameOverReason, RoundResult};
use tracing::{debug, info, warn};

/// How an auto-played run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingKind {
    GameOver(GameOverReason),
    Victory(Strategy),
    Defeat(Strategy),
}

/// The finished run and the text to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ending {
    pub kind: EndingKind,
    pub months: u32,
    pub text: String,
}

/// The strategy closest to meeting its requirements. Ties go to the
/// earlier strategy in `Strategy::ALL`.
#[must_use]
pub fn strongest_strategy(stats: &StatBlock) -> Strategy {
    let mut best: Option<(Strategy, f64)> = None;
    for result in evaluate_all(stats) {
        let readiness = result.readiness();
        if best.is_none_or(|(_, top)| readiness > top) {
            best = Some((result.strategy, readiness));
        }
    }
    best.map_or(Strategy::HandToHand, |(strategy, _)| strategy)
}

/// Plays `playthrough` to its end.
///
/// Autosave failures are logged and play continues.
///
/// # Errors
///
/// Returns `DomainError` if the engine rejects a round or a choice.
pub fn autoplay(
    playthrough: &mut Playthrough,
    config: &EngineConfig,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<Ending, DomainError> {
    loop {
        match playthrough.start_round()? {
            RoundResult::Continue(start) => {
                let Some(node) = start.choices.first() else {
                    return Err(DomainError::Validation(format!(
                        "round {} offered no choices",
                        start.round
                    )));
                };
                let outcome = playthrough.make_choice(&node.id)?;
                debug!(
                    round = outcome.round,
                    node_id = %outcome.node_id,
                    outcome = %outcome.outcome.description,
                    "choice made"
                );
                if let Err(e) = handle_autosave(playthrough, config, clock, repo) {
                    warn!(error = %e, "autosave failed");
                }
            }
            RoundResult::GameOver(over) => {
                return Ok(Ending {
                    kind: EndingKind::GameOver(over.reason),
                    months: playthrough.months_played(),
                    text: format!("GAME OVER: {}\n\n{}", over.message, over.log),
                });
            }
            RoundResult::FinalBoss { stats } => {
                let strategy = strongest_strategy(&stats);
                info!(%strategy, "facing the final enemy");
                let result = playthrough.confront(strategy)?;
                let kind = if result.success {
                    EndingKind::Victory(strategy)
                } else {
                    EndingKind::Defeat(strategy)
                };
                return Ok(Ending {
                    kind,
                    months: playthrough.months_played(),
                    text: result.narrative,
                });
            }
        }
    }
}

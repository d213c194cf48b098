//! The playthrough aggregate and its round engine.
//!
//! A playthrough moves through rounds until the hero reaches a terminal
//! mental state, the pool starves, or the round counter passes the horizon
//! and the final confrontation opens. Each transition is a returned value;
//! nothing here panics on bad input.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use herojourney_character::application::hero_creation::create_hero;
use herojourney_character::domain::stats::StatBlock;
use herojourney_content::domain::catalog::ContentCatalog;
use herojourney_content::domain::nodes::ContentNode;
use herojourney_core::config::{EngineConfig, StatDeltaPolicy};
use herojourney_core::error::DomainError;
use herojourney_core::rng::DeterministicRng;
use herojourney_narrative::domain::chronicle::chronicle;
use herojourney_narrative::domain::history::ChoiceRecord;
use herojourney_narrative::domain::pool::{EMERGENCY_UNLOCK_COUNT, NodePool};
use herojourney_narrative::domain::selection::ChoiceSelector;
use herojourney_rules::domain::confrontation::{ConfrontationResult, Strategy, evaluate};
use herojourney_rules::domain::effects::apply_outcome;
use herojourney_rules::domain::resolution::resolve_outcome;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::results::{ChoiceOutcome, GameOver, GameOverReason, RoundResult, RoundStart};
use super::save_state::{SAVE_FORMAT_VERSION, SaveState};

/// Where the playthrough stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Rounds are being played.
    InProgress,
    /// The horizon has passed; waiting for a strategy.
    FinalBoss,
    /// Ended before the confrontation.
    GameOver { reason: GameOverReason },
    /// The confrontation was won.
    Victory { strategy: Strategy },
    /// The confrontation was lost.
    Defeat { strategy: Strategy },
}

/// One hero's run through the catalog.
pub struct Playthrough {
    id: Uuid,
    catalog: Arc<ContentCatalog>,
    background_id: String,
    stats: StatBlock,
    pool: NodePool,
    history: Vec<ChoiceRecord>,
    round: u32,
    horizon: u32,
    phase: Phase,
    policy: StatDeltaPolicy,
    selector: ChoiceSelector,
    rng: Box<dyn DeterministicRng>,
    resumed_at: DateTime<Utc>,
    prior_play_secs: u64,
}

impl fmt::Debug for Playthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playthrough")
            .field("id", &self.id)
            .field("background_id", &self.background_id)
            .field("round", &self.round)
            .field("horizon", &self.horizon)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Playthrough {
    /// Starts a new playthrough with a hero from `background_id` (or the
    /// default background).
    #[must_use]
    pub fn new(
        catalog: Arc<ContentCatalog>,
        config: &EngineConfig,
        background_id: Option<&str>,
        rng: Box<dyn DeterministicRng>,
        now: DateTime<Utc>,
    ) -> Self {
        let hero = create_hero(background_id);
        let pool = NodePool::seed(&catalog);
        let id = Uuid::new_v4();
        info!(
            playthrough_id = %id,
            background_id = hero.background.id,
            horizon = config.horizon,
            nodes = catalog.len(),
            "playthrough started"
        );

        Self {
            id,
            catalog,
            background_id: hero.background.id.to_owned(),
            stats: hero.stats,
            pool,
            history: Vec::new(),
            round: 0,
            horizon: config.horizon,
            phase: Phase::InProgress,
            policy: config.stat_delta_policy,
            selector: ChoiceSelector::default(),
            rng,
            resumed_at: now,
            prior_play_secs: 0,
        }
    }

    /// Replaces the round selector.
    #[must_use]
    pub fn with_selector(mut self, selector: ChoiceSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn background_id(&self) -> &str {
        &self.background_id
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<ContentCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    #[must_use]
    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    #[must_use]
    pub fn history(&self) -> &[ChoiceRecord] {
        &self.history
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Months elapsed, capped at the horizon.
    #[must_use]
    pub fn months_played(&self) -> u32 {
        self.round.min(self.horizon)
    }

    /// The chronicle of the run so far.
    #[must_use]
    pub fn story_log(&self) -> String {
        chronicle(&self.history, &self.stats, self.months_played())
    }

    /// Advances to the next round.
    ///
    /// Checks, in order: terminal mental state, horizon passed, then builds
    /// the slate. An empty slate triggers one emergency unlock and a retry
    /// before the run ends with no paths available. Calling this again after
    /// a game over or while the confrontation is pending repeats that result
    /// without advancing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the confrontation has already
    /// been fought.
    pub fn start_round(&mut self) -> Result<RoundResult, DomainError> {
        match self.phase {
            Phase::InProgress => {}
            Phase::FinalBoss => {
                return Ok(RoundResult::FinalBoss {
                    stats: self.stats.clone(),
                });
            }
            Phase::GameOver { reason } => return Ok(RoundResult::GameOver(self.game_over(reason))),
            Phase::Victory { .. } | Phase::Defeat { .. } => {
                return Err(DomainError::Validation(
                    "the playthrough has already concluded".to_owned(),
                ));
            }
        }

        self.round += 1;

        if let Some(reason) = self.stats.terminal_reason() {
            return Ok(RoundResult::GameOver(self.end(reason.into())));
        }

        if self.round > self.horizon {
            self.phase = Phase::FinalBoss;
            info!(playthrough_id = %self.id, round = self.round, "final confrontation reached");
            return Ok(RoundResult::FinalBoss {
                stats: self.stats.clone(),
            });
        }

        let mut choices = self.select();
        if choices.is_empty() {
            let released = self.pool.emergency_unlock(EMERGENCY_UNLOCK_COUNT);
            warn!(
                playthrough_id = %self.id,
                round = self.round,
                released = released.len(),
                "no choices available, retrying after emergency unlock"
            );
            choices = self.select();
        }
        if choices.is_empty() {
            return Ok(RoundResult::GameOver(self.end(GameOverReason::NoPathsAvailable)));
        }

        info!(
            playthrough_id = %self.id,
            round = self.round,
            horizon = self.horizon,
            offered = choices.len(),
            "round started"
        );
        Ok(RoundResult::Continue(RoundStart {
            round: self.round,
            horizon: self.horizon,
            choices,
            stats: self.stats.clone(),
        }))
    }

    /// Plays `node_id` in the current round.
    ///
    /// The node does not have to be on the current slate, only in the
    /// catalog. Each round takes exactly one choice; the next one needs a
    /// fresh `start_round`. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no round is in progress or the
    /// current round already has its choice, and
    /// `DomainError::InvalidChoice` if the node is unknown or has no
    /// outcomes.
    pub fn make_choice(&mut self, node_id: &str) -> Result<ChoiceOutcome, DomainError> {
        if self.phase != Phase::InProgress {
            return Err(DomainError::Validation(
                "the playthrough is not accepting choices".to_owned(),
            ));
        }
        if self.round == 0 {
            return Err(DomainError::Validation("no round has started".to_owned()));
        }
        if self.history.last().is_some_and(|r| r.round == self.round) {
            return Err(DomainError::Validation(format!(
                "round {} already has a choice",
                self.round
            )));
        }

        let node = self
            .catalog
            .get(node_id)
            .cloned()
            .ok_or_else(|| DomainError::InvalidChoice(format!("unknown node '{node_id}'")))?;
        let resolution = resolve_outcome(&node, &self.stats)?;
        let outcome = resolution.outcome.clone();
        let passed_check = resolution.passed_check;

        let before = self.stats.clone();
        let effects = apply_outcome(&mut self.stats, &outcome, passed_check, self.policy);

        let mut unlocked = Vec::new();
        for id in &outcome.unlocks_nodes {
            if self.pool.unlock(id) {
                unlocked.push(id.clone());
            }
        }
        let mut locked = Vec::new();
        for id in &outcome.locks_nodes {
            if self.pool.lock(id) {
                locked.push(id.clone());
            }
        }
        self.pool.mark_completed(&node);

        self.history.push(ChoiceRecord {
            round: self.round,
            node_id: node.id.clone(),
            node_title: node.title.clone(),
            outcome_description: outcome.description.clone(),
            stats: self.stats.clone(),
            result_text: outcome.effects.result_text.clone(),
        });

        info!(
            playthrough_id = %self.id,
            round = self.round,
            node_id = %node.id,
            passed = ?passed_check,
            "choice resolved"
        );

        Ok(ChoiceOutcome {
            round: self.round,
            node_id: node.id.clone(),
            node_title: node.title.clone(),
            outcome,
            passed_check,
            effects,
            fell_back: resolution.fell_back,
            before,
            after: self.stats.clone(),
            unlocked,
            locked,
        })
    }

    /// Fights the final confrontation with `strategy`. The result is final.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the playthrough is waiting
    /// at the final confrontation.
    pub fn confront(&mut self, strategy: Strategy) -> Result<ConfrontationResult, DomainError> {
        if self.phase != Phase::FinalBoss {
            return Err(DomainError::Validation(
                "the final confrontation is not open".to_owned(),
            ));
        }

        let result = evaluate(strategy, &self.stats);
        self.phase = if result.success {
            Phase::Victory { strategy }
        } else {
            Phase::Defeat { strategy }
        };
        info!(
            playthrough_id = %self.id,
            strategy = strategy.display_name(),
            success = result.success,
            "final confrontation resolved"
        );
        Ok(result)
    }

    /// Captures the playthrough for saving. Play time includes the time
    /// since the playthrough was started or last restored, up to `now`.
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> SaveState {
        let session_secs = u64::try_from((now - self.resumed_at).num_seconds()).unwrap_or(0);
        SaveState {
            version: SAVE_FORMAT_VERSION,
            playthrough_id: self.id,
            background_id: self.background_id.clone(),
            stats: self.stats.clone(),
            round: self.round,
            horizon: self.horizon,
            phase: self.phase,
            available: self.pool.available().iter().cloned().collect(),
            locked: self.pool.locked().iter().cloned().collect(),
            completed: self.pool.completed().iter().cloned().collect(),
            history: self.history.clone(),
            catalog_fingerprint: self.catalog.fingerprint(),
            total_play_time_secs: self.prior_play_secs.saturating_add(session_secs),
        }
    }

    /// Resumes a playthrough from a snapshot.
    ///
    /// A snapshot taken against different content still loads: pool ids the
    /// catalog no longer knows are dropped and new catalog nodes are seeded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the snapshot layout version is
    /// not supported or the horizon is zero.
    pub fn restore(
        state: SaveState,
        catalog: Arc<ContentCatalog>,
        policy: StatDeltaPolicy,
        rng: Box<dyn DeterministicRng>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if state.version != SAVE_FORMAT_VERSION {
            return Err(DomainError::Validation(format!(
                "unsupported save version {}",
                state.version
            )));
        }
        if state.horizon == 0 {
            return Err(DomainError::Validation("saved horizon is zero".to_owned()));
        }

        let mut pool = NodePool::from_lists(state.available, state.locked, state.completed);
        if state.catalog_fingerprint != catalog.fingerprint() {
            warn!(
                playthrough_id = %state.playthrough_id,
                "save was made with different content; reconciling node pool"
            );
            pool.reconcile(&catalog);
        }

        info!(
            playthrough_id = %state.playthrough_id,
            round = state.round,
            "playthrough restored"
        );

        Ok(Self {
            id: state.playthrough_id,
            catalog,
            background_id: state.background_id,
            stats: state.stats,
            pool,
            history: state.history,
            round: state.round,
            horizon: state.horizon,
            phase: state.phase,
            policy,
            selector: ChoiceSelector::default(),
            rng,
            resumed_at: now,
            prior_play_secs: state.total_play_time_secs,
        })
    }

    fn select(&mut self) -> Vec<Arc<ContentNode>> {
        self.selector.select(
            &self.pool,
            &self.catalog,
            &self.history,
            self.round,
            self.rng.as_mut(),
        )
    }

    fn end(&mut self, reason: GameOverReason) -> GameOver {
        self.phase = Phase::GameOver { reason };
        info!(playthrough_id = %self.id, round = self.round, %reason, "game over");
        self.game_over(reason)
    }

    fn game_over(&self, reason: GameOverReason) -> GameOver {
        GameOver {
            reason,
            message: reason.message().to_owned(),
            log: self.story_log(),
        }
    }
}

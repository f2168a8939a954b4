//! Session controller: levels, countdown and overlays.
//!
//! The host owns one `SessionController` and feeds it three kinds of input:
//! - `click(card)` when the player picks a card
//! - `advance(elapsed_ms)` from its frame or timer loop
//! - `acknowledge()` when the player presses the overlay button
//!
//! After each call the host drains the queued events with
//! `drain_events()` and hands them to its collaborators.
//!
//! ## Deferred work
//!
//! Flip-backs, overlay announcements and countdown ticks are scheduler
//! tasks. Starting a new game cancels all of them; moving to the next level
//! cancels the previous level's deferrals. The countdown keeps running
//! across levels.
//!
//! ```
//! use arcana_match::core::GameConfig;
//! use arcana_match::session::SessionController;
//!
//! let mut session = SessionController::new(GameConfig::new().with_seed(7)).unwrap();
//! assert_eq!(session.state().cards.len(), 4);
//!
//! session.advance(3_000);
//! assert_eq!(session.state().remaining_time, 597);
//! ```

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::hud::Hud;
use super::scheduler::{Scheduler, TaskHandle};
use crate::cards::Deal;
use crate::core::config::GameConfig;
use crate::core::entity::CardId;
use crate::core::error::ConfigError;
use crate::core::rng::{GameRng, GameRngState};
use crate::core::state::{pairs_for_level, SessionPhase, SessionState};
use crate::events::{EventBatch, GameEvent, OverlayPrompt};
use crate::rules::engine::{self, FlipOutcome};

/// What pressing the overlay button does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acknowledgement {
    /// Deal the next level.
    NextLevel,
    /// Restart after finishing the final level.
    PlayAgain,
    /// Restart after the countdown ran out.
    NewJourney,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionTask {
    CountdownTick,
    ResolveMismatch,
    AnnounceLevelComplete,
    AnnounceGameComplete,
}

/// Owner of the session state and its timers.
#[derive(Debug)]
pub struct SessionController {
    config: GameConfig,
    /// Root RNG; every game deals from a fresh fork.
    rng: GameRng,
    deal_rng: GameRng,
    state: SessionState,
    scheduler: Scheduler<SessionTask>,
    countdown: Option<TaskHandle>,
    /// Mismatch flip-back or overlay announcement. Never both.
    pending: Option<TaskHandle>,
    /// The visible overlay and its single acknowledgement.
    prompt: Option<(OverlayPrompt, Acknowledgement)>,
    events: EventBatch,
}

impl SessionController {
    /// Validate `config` and start the first game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = GameRng::new(config.seed);
        let mut controller = Self {
            deal_rng: rng.clone(),
            rng,
            state: SessionState::new(&config),
            scheduler: Scheduler::new(),
            countdown: None,
            pending: None,
            prompt: None,
            events: EventBatch::new(),
            config,
        };
        controller.start_new_game();
        Ok(controller)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Overlay currently waiting for acknowledgement.
    #[must_use]
    pub fn active_prompt(&self) -> Option<&OverlayPrompt> {
        self.prompt.as_ref().map(|(prompt, _)| prompt)
    }

    /// What `acknowledge()` would do right now.
    #[must_use]
    pub fn pending_acknowledgement(&self) -> Option<Acknowledgement> {
        self.prompt.as_ref().map(|(_, ack)| *ack)
    }

    /// Virtual time in milliseconds since the controller was created.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some_and(|h| self.scheduler.is_pending(h))
    }

    /// Position of the dealing RNG, for reproducing a session.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.deal_rng.state()
    }

    #[must_use]
    pub fn hud(&self) -> Hud {
        Hud {
            level: self.state.current_level,
            max_level: self.config.max_level,
            score: self.state.score,
            pairs: self.state.pairs_in_level,
            remaining_time: self.state.remaining_time,
            levels_completed: self.state.levels_completed,
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> EventBatch {
        std::mem::take(&mut self.events)
    }

    // === Host input ===

    /// Discard the current game and start over at level 1.
    pub fn start_new_game(&mut self) {
        self.scheduler.cancel_all();
        self.countdown = None;
        self.pending = None;
        if self.prompt.take().is_some() {
            self.events.push(GameEvent::PromptDismissed);
        }

        self.deal_rng = self.rng.fork();
        self.state = SessionState::new(&self.config);
        info!("new game: {} levels, {} time units", self.config.max_level, self.config.time_budget);

        self.deal_level();
        self.start_countdown();
    }

    /// Flip a card picked by the player.
    pub fn click(&mut self, card: CardId) -> FlipOutcome {
        let outcome = engine::flip(&mut self.state, card);

        match outcome {
            FlipOutcome::Ignored(reason) => {
                trace!("ignored flip of {card}: {reason:?}");
            }
            FlipOutcome::FirstPick(first) => {
                self.events.push(GameEvent::CardFlipped { card: first, face_up: true });
            }
            FlipOutcome::Matched { first, second, value, level_cleared } => {
                self.events.push(GameEvent::CardFlipped { card: second, face_up: true });
                self.events.push(GameEvent::PairMatched { first, second, value });
                self.events.push(GameEvent::ScoreChanged {
                    score: self.state.score,
                    pairs: self.state.pairs_in_level,
                });
                if level_cleared {
                    self.on_level_cleared();
                }
            }
            FlipOutcome::Mismatched { first, second } => {
                self.events.push(GameEvent::CardFlipped { card: second, face_up: true });
                self.events.push(GameEvent::Mismatch { first, second });
                self.replace_pending(self.config.mismatch_delay_ms, SessionTask::ResolveMismatch);
            }
        }

        outcome
    }

    /// Let `elapsed_ms` pass, running every task that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let deadline = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some((handle, task)) = self.scheduler.pop_due(deadline) {
            self.run(handle, task);
        }
        self.scheduler.settle(deadline);
    }

    /// Press the overlay button.
    ///
    /// Runs the pending acknowledgement exactly once; returns `None` when no
    /// overlay is showing.
    pub fn acknowledge(&mut self) -> Option<Acknowledgement> {
        let (_, ack) = self.prompt.take()?;
        self.events.push(GameEvent::PromptDismissed);

        match ack {
            Acknowledgement::NextLevel => self.next_level(),
            Acknowledgement::PlayAgain | Acknowledgement::NewJourney => self.start_new_game(),
        }
        Some(ack)
    }

    // === Transitions ===

    fn deal_level(&mut self) {
        let deal = Deal::new(
            self.state.pairs_in_level,
            self.state.next_card_id(),
            &self.config.table,
            &mut self.deal_rng,
        );
        let cards = deal.cards.clone();
        let layout = deal.layout;
        self.state.install_deal(deal);

        debug!(
            "dealt level {}: {} pairs on a {} grid",
            self.state.current_level, self.state.pairs_in_level, layout
        );
        self.events.push(GameEvent::LevelDealt {
            level: self.state.current_level,
            pairs: self.state.pairs_in_level,
            layout,
            cards,
        });
    }

    /// The countdown runs once per game, from the first level's deal.
    fn start_countdown(&mut self) {
        if self.state.timer_started || self.state.current_level != 1 {
            return;
        }
        self.state.timer_started = true;
        self.countdown = Some(
            self.scheduler
                .schedule_repeating(self.config.tick_interval_ms, SessionTask::CountdownTick),
        );
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn replace_pending(&mut self, delay_ms: u64, task: SessionTask) {
        if let Some(old) = self.pending.take() {
            self.scheduler.cancel(old);
        }
        self.pending = Some(self.scheduler.schedule(delay_ms, task));
    }

    fn on_level_cleared(&mut self) {
        self.state.levels_completed += 1;
        let level = self.state.current_level;

        if self.state.on_final_level(self.config.max_level) {
            self.stop_countdown();
            let score = self.state.compute_final_score();
            self.state.final_score = Some(score);
            self.state.phase = SessionPhase::GameComplete;
            info!("journey complete after level {level}, final score {score}");

            self.events.push(GameEvent::GameComplete { final_score: score });
            self.replace_pending(self.config.level_complete_delay_ms, SessionTask::AnnounceGameComplete);
        } else {
            self.state.phase = SessionPhase::LevelCleared;
            debug!("level {level} cleared with {} time units left", self.state.remaining_time);

            self.events.push(GameEvent::LevelComplete { level });
            self.replace_pending(self.config.level_complete_delay_ms, SessionTask::AnnounceLevelComplete);
        }
    }

    fn next_level(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }

        self.state.current_level += 1;
        self.state.pairs_in_level = pairs_for_level(self.state.current_level, self.config.max_level);
        self.state.score = 0;
        self.state.phase = SessionPhase::Playing;

        self.deal_level();
        self.events.push(GameEvent::ScoreChanged {
            score: 0,
            pairs: self.state.pairs_in_level,
        });
    }

    fn run(&mut self, handle: TaskHandle, task: SessionTask) {
        if task != SessionTask::CountdownTick && self.pending == Some(handle) {
            self.pending = None;
        }

        match task {
            SessionTask::CountdownTick => self.tick(),
            SessionTask::ResolveMismatch => {
                if let Some((first, second)) = engine::resolve_mismatch(&mut self.state) {
                    self.events.push(GameEvent::CardFlipped { card: first, face_up: false });
                    self.events.push(GameEvent::CardFlipped { card: second, face_up: false });
                }
            }
            SessionTask::AnnounceLevelComplete => {
                let level = self.state.current_level;
                let next_pairs = pairs_for_level(level + 1, self.config.max_level);
                self.show_prompt(OverlayPrompt::level_complete(level, next_pairs), Acknowledgement::NextLevel);
            }
            SessionTask::AnnounceGameComplete => {
                let score = self.state.final_score.unwrap_or_else(|| self.state.compute_final_score());
                self.show_prompt(OverlayPrompt::game_complete(score), Acknowledgement::PlayAgain);
            }
        }
    }

    fn tick(&mut self) {
        if self.state.phase.is_terminal() {
            self.stop_countdown();
            return;
        }

        self.state.remaining_time = self.state.remaining_time.saturating_sub(1);
        trace!("tick: {} left", self.state.remaining_time);
        self.events.push(GameEvent::TimerTicked {
            remaining: self.state.remaining_time,
        });

        if self.state.remaining_time == 0 {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.countdown = None;
        self.pending = None;

        let score = self.state.compute_final_score();
        self.state.final_score = Some(score);
        self.state.phase = SessionPhase::GameOver;
        info!(
            "time ran out on level {} after {} levels, final score {score}",
            self.state.current_level, self.state.levels_completed
        );

        self.events.push(GameEvent::GameOver { final_score: score });
        self.show_prompt(
            OverlayPrompt::game_over(self.state.levels_completed, score),
            Acknowledgement::NewJourney,
        );
    }

    /// Show `prompt`, replacing any overlay and its acknowledgement.
    fn show_prompt(&mut self, prompt: OverlayPrompt, ack: Acknowledgement) {
        self.events.push(GameEvent::Prompt(prompt.clone()));
        self.prompt = Some((prompt, ack));
    }
}

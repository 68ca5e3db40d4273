//! Orchestrates selection, matching, timing and persistence for the daily round.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{
    hooks::{AccessProvider, AlertClearer, NoAlerts, StaticAccess},
    models::{GameRound, GameState, GuessOutcome, HintKind, SessionEvent},
};
use crate::{
    catalog::Catalog,
    clock::{seconds_between, Clock},
    error::SessionError,
    matcher::{is_guess_correct, normalize},
    selector::{day_index, select_daily_station},
    stats::GameStats,
    store::Store,
};

/// Owner of the current round and driver of the game state machine.
///
/// All mutation goes through `&mut self`; callers that share a manager
/// across threads wrap it in a single mutex.
pub struct SessionManager {
    catalog: Catalog,
    store: Store,
    clock: Arc<dyn Clock>,
    access: Arc<dyn AccessProvider>,
    alerts: Arc<dyn AlertClearer>,
    day_offset: u32,
    state: GameState,
    current: Option<GameRound>,
    session_started_at: Option<DateTime<Utc>>,
    listeners: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl SessionManager {
    /// Build a manager and reconcile it against persisted state.
    ///
    /// The player starts without unlimited plays; see [`Self::with_access`].
    pub fn new(catalog: Catalog, store: Store, clock: Arc<dyn Clock>) -> Self {
        let mut manager = Self {
            catalog,
            store,
            clock,
            access: Arc::new(StaticAccess(false)),
            alerts: Arc::new(NoAlerts),
            day_offset: 0,
            state: GameState::Waiting,
            current: None,
            session_started_at: None,
            listeners: Vec::new(),
        };
        manager.reconcile();
        manager
    }

    /// Use `access` for quota decisions and reconcile again.
    pub fn with_access(mut self, access: Arc<dyn AccessProvider>) -> Self {
        self.access = access;
        self.reconcile();
        self
    }

    pub fn with_alert_clearer(mut self, alerts: Arc<dyn AlertClearer>) -> Self {
        self.alerts = alerts;
        self
    }

    /// Shift the day index used for selection.
    pub fn with_day_offset(mut self, offset: u32) -> Self {
        self.day_offset = offset;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Round being played, or the one just finished.
    pub fn current_round(&self) -> Option<&GameRound> {
        self.current.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stats(&self) -> GameStats {
        self.store.stats()
    }

    pub fn day_offset(&self) -> u32 {
        self.day_offset
    }

    /// Receive change notifications. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners.push(sender);
        receiver
    }

    pub fn has_unlimited_plays(&self) -> bool {
        self.access.has_unlimited_plays()
    }

    /// Whether a new round may start now.
    pub fn can_play_today(&self) -> bool {
        self.store
            .can_play_today(self.has_unlimited_plays(), self.clock.as_ref())
    }

    /// Re-derive the state from persisted data. Call on app entry.
    pub fn reconcile(&mut self) -> GameState {
        let now = self.clock.now();

        if let Some(existing) = self.store.current_round() {
            if !self.clock.is_same_day(existing.date, now) {
                info!(station = %existing.station.id(), "Discarding round from a previous day");
                self.store.clear_current_round();
            } else if existing.is_completed {
                self.session_started_at = None;
                self.current = Some(existing);
                return self.set_state(GameState::Completed);
            } else {
                if self.session_started_at.is_none() {
                    self.session_started_at = Some(now);
                }
                self.current = Some(existing);
                return self.set_state(GameState::Playing);
            }
        }

        self.session_started_at = None;
        if let Some(last) = self.store.last_completed_round() {
            if self.clock.is_same_day(last.date, now) {
                self.current = Some(last);
                return self.set_state(GameState::Completed);
            }
        }

        self.current = None;
        if self.can_play_today() {
            self.set_state(GameState::Waiting)
        } else {
            self.set_state(GameState::AlreadyPlayed)
        }
    }

    /// Re-poll the access provider, e.g. after a purchase, and reconcile.
    pub fn refresh_access(&mut self) -> GameState {
        debug!(unlimited = self.has_unlimited_plays(), "Access refreshed");
        self.reconcile()
    }

    /// Start a new round with today's station.
    pub fn start(&mut self) -> Result<&GameRound, SessionError> {
        if self.state == GameState::Playing {
            return Err(SessionError::IllegalTransition {
                state: self.state,
                action: "start a round",
            });
        }

        let unlimited = self.has_unlimited_plays();
        if unlimited && self.current.as_ref().is_some_and(|round| round.is_completed) {
            self.store.clear_current_round();
            self.current = None;
        }

        if !self.store.can_play_today(unlimited, self.clock.as_ref()) {
            let finished_today = self.current.as_ref().is_some_and(|round| {
                round.is_completed && self.clock.is_same_day(round.date, self.clock.now())
            });
            if finished_today {
                self.set_state(GameState::Completed);
            } else {
                self.current = None;
                self.set_state(GameState::AlreadyPlayed);
            }
            return Err(SessionError::QuotaExhausted);
        }

        if let Err(err) = self.alerts.clear_pending_alert() {
            warn!(?err, "Failed to clear pending alert");
        }

        let now = self.clock.now();
        let day = day_index(self.clock.calendar_day(now), self.day_offset);
        let recent = self.store.recent_station_ids();
        let station = select_daily_station(&self.catalog, &recent, day)
            .ok_or(SessionError::NoEligibleStation)?
            .clone();

        let round = GameRound::new(station, now);
        self.store.save_current_round(&round);
        info!(station = %round.station.id(), day, "Round started");

        self.session_started_at = Some(now);
        self.set_state(GameState::Playing);
        let round: &GameRound = self.current.insert(round);
        Ok(round)
    }

    /// Submit a guess for the current round.
    ///
    /// Blank guesses are rejected without using up a guess.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessOutcome, SessionError> {
        let guess = guess.trim();
        if guess.is_empty() || normalize(guess).is_empty() {
            return Err(SessionError::InvalidGuess);
        }
        if self.state != GameState::Playing {
            return Err(SessionError::IllegalTransition {
                state: self.state,
                action: "guess",
            });
        }

        let now = self.clock.now();
        let elapsed = self.elapsed_at(now);
        let Some(round) = self
            .current
            .as_mut()
            .filter(|round| !round.is_completed && round.remaining_guesses() > 0)
        else {
            return Err(SessionError::IllegalTransition {
                state: self.state,
                action: "guess",
            });
        };

        round.guesses.push(guess.to_string());
        let correct = is_guess_correct(guess, &round.station);
        let outcome = if correct {
            GuessOutcome::Correct
        } else if round.remaining_guesses() == 0 {
            GuessOutcome::OutOfGuesses
        } else {
            GuessOutcome::Incorrect {
                remaining: round.remaining_guesses(),
            }
        };
        debug!(
            station = %round.station.id(),
            ?outcome,
            remaining = round.remaining_guesses(),
            "Guess evaluated"
        );

        if outcome.is_final() {
            round.is_completed = true;
            round.is_win = correct;
            round.completion_time = Some(elapsed);
            round.accumulated_elapsed_time = elapsed;
            self.session_started_at = None;
            self.store.complete_round(round.clone(), now);
        } else {
            self.store.save_current_round(round);
        }

        self.emit(SessionEvent::GuessEvaluated {
            guess: guess.to_string(),
            outcome,
        });
        if outcome.is_final() {
            self.emit(SessionEvent::RoundCompleted {
                won: correct,
                seconds: elapsed,
            });
            self.set_state(GameState::Completed);
        }
        Ok(outcome)
    }

    /// Whether the hint is currently offered to the player.
    pub fn can_use_hint(&self, kind: HintKind) -> bool {
        self.state == GameState::Playing
            && self
                .current
                .as_ref()
                .is_some_and(|round| round.can_use_hint(kind))
    }

    /// Reveal a hint. Returns `Ok(false)` when it was already revealed.
    ///
    /// Guess-count eligibility is not enforced here; see [`Self::can_use_hint`].
    pub fn use_hint(&mut self, kind: HintKind) -> Result<bool, SessionError> {
        let action = "use a hint";
        if self.state != GameState::Playing {
            return Err(SessionError::IllegalTransition {
                state: self.state,
                action,
            });
        }
        let Some(round) = self.current.as_mut() else {
            return Err(SessionError::IllegalTransition {
                state: self.state,
                action,
            });
        };
        if !round.use_hint(kind) {
            return Ok(false);
        }
        self.store.save_current_round(round);
        debug!(?kind, "Hint used");
        self.emit(SessionEvent::HintUsed(kind));
        Ok(true)
    }

    /// Seconds spent on the current round; frozen once it is completed.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_at(self.clock.now())
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> f64 {
        let Some(round) = &self.current else {
            return 0.0;
        };
        if round.is_completed {
            return round
                .completion_time
                .unwrap_or(round.accumulated_elapsed_time);
        }
        let live = self
            .session_started_at
            .map(|started| seconds_between(started, now))
            .unwrap_or(0.0);
        (round.accumulated_elapsed_time + live).max(0.0)
    }

    /// App moved to the background: bank the running time.
    pub fn on_suspend(&mut self) {
        let now = self.clock.now();
        let Some(started) = self.session_started_at.take() else {
            return;
        };
        if self.state != GameState::Playing {
            return;
        }
        let Some(round) = self.current.as_mut().filter(|round| !round.is_completed) else {
            return;
        };
        round.accumulated_elapsed_time += seconds_between(started, now);
        self.store.save_current_round(round);
        debug!(
            accumulated = round.accumulated_elapsed_time,
            "Timer paused"
        );
    }

    /// App returned to the foreground: restart the running timer.
    pub fn on_resume(&mut self) {
        let resumable = self.state == GameState::Playing
            && self.session_started_at.is_none()
            && self
                .current
                .as_ref()
                .is_some_and(|round| !round.is_completed);
        if resumable {
            self.session_started_at = Some(self.clock.now());
            debug!("Timer resumed");
        }
    }

    /// Wipe persisted progress and move to a fresh day index.
    pub fn reset(&mut self) {
        self.store.reset();
        self.day_offset = self.day_offset.saturating_add(1);
        self.current = None;
        self.session_started_at = None;
        self.set_state(GameState::Waiting);
    }

    fn set_state(&mut self, next: GameState) -> GameState {
        if self.state != next {
            info!(from = %self.state, to = %next, "Game state changed");
            self.state = next;
            self.emit(SessionEvent::StateChanged(next));
        }
        next
    }

    fn emit(&mut self, event: SessionEvent) {
        self.listeners
            .retain(|listener| listener.send(event.clone()).is_ok());
    }
}

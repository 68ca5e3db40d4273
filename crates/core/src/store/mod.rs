#![allow(missing_docs)]

//! Persistence of the in-progress round, statistics and last-played date.
//!
//! [`Store`] keeps authoritative in-memory copies of the three logical keys
//! and is their only writer. Every mutation updates memory first and then
//! writes through a [`Backend`]. A write that fails is logged, remembered,
//! and retried on the next write; it is never surfaced to callers.

mod backend;
mod worker;

use std::{collections::BTreeSet, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use worker::BackgroundBackend;

use crate::{clock::Clock, error::StoreError, session::GameRound, stats::GameStats};

/// Key holding the in-progress round.
pub const CURRENT_GAME_KEY: &str = "currentGame";
/// Key holding cumulative statistics.
pub const STATS_KEY: &str = "gameStats";
/// Key holding the completion instant of the last finished round.
pub const LAST_PLAYED_KEY: &str = "lastPlayedDate";

/// Durable home of the game's state.
pub struct Store {
    backend: Arc<dyn Backend>,
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    current: Option<GameRound>,
    stats: GameStats,
    last_played: Option<DateTime<Utc>>,
    pending: BTreeSet<&'static str>,
}

impl Store {
    /// Load state from `backend`. Missing or unreadable keys fall back to defaults.
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        let current = load_key::<GameRound>(backend.as_ref(), CURRENT_GAME_KEY);
        let stats = load_key::<GameStats>(backend.as_ref(), STATS_KEY).unwrap_or_default();
        let last_played = load_key::<DateTime<Utc>>(backend.as_ref(), LAST_PLAYED_KEY);
        debug!(
            has_current = current.is_some(),
            games = stats.total_games(),
            "Store opened"
        );
        Self {
            backend,
            state: RwLock::new(StoreState {
                current,
                stats,
                last_played,
                pending: BTreeSet::new(),
            }),
        }
    }

    /// Store with no durable backing beyond process memory.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryBackend::new()))
    }

    pub fn current_round(&self) -> Option<GameRound> {
        self.state.read().current.clone()
    }

    /// Snapshot of the statistics.
    pub fn stats(&self) -> GameStats {
        self.state.read().stats.clone()
    }

    /// Most recent entry in the history.
    pub fn last_completed_round(&self) -> Option<GameRound> {
        self.state.read().stats.last_round().cloned()
    }

    pub fn recent_station_ids(&self) -> Vec<String> {
        self.state.read().stats.recent_station_ids()
    }

    /// When the last round was completed.
    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_played
    }

    /// Keys whose latest value has not reached the backend yet.
    pub fn pending_keys(&self) -> Vec<&'static str> {
        self.state.read().pending.iter().copied().collect()
    }

    /// Whether a new round may start today.
    ///
    /// Unlimited accounts always may; everyone else may unless a round was
    /// completed earlier on the current calendar day.
    pub fn can_play_today(&self, unlimited: bool, clock: &dyn Clock) -> bool {
        if unlimited {
            return true;
        }
        match self.last_played() {
            Some(last) => !clock.is_same_day(last, clock.now()),
            None => true,
        }
    }

    pub fn save_current_round(&self, round: &GameRound) {
        let mut state = self.state.write();
        state.current = Some(round.clone());
        self.persist(&mut state, CURRENT_GAME_KEY);
    }

    pub fn clear_current_round(&self) {
        let mut state = self.state.write();
        state.current = None;
        self.persist(&mut state, CURRENT_GAME_KEY);
    }

    /// Move a finished round into history, update the aggregates, stamp the
    /// last-played date and clear the in-progress key.
    pub fn complete_round(&self, round: GameRound, completed_at: DateTime<Utc>) -> GameStats {
        let mut state = self.state.write();
        let station = round.station.id().to_string();
        let won = round.is_win;
        state.stats.record_round(round);
        state.last_played = Some(completed_at);
        state.current = None;
        self.persist(&mut state, STATS_KEY);
        self.persist(&mut state, LAST_PLAYED_KEY);
        self.persist(&mut state, CURRENT_GAME_KEY);
        info!(%station, won, games = state.stats.total_games(), "Round recorded");
        state.stats.clone()
    }

    /// Forget everything: current round, statistics and last-played date.
    pub fn reset(&self) {
        let mut state = self.state.write();
        let pending = std::mem::take(&mut state.pending);
        *state = StoreState {
            pending,
            ..StoreState::default()
        };
        self.persist(&mut state, CURRENT_GAME_KEY);
        self.persist(&mut state, STATS_KEY);
        self.persist(&mut state, LAST_PLAYED_KEY);
        info!("Store reset");
    }

    fn persist(&self, state: &mut StoreState, key: &'static str) {
        state.pending.insert(key);
        let keys: Vec<&'static str> = state.pending.iter().copied().collect();
        for key in keys {
            match self.write_key(state, key) {
                Ok(()) => {
                    state.pending.remove(key);
                }
                Err(err) => warn!(key, ?err, "Persisting failed; keeping in memory"),
            }
        }
    }

    fn write_key(&self, state: &StoreState, key: &'static str) -> Result<(), StoreError> {
        match key {
            CURRENT_GAME_KEY => match &state.current {
                Some(round) => self.backend.write(key, &encode(key, round)?),
                None => self.backend.remove(key),
            },
            STATS_KEY => self.backend.write(key, &encode(key, &state.stats)?),
            LAST_PLAYED_KEY => match &state.last_played {
                Some(at) => self.backend.write(key, &encode(key, at)?),
                None => self.backend.remove(key),
            },
            _ => Ok(()),
        }
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
        key: key.to_string(),
        source,
    })
}

fn load_key<T: DeserializeOwned>(backend: &dyn Backend, key: &str) -> Option<T> {
    let loaded = backend
        .read(key)
        .and_then(|bytes| bytes.map(|bytes| decode(key, &bytes)).transpose());
    match loaded {
        Ok(value) => value,
        Err(err) => {
            warn!(key, ?err, "Discarding unreadable persisted value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, models::Station};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    fn round(at: DateTime<Utc>) -> GameRound {
        GameRound::new(Station::new("Bank", Vec::new(), "", ""), at)
    }

    #[test]
    fn state_reloads_from_backend() {
        let memory = Arc::new(MemoryBackend::new());
        let store = Store::open(memory.clone());
        let mut current = round(start());
        current.guesses = vec!["Monument".into(), "Bnk".into()];
        store.save_current_round(&current);

        let mut finished = round(start());
        finished.is_completed = true;
        finished.is_win = true;
        store.complete_round(finished.clone(), start());
        store.save_current_round(&current);

        let reopened = Store::open(memory);
        assert_eq!(reopened.current_round(), Some(current));
        assert_eq!(reopened.stats().history(), [finished]);
        assert_eq!(reopened.last_played(), Some(start()));
    }

    #[test]
    fn corrupt_values_fall_back_to_defaults() {
        let memory = Arc::new(MemoryBackend::new());
        memory.insert_raw(CURRENT_GAME_KEY, "{not json");
        memory.insert_raw(STATS_KEY, "42");
        memory.insert_raw(LAST_PLAYED_KEY, "\"yesterday\"");

        let store = Store::open(memory);
        assert!(store.current_round().is_none());
        assert_eq!(store.stats().total_games(), 0);
        assert!(store.last_played().is_none());
    }

    #[test]
    fn completing_clears_current_key() {
        let memory = Arc::new(MemoryBackend::new());
        let store = Store::open(memory.clone());
        let current = round(start());
        store.save_current_round(&current);
        assert!(memory.contains(CURRENT_GAME_KEY));

        store.complete_round(current, start());
        assert!(!memory.contains(CURRENT_GAME_KEY));
        assert!(memory.contains(STATS_KEY));
        assert!(memory.contains(LAST_PLAYED_KEY));
    }

    #[test]
    fn quota_resets_on_next_calendar_day() {
        let clock = ManualClock::new(start());
        let store = Store::in_memory();
        assert!(store.can_play_today(false, &clock));

        store.complete_round(round(start()), clock.now());
        assert!(!store.can_play_today(false, &clock));
        assert!(store.can_play_today(true, &clock));

        clock.advance(Duration::days(1));
        assert!(store.can_play_today(false, &clock));
    }

    #[test]
    fn failed_writes_retry_on_next_write() {
        let memory = Arc::new(MemoryBackend::new());
        let store = Store::open(memory.clone());

        memory.set_fail_writes(true);
        store.complete_round(round(start()), start());
        assert_eq!(store.stats().total_games(), 1);
        assert_eq!(
            store.pending_keys(),
            [CURRENT_GAME_KEY, STATS_KEY, LAST_PLAYED_KEY]
        );

        memory.set_fail_writes(false);
        store.save_current_round(&round(start()));
        assert!(store.pending_keys().is_empty());
        assert_eq!(Store::open(memory).stats().total_games(), 1);
    }

    #[test]
    fn reset_clears_every_key() {
        let memory = Arc::new(MemoryBackend::new());
        let store = Store::open(memory.clone());
        store.complete_round(round(start()), start());
        store.save_current_round(&round(start()));

        store.reset();
        assert!(store.current_round().is_none());
        assert!(store.last_played().is_none());
        assert_eq!(store.stats().total_games(), 0);
        assert!(!memory.contains(CURRENT_GAME_KEY));
        assert!(!memory.contains(LAST_PLAYED_KEY));
    }
}

//! Cumulative statistics over completed rounds.

use std::collections::VecDeque;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{selector::RECENT_CAPACITY, session::GameRound};

/// Counters, history and the recently played ring buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    total_games: u32,
    #[serde(default)]
    total_wins: u32,
    #[serde(default)]
    current_streak: u32,
    #[serde(default)]
    max_streak: u32,
    #[serde(default)]
    total_hints_used: u32,
    #[serde(default)]
    history: Vec<GameRound>,
    #[serde(default)]
    recent_station_ids: VecDeque<String>,
    #[serde(skip)]
    averages: OnceCell<Averages>,
}

/// Averages over winning rounds, stamped with the history length they cover.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Averages {
    history_len: usize,
    guesses: f64,
    completion_time: f64,
}

impl Averages {
    fn compute(history: &[GameRound]) -> Self {
        let mut wins = 0usize;
        let mut guesses = 0usize;
        let mut timed = 0usize;
        let mut seconds = 0.0;
        for round in history.iter().filter(|round| round.is_win) {
            wins += 1;
            guesses += round.guesses.len();
            if let Some(time) = round.completion_time {
                timed += 1;
                seconds += time;
            }
        }
        Self {
            history_len: history.len(),
            guesses: if wins == 0 {
                0.0
            } else {
                guesses as f64 / wins as f64
            },
            completion_time: if timed == 0 {
                0.0
            } else {
                seconds / timed as f64
            },
        }
    }
}

impl GameStats {
    /// Fold a finished round into the counters and history.
    pub fn record_round(&mut self, round: GameRound) {
        self.total_games += 1;
        if round.is_win {
            self.total_wins += 1;
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
        self.total_hints_used += round.hints_used();

        self.recent_station_ids
            .push_back(round.station.id().to_string());
        while self.recent_station_ids.len() > RECENT_CAPACITY {
            self.recent_station_ids.pop_front();
        }

        self.history.push(round);
        self.averages = OnceCell::new();
    }

    /// Completed rounds.
    pub fn total_games(&self) -> u32 {
        self.total_games
    }

    /// Rounds won.
    pub fn total_wins(&self) -> u32 {
        self.total_wins
    }

    /// Consecutive wins ending with the latest round.
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    /// Longest run of consecutive wins.
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    /// Hints revealed across all completed rounds.
    pub fn total_hints_used(&self) -> u32 {
        self.total_hints_used
    }

    /// Completed rounds, oldest first.
    pub fn history(&self) -> &[GameRound] {
        &self.history
    }

    /// Most recently completed round.
    pub fn last_round(&self) -> Option<&GameRound> {
        self.history.last()
    }

    /// Up to `limit` rounds, newest first.
    pub fn recent_history(&self, limit: usize) -> impl Iterator<Item = &GameRound> {
        self.history.iter().rev().take(limit)
    }

    /// Identifiers of the last stations played, oldest first.
    pub fn recent_station_ids(&self) -> Vec<String> {
        self.recent_station_ids.iter().cloned().collect()
    }

    /// Fraction of games won, `0.0` before any game.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        f64::from(self.total_wins) / f64::from(self.total_games)
    }

    /// Mean guesses over winning rounds.
    pub fn average_guesses(&self) -> f64 {
        self.averages().guesses
    }

    /// Mean completion time over winning rounds that recorded one.
    pub fn average_completion_time(&self) -> f64 {
        self.averages().completion_time
    }

    fn averages(&self) -> Averages {
        if let Some(cached) = self.averages.get() {
            if cached.history_len == self.history.len() {
                return *cached;
            }
        }
        let computed = Averages::compute(&self.history);
        let _ = self.averages.set(computed);
        computed
    }
}

/// Render seconds as `MM:SS`.
pub fn format_elapsed(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Label for a win on the `guesses`-th try, e.g. `2nd Try!`.
pub fn try_label(guesses: usize) -> String {
    let suffix = match (guesses % 10, guesses % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{guesses}{suffix} Try!")
}

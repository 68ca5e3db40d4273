use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Station;

/// Guesses allowed per round.
pub const MAX_GUESSES: usize = 5;

/// Guesses required before the location hint is offered.
pub const LOCATION_HINT_MIN_GUESSES: usize = 1;

/// Guesses required before the trivia hint is offered.
pub const TRIVIA_HINT_MIN_GUESSES: usize = 3;

/// Where the daily game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No round started today.
    Waiting,
    /// A round is in progress.
    Playing,
    /// Today's round finished, won or lost.
    Completed,
    /// Daily quota used up and no round to show.
    AlreadyPlayed,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Waiting => "waiting",
            GameState::Playing => "playing",
            GameState::Completed => "completed",
            GameState::AlreadyPlayed => "already played",
        };
        f.write_str(label)
    }
}

/// The two one-shot hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintKind {
    /// Reveals the station's area.
    Location,
    /// Reveals the station's trivia fact.
    Trivia,
}

impl HintKind {
    /// Guesses that must be submitted before the hint is offered.
    pub fn min_guesses(self) -> usize {
        match self {
            HintKind::Location => LOCATION_HINT_MIN_GUESSES,
            HintKind::Trivia => TRIVIA_HINT_MIN_GUESSES,
        }
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess named the station; the round is won.
    Correct,
    /// Wrong, with guesses left.
    Incorrect {
        /// Guesses still available.
        remaining: usize,
    },
    /// Wrong, and it was the last guess; the round is lost.
    OutOfGuesses,
}

impl GuessOutcome {
    /// Whether the guess named the station.
    pub fn is_correct(self) -> bool {
        matches!(self, GuessOutcome::Correct)
    }

    /// Whether the guess ended the round.
    pub fn is_final(self) -> bool {
        !matches!(self, GuessOutcome::Incorrect { .. })
    }
}

/// Change notifications emitted to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The state machine moved.
    StateChanged(GameState),
    /// A guess was accepted and evaluated.
    GuessEvaluated {
        /// Guess as recorded.
        guess: String,
        /// Evaluation result.
        outcome: GuessOutcome,
    },
    /// A hint was revealed for the first time this round.
    HintUsed(HintKind),
    /// The round finished.
    RoundCompleted {
        /// Won or lost.
        won: bool,
        /// Recorded completion time in seconds.
        seconds: f64,
    },
}

/// One day's round for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    pub id: Uuid,
    pub station: Station,
    /// Instant the round was issued; its calendar day is the round's day.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub guesses: Vec<String>,
    #[serde(default)]
    pub trivia_hint_used: bool,
    #[serde(default)]
    pub location_hint_used: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_win: bool,
    /// Seconds from start to the final guess, frozen on completion.
    #[serde(default)]
    pub completion_time: Option<f64>,
    /// Seconds played across earlier foreground sessions.
    #[serde(default)]
    pub accumulated_elapsed_time: f64,
}

impl GameRound {
    pub fn new(station: Station, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            station,
            date,
            guesses: Vec::new(),
            trivia_hint_used: false,
            location_hint_used: false,
            is_completed: false,
            is_win: false,
            completion_time: None,
            accumulated_elapsed_time: 0.0,
        }
    }

    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    pub fn hint_used(&self, kind: HintKind) -> bool {
        match kind {
            HintKind::Location => self.location_hint_used,
            HintKind::Trivia => self.trivia_hint_used,
        }
    }

    /// Whether enough guesses have been made for the hint to be offered.
    /// Advisory only; [`GameRound::use_hint`] does not check it.
    pub fn can_use_hint(&self, kind: HintKind) -> bool {
        !self.hint_used(kind) && self.guesses.len() >= kind.min_guesses()
    }

    /// Mark a hint as used. Returns `false` when it already was.
    pub fn use_hint(&mut self, kind: HintKind) -> bool {
        let flag = match kind {
            HintKind::Location => &mut self.location_hint_used,
            HintKind::Trivia => &mut self.trivia_hint_used,
        };
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Number of distinct hints revealed (0 to 2).
    pub fn hints_used(&self) -> u32 {
        u32::from(self.location_hint_used) + u32::from(self.trivia_hint_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn round() -> GameRound {
        let station = Station::new("Bank", Vec::new(), "trivia", "Central London");
        GameRound::new(station, Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn remaining_guesses_counts_down() {
        let mut round = round();
        for expected in (0..MAX_GUESSES).rev() {
            round.guesses.push("x".into());
            assert_eq!(round.remaining_guesses(), expected);
            assert_eq!(round.remaining_guesses() + round.guesses.len(), MAX_GUESSES);
        }
    }

    #[test]
    fn hints_are_one_shot() {
        let mut round = round();
        assert!(round.use_hint(HintKind::Trivia));
        assert!(!round.use_hint(HintKind::Trivia));
        assert!(round.use_hint(HintKind::Location));
        assert_eq!(round.hints_used(), 2);
    }

    #[test]
    fn hint_eligibility_follows_guess_count() {
        let mut round = round();
        assert!(!round.can_use_hint(HintKind::Location));
        round.guesses.push("a".into());
        assert!(round.can_use_hint(HintKind::Location));
        assert!(!round.can_use_hint(HintKind::Trivia));
        round.guesses.extend(["b".to_string(), "c".to_string()]);
        assert!(round.can_use_hint(HintKind::Trivia));
        round.use_hint(HintKind::Trivia);
        assert!(!round.can_use_hint(HintKind::Trivia));
    }

    #[test]
    fn round_survives_json() {
        let mut original = round();
        original.guesses = vec!["Monument".into(), "Bnak".into()];
        original.location_hint_used = true;
        original.accumulated_elapsed_time = 12.5;
        let encoded = serde_json::to_string(&original).expect("encode");
        let decoded: GameRound = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, original);
    }
}

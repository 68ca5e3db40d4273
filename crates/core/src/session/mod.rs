#![allow(missing_docs)]

//! Daily round models, state machine and platform hooks.

pub mod hooks;
pub mod manager;
mod models;

pub use hooks::{AccessProvider, AlertClearer, NoAlerts, StaticAccess};
pub use manager::SessionManager;
pub use models::{
    GameRound, GameState, GuessOutcome, HintKind, SessionEvent, LOCATION_HINT_MIN_GUESSES,
    MAX_GUESSES, TRIVIA_HINT_MIN_GUESSES,
};

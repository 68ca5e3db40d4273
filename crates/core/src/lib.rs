#![warn(clippy::all, missing_docs)]

//! Engine for a daily station-guessing game.
//!
//! This crate hosts the station catalog, daily selection, guess matching,
//! the round state machine, statistics and persistence used by the console
//! shell and any future frontends.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod selector;
pub mod session;
pub mod stats;
pub mod store;

pub use catalog::Catalog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use error::{CatalogError, SessionError, StoreError};
pub use models::{Line, Station};
pub use session::{
    AccessProvider, AlertClearer, GameRound, GameState, GuessOutcome, HintKind, SessionEvent,
    SessionManager,
};
pub use stats::GameStats;
pub use store::{Backend, BackgroundBackend, FileBackend, MemoryBackend, Store};

//! Error types surfaced by the engine.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::session::GameState;

/// Rejections from [`crate::SessionManager`] operations.
///
/// None of these are fatal; the manager stays in a usable state and the
/// next user action may retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Empty, whitespace-only or punctuation-only guess. Not counted.
    #[error("guess is empty")]
    InvalidGuess,
    /// Operation not valid in the current state.
    #[error("cannot {action} while {state}")]
    IllegalTransition {
        /// State the manager was in.
        state: GameState,
        /// Attempted operation.
        action: &'static str,
    },
    /// Daily play limit reached for an account without unlimited plays.
    #[error("today's round has already been played")]
    QuotaExhausted,
    /// The catalog has no station served by two or more lines.
    #[error("catalog has no multi-line stations")]
    NoEligibleStation,
}

/// Failures reading or writing persisted keys.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not read the key.
    #[error("failed to read {key}")]
    Read {
        /// Logical key.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Backend could not write or remove the key.
    #[error("failed to write {key}")]
    Write {
        /// Logical key.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Value could not be serialised.
    #[error("failed to encode {key}")]
    Encode {
        /// Logical key.
        key: String,
        /// Serialiser error.
        #[source]
        source: serde_json::Error,
    },
    /// Stored bytes could not be deserialised.
    #[error("failed to decode {key}")]
    Decode {
        /// Logical key.
        key: String,
        /// Deserialiser error.
        #[source]
        source: serde_json::Error,
    },
}

/// Problems building a station catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two stations normalise to the same identifier.
    #[error("station '{name}' collides with existing id '{id}'")]
    DuplicateStation {
        /// Colliding identifier.
        id: String,
        /// Name of the second station.
        name: String,
    },
    /// A station references a line that is not defined.
    #[error("station '{station}' references unknown line '{line}'")]
    UnknownLine {
        /// Station name.
        station: String,
        /// Missing line name.
        line: String,
    },
    /// Catalog file could not be read.
    #[error("failed to read catalog {}", path.display())]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Catalog JSON is malformed.
    #[error("failed to parse catalog")]
    Parse(#[from] serde_json::Error),
}

//! Shared domain models.

use serde::{Deserialize, Serialize};

use crate::matcher::normalize;

/// A transit line serving one or more stations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Identifier derived from the line name.
    pub id: String,
    /// Human-readable line name (e.g. `Waterloo & City`).
    pub name: String,
    /// Hex colour code used by frontends.
    pub color_code: String,
}

impl Line {
    /// Build a line, deriving its identifier from the name.
    pub fn new(name: impl Into<String>, color_code: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: normalize(&name),
            name,
            color_code: color_code.into(),
        }
    }
}

/// A station that can be picked as the daily mystery.
///
/// The identifier is always `normalize(name)`; it is recomputed on
/// deserialisation so stale identifiers in saved data cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StationRecord")]
pub struct Station {
    id: String,
    name: String,
    lines: Vec<Line>,
    trivia: String,
    location: String,
}

impl Station {
    /// Build a station. Repeated lines are dropped, keeping first occurrence order.
    pub fn new(
        name: impl Into<String>,
        lines: Vec<Line>,
        trivia: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let mut unique: Vec<Line> = Vec::with_capacity(lines.len());
        for line in lines {
            if !unique.iter().any(|existing| existing.id == line.id) {
                unique.push(line);
            }
        }
        Self {
            id: normalize(&name),
            name,
            lines: unique,
            trivia: trivia.into(),
            location: location.into(),
        }
    }

    /// Normalised identifier, also used as the comparison form for guesses.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines serving this station, in catalog order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Trivia fact revealed by the trivia hint.
    pub fn trivia(&self) -> &str {
        &self.trivia
    }

    /// Area label revealed by the location hint.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Served by at least two distinct lines.
    pub fn is_multi_line(&self) -> bool {
        self.lines.len() >= 2
    }
}

#[derive(Deserialize)]
struct StationRecord {
    name: String,
    #[serde(default)]
    lines: Vec<Line>,
    #[serde(default)]
    trivia: String,
    #[serde(default)]
    location: String,
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        Station::new(record.name, record.lines, record.trivia, record.location)
    }
}

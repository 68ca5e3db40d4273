//! Station catalog: the lines and stations the daily pick is drawn from.

mod london;

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::CatalogError,
    matcher::normalize,
    models::{Line, Station},
};

static LONDON: Lazy<Catalog> = Lazy::new(|| {
    let lines = london::LINES
        .iter()
        .map(|(name, color)| Line::new(*name, *color))
        .collect();
    let stations = london::STATIONS.iter().map(|entry| StationDef {
        name: entry.name.to_string(),
        lines: entry.lines.iter().map(|line| line.to_string()).collect(),
        trivia: entry.trivia.to_string(),
        location: entry.location.to_string(),
    });
    Catalog::assemble(lines, stations).expect("built-in London catalog is consistent")
});

/// Immutable set of lines and stations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lines: Vec<Line>,
    stations: Vec<Station>,
}

impl Catalog {
    /// Build a catalog from ready-made stations, rejecting id collisions.
    pub fn new(lines: Vec<Line>, stations: Vec<Station>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(stations.len());
        for station in &stations {
            if !seen.insert(station.id()) {
                return Err(CatalogError::DuplicateStation {
                    id: station.id().to_string(),
                    name: station.name().to_string(),
                });
            }
        }
        Ok(Self { lines, stations })
    }

    /// The built-in London Underground catalog.
    pub fn london() -> Self {
        LONDON.clone()
    }

    /// Parse a catalog from JSON.
    ///
    /// Stations name their lines by display name; every referenced line must
    /// appear in the `lines` table.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let lines = file
            .lines
            .into_iter()
            .map(|line| Line::new(line.name, line.color_code))
            .collect();
        Self::assemble(lines, file.stations)
    }

    /// Read and parse a JSON catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            stations = catalog.stations.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    fn assemble(
        lines: Vec<Line>,
        stations: impl IntoIterator<Item = StationDef>,
    ) -> Result<Self, CatalogError> {
        let by_id: HashMap<String, Line> = lines
            .iter()
            .map(|line| (line.id.clone(), line.clone()))
            .collect();

        let mut resolved = Vec::new();
        for def in stations {
            let mut served_by = Vec::with_capacity(def.lines.len());
            for line_name in &def.lines {
                let line = by_id.get(&normalize(line_name)).ok_or_else(|| {
                    CatalogError::UnknownLine {
                        station: def.name.clone(),
                        line: line_name.clone(),
                    }
                })?;
                served_by.push(line.clone());
            }
            resolved.push(Station::new(def.name, served_by, def.trivia, def.location));
        }

        Self::new(lines, resolved)
    }

    /// All lines in definition order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All stations in definition order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Look up a station by identifier.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.id() == id)
    }

    /// Stations served by two or more lines, in definition order.
    pub fn multi_line_stations(&self) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|station| station.is_multi_line())
            .collect()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    lines: Vec<LineDef>,
    #[serde(default)]
    stations: Vec<StationDef>,
}

#[derive(Debug, Deserialize)]
struct LineDef {
    name: String,
    color_code: String,
}

#[derive(Debug, Deserialize)]
struct StationDef {
    name: String,
    #[serde(default)]
    lines: Vec<String>,
    #[serde(default)]
    trivia: String,
    #[serde(default)]
    location: String,
}

//! Deterministic daily station selection.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::{catalog::Catalog, models::Station};

/// Number of recently played stations excluded from the daily pick.
pub const RECENT_CAPACITY: usize = 15;

const SEED_SCALE: u64 = 1000;
const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;

/// Linear-congruential generator seeded from a day index.
///
/// Kept bit-compatible with previously issued daily stations; only the first
/// output is used for selection.
#[derive(Debug, Clone, Copy)]
pub struct DailyRng {
    state: u64,
}

impl DailyRng {
    /// Seed the generator for a day.
    pub fn for_day(day_index: u64) -> Self {
        Self {
            state: day_index.wrapping_mul(SEED_SCALE),
        }
    }

    /// Advance one step and return the new state.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }
}

/// Day-of-year (1-based) of `date` plus a testing offset.
pub fn day_index(date: NaiveDate, offset: u32) -> u64 {
    u64::from(date.ordinal()) + u64::from(offset)
}

/// Pick the station for `day_index`.
///
/// Draws from multi-line stations not in `recent_ids`; when every one of
/// them was played recently the whole multi-line pool is used instead.
/// Returns `None` only when the catalog has no multi-line stations.
pub fn select_daily_station<'a, S>(
    catalog: &'a Catalog,
    recent_ids: &[S],
    day_index: u64,
) -> Option<&'a Station>
where
    S: AsRef<str>,
{
    let pool = catalog.multi_line_stations();
    if pool.is_empty() {
        return None;
    }

    let recent: HashSet<&str> = recent_ids.iter().map(AsRef::as_ref).collect();
    let fresh: Vec<&Station> = pool
        .iter()
        .copied()
        .filter(|station| !recent.contains(station.id()))
        .collect();
    let candidates = if fresh.is_empty() { pool } else { fresh };

    let mut rng = DailyRng::for_day(day_index);
    let index = (rng.next_u64() % candidates.len() as u64) as usize;
    let station = candidates[index];
    debug!(
        day_index,
        candidates = candidates.len(),
        station = %station.id(),
        "Daily station selected"
    );
    Some(station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Line;

    fn small_catalog() -> Catalog {
        let a = Line::new("Alpha", "#111111");
        let b = Line::new("Beta", "#222222");
        let stations = ["One", "Two", "Three", "Four"]
            .into_iter()
            .map(|name| Station::new(name, vec![a.clone(), b.clone()], "", ""))
            .chain(std::iter::once(Station::new("Solo", vec![a.clone()], "", "")))
            .collect();
        Catalog::new(vec![a, b], stations).expect("valid catalog")
    }

    #[test]
    fn generator_matches_historical_sequence() {
        let mut rng = DailyRng::for_day(1);
        assert_eq!(rng.next_u64(), 1_103_515_257_345);
    }

    #[test]
    fn london_picks_are_stable() {
        let catalog = Catalog::london();
        let none: [&str; 0] = [];
        let day_one = select_daily_station(&catalog, &none, 1).map(Station::name);
        let day_hundred = select_daily_station(&catalog, &none, 100).map(Station::name);
        assert_eq!(day_one, Some("West Ham"));
        assert_eq!(day_hundred, Some("King's Cross St. Pancras"));
    }

    #[test]
    fn same_inputs_same_station() {
        let catalog = small_catalog();
        let recent = ["two"];
        for day in 1..=366 {
            let first = select_daily_station(&catalog, &recent, day).map(Station::id);
            let second = select_daily_station(&catalog, &recent, day).map(Station::id);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn single_line_stations_are_never_picked() {
        let catalog = small_catalog();
        let none: [&str; 0] = [];
        for day in 1..=366 {
            let station = select_daily_station(&catalog, &none, day).expect("pool not empty");
            assert_ne!(station.id(), "solo");
        }
    }

    #[test]
    fn only_unplayed_station_is_chosen() {
        let catalog = small_catalog();
        let recent = ["one", "two", "four"];
        for day in 1..=366 {
            let station = select_daily_station(&catalog, &recent, day).expect("pool not empty");
            assert_eq!(station.id(), "three");
        }
    }

    #[test]
    fn exhausted_pool_falls_back_to_all_multi_line() {
        let catalog = small_catalog();
        let recent = vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "four".to_string(),
        ];
        let station = select_daily_station(&catalog, &recent, 42).expect("fallback pool");
        assert!(station.is_multi_line());
    }

    #[test]
    fn empty_pool_yields_none() {
        let catalog = Catalog::new(Vec::new(), vec![Station::new("Solo", Vec::new(), "", "")])
            .expect("valid catalog");
        let none: [&str; 0] = [];
        assert!(select_daily_station(&catalog, &none, 1).is_none());
    }

    #[test]
    fn day_index_adds_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(day_index(date, 0), 32);
        assert_eq!(day_index(date, 3), 35);
    }
}

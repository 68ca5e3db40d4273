use std::sync::{atomic::AtomicBool, Arc};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tubeguessr_core::{
    session::MAX_GUESSES, Catalog, GameState, GuessOutcome, ManualClock, MemoryBackend,
    SessionError, SessionManager, Store,
};

fn new_years_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
}

fn open(clock: &Arc<ManualClock>, backend: &Arc<MemoryBackend>) -> SessionManager {
    SessionManager::new(Catalog::london(), Store::open(backend.clone()), clock.clone())
}

fn lose(manager: &mut SessionManager) {
    for _ in 0..MAX_GUESSES {
        manager.submit_guess("Nowhere Junction").expect("guess accepted");
    }
}

#[test]
fn first_guess_win_then_quota_blocks_replay() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);

    let station = manager.start().expect("round starts").station.name().to_string();
    assert_eq!(station, "West Ham");

    clock.advance(Duration::seconds(12));
    assert_eq!(manager.submit_guess("west ham"), Ok(GuessOutcome::Correct));
    assert_eq!(manager.state(), GameState::Completed);

    let stats = manager.stats();
    assert_eq!(stats.total_games(), 1);
    assert_eq!(stats.total_wins(), 1);
    assert_eq!(stats.current_streak(), 1);
    assert_eq!(stats.recent_station_ids(), ["westham"]);
    assert_eq!(stats.history()[0].completion_time, Some(12.0));

    clock.advance(Duration::hours(3));
    assert_eq!(manager.start().unwrap_err(), SessionError::QuotaExhausted);
    assert_eq!(manager.state(), GameState::Completed);
}

#[test]
fn every_guess_is_counted_until_the_round_ends() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");

    for remaining in (1..MAX_GUESSES).rev() {
        assert_eq!(
            manager.submit_guess("Nowhere Junction"),
            Ok(GuessOutcome::Incorrect { remaining })
        );
        assert!(manager.current_round().is_some_and(|r| r.guesses.len() <= MAX_GUESSES));
    }
    assert_eq!(
        manager.submit_guess("Nowhere Junction"),
        Ok(GuessOutcome::OutOfGuesses)
    );

    let round = manager.current_round().expect("finished round");
    assert!(round.is_completed && !round.is_win);
    assert_eq!(round.guesses.len(), MAX_GUESSES);
    assert!(matches!(
        manager.submit_guess("West Ham"),
        Err(SessionError::IllegalTransition {
            state: GameState::Completed,
            ..
        })
    ));
}

#[test]
fn losing_breaks_the_streak_but_keeps_the_best() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);

    manager.start().expect("day one");
    manager.submit_guess("West Ham").expect("guess accepted");

    clock.advance(Duration::days(1));
    assert_eq!(manager.reconcile(), GameState::Waiting);
    let second = manager.start().expect("day two").station.id().to_string();
    assert_ne!(second, "westham");
    lose(&mut manager);

    let stats = manager.stats();
    assert_eq!(stats.total_games(), 2);
    assert_eq!(stats.total_wins(), 1);
    assert_eq!(stats.current_streak(), 0);
    assert_eq!(stats.max_streak(), 1);
    assert!(stats.current_streak() <= stats.max_streak());
    assert!(stats.total_wins() <= stats.total_games());
    assert_eq!(stats.win_rate(), 0.5);
    assert_eq!(stats.average_guesses(), 1.0);
}

#[test]
fn reopening_resumes_an_unfinished_round() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");
    manager.submit_guess("Bank").expect("guess accepted");
    clock.advance(Duration::seconds(45));
    manager.on_suspend();
    drop(manager);

    clock.advance(Duration::minutes(20));
    let mut reopened = open(&clock, &backend);
    assert_eq!(reopened.state(), GameState::Playing);
    let round = reopened.current_round().expect("restored round");
    assert_eq!(round.guesses, ["Bank"]);
    assert_eq!(round.remaining_guesses(), MAX_GUESSES - 1);

    clock.advance(Duration::seconds(15));
    assert_eq!(reopened.elapsed_seconds(), 60.0);
    assert_eq!(reopened.submit_guess("West Ham"), Ok(GuessOutcome::Correct));
    assert_eq!(reopened.stats().history()[0].completion_time, Some(60.0));
}

#[test]
fn unfinished_round_from_yesterday_is_discarded() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");
    manager.submit_guess("Bank").expect("guess accepted");
    drop(manager);

    clock.advance(Duration::days(1));
    let reopened = open(&clock, &backend);
    assert_eq!(reopened.state(), GameState::Waiting);
    assert!(reopened.current_round().is_none());
    assert!(reopened.store().current_round().is_none());
    assert_eq!(reopened.stats().total_games(), 0);
}

#[test]
fn todays_finished_round_is_shown_after_reopening() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");
    lose(&mut manager);
    drop(manager);

    clock.advance(Duration::hours(1));
    let reopened = open(&clock, &backend);
    assert_eq!(reopened.state(), GameState::Completed);
    let round = reopened.current_round().expect("recalled round");
    assert!(!round.is_win);
    assert_eq!(round.station.name(), "West Ham");
}

#[test]
fn round_finished_after_midnight_uses_up_the_new_day() {
    let late = Utc.with_ymd_and_hms(2025, 1, 1, 23, 58, 0).unwrap();
    let clock = Arc::new(ManualClock::new(late));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");

    clock.advance(Duration::minutes(4));
    manager.submit_guess("West Ham").expect("guess accepted");
    drop(manager);

    let reopened = open(&clock, &backend);
    assert_eq!(reopened.state(), GameState::AlreadyPlayed);
    assert!(reopened.current_round().is_none());
    assert!(!reopened.can_play_today());
}

#[test]
fn granting_unlimited_plays_allows_another_round() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let unlimited = Arc::new(AtomicBool::new(false));
    let mut manager = open(&clock, &backend).with_access(unlimited.clone());

    manager.start().expect("round starts");
    manager.submit_guess("West Ham").expect("guess accepted");
    assert_eq!(manager.start().unwrap_err(), SessionError::QuotaExhausted);

    unlimited.store(true, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(manager.refresh_access(), GameState::Completed);
    assert!(manager.can_play_today());

    let replay = manager.start().expect("unlimited replay").station.id().to_string();
    assert_ne!(replay, "westham");
    assert_eq!(manager.state(), GameState::Playing);
}

#[test]
fn reset_starts_over_with_a_different_station() {
    let clock = Arc::new(ManualClock::new(new_years_morning()));
    let backend = Arc::new(MemoryBackend::new());
    let mut manager = open(&clock, &backend);
    manager.start().expect("round starts");
    manager.submit_guess("West Ham").expect("guess accepted");

    manager.reset();
    assert_eq!(manager.state(), GameState::Waiting);
    assert_eq!(manager.stats().total_games(), 0);

    let station = manager.start().expect("fresh round").station.id().to_string();
    assert_ne!(station, "westham");
}

use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};
use tubeguessr_core::{
    stats::{format_elapsed, try_label},
    GameRound, GameState, GuessOutcome, HintKind, SessionError, SessionEvent, SessionManager,
};

const DEFAULT_HISTORY: usize = 5;

const HELP: &str = "\
commands:
  start                 begin today's round
  guess <station>       submit a guess
  hint location|trivia  reveal a hint
  time                  show elapsed time
  stats                 show statistics
  history [n]           show the last n rounds
  suspend | resume      pause or resume the timer
  reset                 wipe progress and start over
  quit";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Start,
    Guess(String),
    Hint(HintKind),
    Time,
    Stats,
    History(usize),
    Suspend,
    Resume,
    Reset,
    Help,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((input, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "start" | "play" => Self::Start,
            "guess" | "g" => Self::Guess(rest.to_string()),
            "hint" => match rest.to_ascii_lowercase().as_str() {
                "location" | "loc" => Self::Hint(HintKind::Location),
                "trivia" => Self::Hint(HintKind::Trivia),
                other => bail!("unknown hint '{other}'; try 'location' or 'trivia'"),
            },
            "time" => Self::Time,
            "stats" => Self::Stats,
            "history" => {
                let limit = if rest.is_empty() {
                    DEFAULT_HISTORY
                } else {
                    rest.parse()
                        .with_context(|| format!("'{rest}' is not a number"))?
                };
                Self::History(limit)
            }
            "suspend" | "pause" => Self::Suspend,
            "resume" => Self::Resume,
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(anyhow!("unknown command '{other}'; type 'help'")),
        };
        Ok(Some(command))
    }
}

/// Line-oriented console frontend over a [`SessionManager`].
pub struct ShellApp {
    manager: SessionManager,
    should_quit: bool,
}

impl ShellApp {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            manager,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut events = self.manager.subscribe();
        self.print_status();
        println!("{HELP}");
        prompt()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read input")? {
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    debug!(?command, "Command received");
                    if let Err(err) = self.handle_command(command) {
                        println!("Error: {err}");
                    }
                }
                Ok(None) => {}
                Err(err) => println!("Error: {err}"),
            }
            self.drain_events(&mut events);
            if self.should_quit {
                break;
            }
            prompt()?;
        }

        self.manager.on_suspend();
        info!("Shell exiting");
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start => {
                let round = self.manager.start().map_err(explain)?;
                println!("{}", clue(round));
            }
            Command::Guess(guess) => {
                self.manager.submit_guess(&guess)?;
            }
            Command::Hint(kind) => {
                let playing = self
                    .manager
                    .current_round()
                    .filter(|_| self.manager.state() == GameState::Playing);
                match hint_request(playing, kind) {
                    HintRequest::Reveal => {
                        if !self.manager.use_hint(kind)? {
                            self.print_hint(kind);
                        }
                    }
                    HintRequest::Repeat => self.print_hint(kind),
                    HintRequest::Locked { needed } => {
                        println!("That hint unlocks after {needed} more guess(es).");
                    }
                }
            }
            Command::Time => {
                println!("Elapsed: {}", format_elapsed(self.manager.elapsed_seconds()))
            }
            Command::Stats => self.print_stats(),
            Command::History(limit) => self.print_history(limit),
            Command::Suspend => {
                self.manager.on_suspend();
                println!("Timer paused.");
            }
            Command::Resume => {
                self.manager.on_resume();
                self.manager.reconcile();
                self.print_status();
            }
            Command::Reset => {
                self.manager.reset();
                println!("Progress cleared.");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn drain_events(&self, events: &mut mpsc::UnboundedReceiver<SessionEvent>) {
        while let Ok(event) = events.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::StateChanged(state) => debug!(%state, "State changed"),
            SessionEvent::GuessEvaluated { guess, outcome } => match outcome {
                GuessOutcome::Correct => println!("'{guess}' is correct!"),
                GuessOutcome::Incorrect { remaining } => {
                    println!("'{guess}' is not it. {remaining} guess(es) left.")
                }
                GuessOutcome::OutOfGuesses => println!("'{guess}' is not it. Out of guesses."),
            },
            SessionEvent::HintUsed(kind) => self.print_hint(kind),
            SessionEvent::RoundCompleted { won, seconds } => {
                let Some(round) = self.manager.current_round() else {
                    return;
                };
                if won {
                    println!(
                        "{} {} in {}.",
                        try_label(round.guesses.len()),
                        round.station.name(),
                        format_elapsed(seconds)
                    );
                } else {
                    println!("The station was {}.", round.station.name());
                }
            }
        }
    }

    fn print_hint(&self, kind: HintKind) {
        let Some(round) = self.manager.current_round() else {
            return;
        };
        match kind {
            HintKind::Location => println!("Location: {}", round.station.location()),
            HintKind::Trivia => println!("Trivia: {}", round.station.trivia()),
        }
    }

    fn print_status(&self) {
        match self.manager.state() {
            GameState::Waiting => println!("Today's station is waiting. Type 'start'."),
            GameState::Playing => {
                if let Some(round) = self.manager.current_round() {
                    println!("{}", clue(round));
                    println!("{} guess(es) left.", round.remaining_guesses());
                }
            }
            GameState::Completed => {
                if let Some(round) = self.manager.current_round() {
                    let verdict = if round.is_win { "solved" } else { "missed" };
                    println!("Today's station ({}) is {verdict}.", round.station.name());
                }
            }
            GameState::AlreadyPlayed => println!("You've already played today."),
        }
    }

    fn print_stats(&self) {
        let stats = self.manager.stats();
        println!("Played:       {}", stats.total_games());
        println!("Win rate:     {:.0}%", stats.win_rate() * 100.0);
        println!(
            "Streak:       {} (best {})",
            stats.current_streak(),
            stats.max_streak()
        );
        println!("Avg guesses:  {:.1}", stats.average_guesses());
        println!(
            "Avg time:     {}",
            format_elapsed(stats.average_completion_time())
        );
        println!("Hints used:   {}", stats.total_hints_used());
    }

    fn print_history(&self, limit: usize) {
        let stats = self.manager.stats();
        let mut any = false;
        for round in stats.recent_history(limit) {
            any = true;
            let result = if round.is_win {
                try_label(round.guesses.len())
            } else {
                "Missed".to_string()
            };
            println!(
                "{}  {:<28} {result}",
                round.date.with_timezone(&Local).format("%Y-%m-%d"),
                round.station.name()
            );
        }
        if !any {
            println!("No rounds played yet.");
        }
    }
}

/// What a `hint` command should do for the round on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintRequest {
    Reveal,
    Repeat,
    Locked { needed: usize },
}

fn hint_request(round: Option<&GameRound>, kind: HintKind) -> HintRequest {
    let Some(round) = round else {
        return HintRequest::Reveal;
    };
    if round.hint_used(kind) {
        return HintRequest::Repeat;
    }
    match kind.min_guesses().checked_sub(round.guesses.len()) {
        Some(needed) if needed > 0 => HintRequest::Locked { needed },
        _ => HintRequest::Reveal,
    }
}

fn clue(round: &GameRound) -> String {
    let lines: Vec<&str> = round
        .station
        .lines()
        .iter()
        .map(|line| line.name.as_str())
        .collect();
    format!("Which station is served by: {}?", lines.join(", "))
}

fn explain(err: SessionError) -> anyhow::Error {
    match err {
        SessionError::QuotaExhausted => anyhow!("you've already played today; come back tomorrow"),
        other => other.into(),
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tubeguessr_core::Station;

    #[test]
    fn parses_commands() -> Result<()> {
        assert_eq!(Command::parse("  ")?, None);
        assert_eq!(Command::parse("START")?, Some(Command::Start));
        assert_eq!(
            Command::parse("guess  King's Cross ")?,
            Some(Command::Guess("King's Cross".into()))
        );
        assert_eq!(
            Command::parse("hint trivia")?,
            Some(Command::Hint(HintKind::Trivia))
        );
        assert_eq!(Command::parse("history")?, Some(Command::History(DEFAULT_HISTORY)));
        assert_eq!(Command::parse("history 2")?, Some(Command::History(2)));
        Ok(())
    }

    #[test]
    fn hint_requests_follow_round_progress() {
        let station = Station::new("Bank", Vec::new(), "trivia", "City of London");
        let mut round = GameRound::new(station, Utc::now());
        assert_eq!(
            hint_request(Some(&round), HintKind::Location),
            HintRequest::Locked { needed: 1 }
        );

        round.guesses.push("Monument".into());
        assert_eq!(hint_request(Some(&round), HintKind::Location), HintRequest::Reveal);
        assert_eq!(
            hint_request(Some(&round), HintKind::Trivia),
            HintRequest::Locked { needed: 2 }
        );

        assert!(round.use_hint(HintKind::Location));
        assert_eq!(hint_request(Some(&round), HintKind::Location), HintRequest::Repeat);
        assert_eq!(hint_request(None, HintKind::Trivia), HintRequest::Reveal);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("hint colour").is_err());
        assert!(Command::parse("history lots").is_err());
        assert!(Command::parse("dance").is_err());
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a treasure hunt over standard input.
//!
//! Every player types one move per line (`u`, `d`, `l` or `r`). The map as
//! known to the player's team is printed before each move; log events go to
//! stderr so stdout stays a clean transcript.

mod view;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use treasure_hunt_core::PlayerId;
use treasure_hunt_map::DEFAULT_GENERATION_SEED;
use treasure_hunt_system_session::{Session, SessionConfig, TurnError};

/// Find the treasure before anybody else does.
#[derive(Parser, Debug)]
#[command(name = "treasure-hunt", version, about, long_about = None)]
struct Args {
    /// Number of players (2 to 8)
    #[arg(short = 'p', long, default_value_t = 2)]
    players: u8,

    /// Side length of the square map (5 to 50, at least 8 with five or more players)
    #[arg(short = 's', long, default_value_t = 10)]
    map_size: i32,

    /// Map variant: basic or hazard
    #[arg(short = 'm', long, default_value = "basic")]
    map: String,

    /// Split the players into this many teams
    #[arg(short = 't', long)]
    teams: Option<u8>,

    /// Seed for map generation and player placement
    #[arg(long, default_value_t = DEFAULT_GENERATION_SEED)]
    seed: u64,

    /// Stop after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            players: self.players,
            map_size: self.map_size,
            map: self.map.clone(),
            teams: self.teams,
            seed: self.seed,
        }
    }
}

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Outcome {
    Won(Vec<PlayerId>),
    InputClosed,
    RoundLimit,
}

/// Entry point for the treasure hunt command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    let mut session = Session::new(args.session_config())
        .context("failed to set up the treasure hunt")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = play(&mut session, args.max_rounds, stdin.lock(), stdout.lock())?;
    let rounds = session.round();
    match outcome {
        Outcome::Won(winners) => tracing::info!(?winners, rounds, "game over"),
        Outcome::InputClosed | Outcome::RoundLimit => {
            tracing::info!(?outcome, rounds, "game ended without a winner");
        }
    }
    Ok(())
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs rounds until somebody wins, input runs out or the round limit is hit.
fn play<R: BufRead, W: Write>(
    session: &mut Session,
    max_rounds: Option<u32>,
    mut input: R,
    mut output: W,
) -> Result<Outcome> {
    let order: Vec<PlayerId> = session.players().iter().map(|player| player.id()).collect();

    loop {
        if max_rounds.is_some_and(|limit| session.round() >= limit) {
            let played = session.round();
            writeln!(output, "No treasure found after {played} rounds.")?;
            return Ok(Outcome::RoundLimit);
        }
        writeln!(output, "=== Round {} ===", session.round() + 1)?;

        for &id in &order {
            if !take_turn(session, id, &mut input, &mut output)? {
                return Ok(Outcome::InputClosed);
            }
        }

        let report = session.resolve_round().context("failed to resolve round")?;
        for id in &report.drowned {
            writeln!(output, "Player {id} drowned and returns to the start.")?;
        }
        if report.is_decided() {
            for id in &report.winners {
                writeln!(output, "Player {id} found the treasure!")?;
            }
            return Ok(Outcome::Won(report.winners));
        }
    }
}

/// Prompts `id` until it submits an accepted move. Returns `false` once input
/// is exhausted.
fn take_turn<R: BufRead, W: Write>(
    session: &mut Session,
    id: PlayerId,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let player = session
        .player(id)
        .with_context(|| format!("player {id} vanished from the session"))?;
    write!(
        output,
        "{}\n{}",
        view::status_line(player),
        view::render(session.map(), session.team_of(id), player)
    )?;

    let mut line = String::new();
    loop {
        write!(output, "Move (u/d/l/r): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let Some(command) = line.trim().chars().next() else {
            continue;
        };

        match session.submit_move(id, command) {
            Ok(_) => return Ok(true),
            Err(error @ (TurnError::OutsideMap { .. } | TurnError::Player(_))) => {
                writeln!(output, "{error}")?;
            }
            Err(error) => return Err(error).context("failed to apply move"),
        }
    }
}

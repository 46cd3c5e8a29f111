use std::{io, path::PathBuf, time::Instant};

use anyhow::Context as _;
use blockfall_engine::{Command, GameSession, PieceSeed, SessionSnapshot};
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece sequence seed (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Number of pieces to drop before stopping
    #[clap(long, default_value_t = 100)]
    pieces: usize,
    /// Start from a board file (20 lines of 10 cells, `.` or a piece letter)
    #[clap(long)]
    board: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[clap(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    snapshot: SessionSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        pieces,
        board,
        pretty,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let now = Instant::now();
    let mut session = match board {
        Some(path) => GameSession::with_board(super::read_board_file(path)?, seed, now),
        None => GameSession::with_seed(seed, now),
    };

    let mut rng = StdRng::from_seed(policy_seed(seed));
    play_random(&mut session, *pieces, &mut rng, now);

    let report = SimulationReport {
        seed,
        snapshot: session.snapshot(),
    };
    let stdout = io::stdout().lock();
    if *pretty {
        serde_json::to_writer_pretty(stdout, &report)
    } else {
        serde_json::to_writer(stdout, &report)
    }
    .context("failed to write simulation result")?;
    println!();
    Ok(())
}

/// Derives the move-choice seed from the piece seed so a run is fully reproducible.
fn policy_seed(seed: PieceSeed) -> [u8; 32] {
    let bytes = seed.to_bytes();
    let mut out = [0; 32];
    out[..16].copy_from_slice(&bytes);
    out[16..].copy_from_slice(&bytes.map(|b| !b));
    out
}

/// Drops up to `pieces` pieces, each after a random rotation and sideways shift.
///
/// Time never advances, so every lock comes from a hard drop.
fn play_random(session: &mut GameSession, pieces: usize, rng: &mut impl Rng, now: Instant) {
    for _ in 0..pieces {
        if session.mode().is_game_over() {
            log::info!("simulation ended early by game over");
            break;
        }
        for _ in 0..rng.random_range(0..4) {
            session.handle(Command::Rotate, now);
        }
        let shift: i32 = rng.random_range(-5..=5);
        let command = if shift < 0 {
            Command::MoveLeft
        } else {
            Command::MoveRight
        };
        for _ in 0..shift.unsigned_abs() {
            session.handle(command, now);
        }
        session.handle(Command::HardDrop, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([0x42; 16]);

    fn simulate(pieces: usize) -> SessionSnapshot {
        let now = Instant::now();
        let mut session = GameSession::with_seed(SEED, now);
        let mut rng = StdRng::from_seed(policy_seed(SEED));
        play_random(&mut session, pieces, &mut rng, now);
        session.snapshot()
    }

    #[test]
    fn test_simulation_is_reproducible() {
        assert_eq!(simulate(60), simulate(60));
    }

    #[test]
    fn test_simulation_counts_pieces() {
        let snapshot = simulate(5);
        assert_eq!(snapshot.completed_pieces, 5);
    }

    #[test]
    fn test_simulation_stops_at_game_over() {
        let snapshot = simulate(10_000);
        assert!(snapshot.mode.is_game_over());
        assert!(snapshot.completed_pieces < 10_000);
    }

    #[test]
    fn test_report_json() {
        let report = SimulationReport {
            seed: SEED,
            snapshot: simulate(3),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "42424242424242424242424242424242");
        assert_eq!(json["snapshot"]["completed_pieces"], 3);
    }
}

//! Game rules and session state.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - A running game: board, falling piece, statistics, pause and game over
//! - [`PieceController`] - Moves, rotates and drops the falling piece
//! - [`PieceGenerator`] - Uniformly random piece factory
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameStats`] - Score, lines and level
//! - [`DropScheduler`] - Deadline of the next automatic drop
//! - [`Command`] and [`SessionSnapshot`] - What front-ends send in and read out
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns immediately
//! 2. Feed it player [`Command`]s and call [`GameSession::update`] regularly
//! 3. Each landed piece is locked, full lines are cleared and the next piece spawns
//! 4. The game ends when a new piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use blockfall_engine::{Command, GameSession, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let t0 = Instant::now();
//! let mut session = GameSession::with_seed(seed, t0);
//!
//! session.handle(Command::MoveLeft, t0);
//! session.handle(Command::Rotate, t0);
//!
//! // Nothing is due before the first drop period elapses.
//! assert!(!session.update(t0 + Duration::from_millis(10)));
//! assert_eq!(session.next_tick_at(), Some(t0 + Duration::from_millis(800)));
//! ```

pub use self::{
    command::*, drop_scheduler::*, game_session::*, game_stats::*, piece_controller::*,
    piece_generator::*, snapshot::*,
};

mod command;
mod drop_scheduler;
mod game_session;
mod game_stats;
mod piece_controller;
mod piece_generator;
mod snapshot;

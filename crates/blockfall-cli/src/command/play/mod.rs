use std::{path::PathBuf, time::Instant};

use blockfall_engine::{GameSession, PieceSeed};
use rand::Rng as _;

use crate::tui::Tui;

use self::app::PlayApp;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece sequence seed (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Hide the drop preview
    #[clap(long)]
    no_ghost: bool,
    /// Maximum screen refreshes per second
    #[clap(long, default_value_t = 60.0, value_parser = parse_frame_rate)]
    frame_rate: f64,
    /// Start the first game from a board file (20 lines of 10 cells, `.` or a piece letter)
    #[clap(long)]
    board: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            no_ghost: false,
            frame_rate: 60.0,
            board: None,
        }
    }
}

fn parse_frame_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("frame rate must be a positive number, got {s}"))
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        no_ghost,
        frame_rate,
        board,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let now = Instant::now();
    let session = match board {
        Some(path) => GameSession::with_board(super::read_board_file(path)?, seed, now),
        None => GameSession::with_seed(seed, now),
    };

    let mut app = PlayApp::new(session, !no_ghost, *frame_rate);
    Tui::new().run(&mut app)?;

    let stats = app.session().stats();
    log::info!(
        "exited: seed {seed}, score {}, lines {}, level {}",
        stats.score(),
        stats.total_cleared_lines(),
        stats.level()
    );
    Ok(())
}

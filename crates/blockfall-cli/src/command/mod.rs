use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::Board;
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod logging;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write logs to this file (filter with `RUST_LOG`, default `info`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run a game headless with random moves and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Reads a starting board in the text format of [`Board`].
fn read_board_file(path: &Path) -> anyhow::Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file: {}", path.display()))?;
    text.parse()
        .with_context(|| format!("invalid board file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args_are_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_global_log_file() {
        let args =
            CommandArgs::try_parse_from(["blockfall", "simulate", "--log-file", "out.log"])
                .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_invalid_seed_rejected() {
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_read_board_file_missing() {
        let err = read_board_file(Path::new("/nonexistent/board.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read board file"));
    }
}

use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Sends log records to `path`, filtered by `RUST_LOG` (default `info`).
///
/// The terminal belongs to the game screen, so logs only ever go to a file.
pub(super) fn init(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}

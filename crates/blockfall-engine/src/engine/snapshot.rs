use serde::Serialize;

use crate::core::{board::Board, piece::ActivePiece};

use super::game_session::GameMode;

/// Owned, read-only view of a session for rendering or export.
///
/// Taking a snapshot copies everything it shows, so it stays valid while the session moves
/// on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub active: ActivePiece,
    /// Where the active piece would rest after a hard drop.
    pub drop_preview: ActivePiece,
    pub next: ActivePiece,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub completed_pieces: usize,
    /// Number of locks by lines cleared, indexed 0 to 4.
    pub line_clears: [usize; 5],
    pub mode: GameMode,
    /// `"PAUSED"` or `"GAME OVER"`; absent while playing.
    pub message: Option<&'static str>,
}

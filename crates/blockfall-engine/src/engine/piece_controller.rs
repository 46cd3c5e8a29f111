use crate::core::{board::Board, piece::ActivePiece};

/// Horizontal offsets tried, in order, when a rotation collides in place.
const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Result of a movement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// The move collided sideways or upwards. Nothing changed.
    Blocked,
    /// A downward move collided: the piece has come to rest and must be locked.
    Landed,
}

/// Owner of the falling piece.
///
/// All moves are validated against the board passed in; the controller never keeps a
/// reference to it.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, MoveOutcome, PieceController, PieceKind};
///
/// let board = Board::new();
/// let mut controller = PieceController::new(ActivePiece::new(PieceKind::O));
///
/// assert_eq!(controller.try_move(&board, -1, 0), MoveOutcome::Moved);
/// assert_eq!(controller.hard_drop(&board), 18);
/// assert_eq!(controller.try_move(&board, 0, 1), MoveOutcome::Landed);
/// ```
#[derive(Debug, Clone)]
pub struct PieceController {
    piece: ActivePiece,
}

impl PieceController {
    #[must_use]
    pub const fn new(piece: ActivePiece) -> Self {
        Self { piece }
    }

    #[must_use]
    pub const fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    /// Replaces the current piece without any collision check.
    pub fn set_piece(&mut self, piece: ActivePiece) {
        self.piece = piece;
    }

    /// Moves the piece by `(dx, dy)` if the target position is free.
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> MoveOutcome {
        let candidate = self.piece.moved(dx, dy);
        if !candidate.collides(board) {
            self.piece = candidate;
            MoveOutcome::Moved
        } else if dy > 0 {
            MoveOutcome::Landed
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotates the piece clockwise, shifting it sideways if the rotated shape collides.
    ///
    /// Returns `false` and leaves the piece unchanged if no kick offset fits.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let kicked = KICK_OFFSETS
            .iter()
            .map(|&dx| self.piece.rotated_cw(dx))
            .find(|candidate| !candidate.collides(board));
        match kicked {
            Some(piece) => {
                self.piece = piece;
                true
            }
            None => false,
        }
    }

    /// Drops the piece straight down until it rests, returning the number of rows fallen.
    ///
    /// The piece is left at its resting position; the caller locks it.
    pub fn hard_drop(&mut self, board: &Board) -> usize {
        let mut rows = 0;
        while self.try_move(board, 0, 1).is_moved() {
            rows += 1;
        }
        rows
    }

    /// Returns where the piece would come to rest after a hard drop.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> ActivePiece {
        let mut piece = self.piece;
        loop {
            let next = piece.moved(0, 1);
            if next.collides(board) {
                return piece;
            }
            piece = next;
        }
    }
}

use serde::Serialize;

use super::{
    board::{Board, COLS},
    catalog::{Color, PieceKind},
    shape::Shape,
};

/// A piece instance with its current shape and position.
///
/// Movement and rotation return new `ActivePiece` values; the board and the catalog are
/// never touched. `(x, y)` is the board position of the top-left cell of the shape's
/// bounding box and may be negative.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, PieceKind};
///
/// let piece = ActivePiece::new(PieceKind::T);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let moved = piece.moved(1, 2);
/// assert_eq!((moved.x(), moved.y()), (4, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: Shape,
    color: Color,
    x: i32,
    y: i32,
}

impl ActivePiece {
    /// Creates a piece of `kind` in its base orientation at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            color: kind.color(),
            x: spawn_x(&shape),
            y: 0,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Absolute board coordinates `(col, row)` of the occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Returns the same piece with the same shape and orientation at the spawn position.
    #[must_use]
    pub const fn respawned(&self) -> Self {
        Self {
            x: spawn_x(&self.shape),
            y: 0,
            ..*self
        }
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns the piece with its shape rotated clockwise and shifted by `dx` columns.
    #[must_use]
    pub const fn rotated_cw(&self, dx: i32) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            x: self.x + dx,
            ..*self
        }
    }

    /// Returns whether the piece overlaps a wall, the floor or a settled cell.
    #[must_use]
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Merges the piece into the board.
    pub fn lock_into(&self, board: &mut Board) {
        board.lock(&self.shape, self.color, self.x, self.y);
    }
}

/// Leftmost column that centers `shape` on the board: `floor(COLS / 2 - width / 2)`.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn spawn_x(shape: &Shape) -> i32 {
    ((COLS - shape.width()) / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Cell;

    #[test]
    fn test_spawn_columns() {
        assert_eq!(ActivePiece::new(PieceKind::I).x(), 3);
        assert_eq!(ActivePiece::new(PieceKind::O).x(), 4);
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            assert_eq!(ActivePiece::new(kind).x(), 3, "{kind:?}");
        }
        for kind in PieceKind::ALL {
            assert_eq!(ActivePiece::new(kind).y(), 0);
        }
    }

    #[test]
    fn test_respawned_uses_current_width() {
        let piece = ActivePiece::new(PieceKind::I).rotated_cw(0).moved(-2, 7);
        let respawned = piece.respawned();
        assert_eq!((respawned.x(), respawned.y()), (4, 0));
        assert_eq!(respawned.shape(), piece.shape());
    }

    #[test]
    fn test_occupied_positions() {
        let piece = ActivePiece::new(PieceKind::O).moved(1, 5);
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, [(5, 5), (6, 5), (5, 6), (6, 6)]);
    }

    #[test]
    fn test_rotated_keeps_color_and_kind() {
        let piece = ActivePiece::new(PieceKind::L);
        let rotated = piece.rotated_cw(-1);
        assert_eq!(rotated.kind(), PieceKind::L);
        assert_eq!(rotated.color(), Color::Orange);
        assert_eq!(rotated.x(), piece.x() - 1);
        assert_eq!(rotated.y(), piece.y());
    }

    #[test]
    fn test_lock_into() {
        let mut board = Board::new();
        let piece = ActivePiece::new(PieceKind::O).moved(0, 18);
        piece.lock_into(&mut board);
        assert!(piece.collides(&board));
        assert!(!board.is_row_full(19));
        assert_eq!(board.cell(4, 19), Some(Cell::Filled(Color::Yellow)));
    }
}

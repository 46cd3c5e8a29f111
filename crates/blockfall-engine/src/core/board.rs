use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use super::{
    catalog::{Color, PieceKind},
    shape::Shape,
};

/// Number of rows on the board.
pub const ROWS: usize = 20;
/// Number of columns on the board.
pub const COLS: usize = 10;

/// A single cell of the board: empty, or settled with the color of the piece that left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }

    fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(color) => PieceKind::ALL
                .into_iter()
                .find(|kind| kind.color() == color)
                .map_or('#', PieceKind::as_char),
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            _ => PieceKind::from_char(c).map(|kind| Cell::Filled(kind.color())),
        }
    }
}

type Row = [Cell; COLS];

const EMPTY_ROW: Row = [Cell::Empty; COLS];

/// Fixed-size occupancy grid of settled cells.
///
/// Row 0 is the top of the board and row [`ROWS`]` - 1` the bottom. The dimensions are part
/// of the type and never change.
///
/// # Text format
///
/// [`FromStr`] and [`Display`](fmt::Display) use one line per row, top first, with `.` for
/// an empty cell and a piece letter (`I O T S Z J L`) for a cell of that piece's color:
///
/// ```
/// use blockfall_engine::{Board, Cell, Color};
///
/// let text = format!("{}IIIIIIIII.\n", "..........\n".repeat(19));
/// let board: Board = text.parse().unwrap();
///
/// assert_eq!(board.cell(0, 19), Some(Cell::Filled(Color::Cyan)));
/// assert_eq!(board.cell(9, 19), Some(Cell::Empty));
/// assert_eq!(board.to_string(), text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Returns the cell at `(col, row)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites the cell at `(col, row)`. Does nothing outside the board.
    pub fn set_cell(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(c) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *c = cell;
        }
    }

    /// Returns an iterator over the rows, top first.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell; COLS]> {
        self.rows.iter()
    }

    /// Returns whether every cell in `row` is occupied.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| is_full(r))
    }

    /// Returns whether `shape` placed with its top-left at `(offset_x, offset_y)` would
    /// overlap a wall, the floor or a settled cell.
    ///
    /// Columns are always bounds-checked. Rows above the top (`row < 0`) are never checked
    /// for occupancy, so a piece may stick out above the visible board.
    #[must_use]
    pub fn collides(&self, shape: &Shape, offset_x: i32, offset_y: i32) -> bool {
        shape.occupied_cells().any(|(dx, dy)| {
            let (Some(x), Some(y)) = (offset_x.checked_add(dx), offset_y.checked_add(dy)) else {
                return true;
            };
            let col = match usize::try_from(x) {
                Ok(col) if col < COLS => col,
                _ => return true,
            };
            let Ok(row) = usize::try_from(y) else {
                return false;
            };
            row >= ROWS || self.rows[row][col].is_filled()
        })
    }

    /// Writes `color` into every board cell covered by `shape` at `(offset_x, offset_y)`.
    ///
    /// Cells that fall above the top of the board are dropped.
    pub fn lock(&mut self, shape: &Shape, color: Color, offset_x: i32, offset_y: i32) {
        for (dx, dy) in shape.occupied_cells() {
            let (Some(x), Some(y)) = (offset_x.checked_add(dx), offset_y.checked_add(dy)) else {
                continue;
            };
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            self.set_cell(col, row, Cell::Filled(color));
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Remaining rows keep their relative order and move down by the number of cleared
    /// rows below them; the same number of empty rows appears at the top.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..ROWS).rev() {
            if is_full(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}

fn is_full(row: &Row) -> bool {
    row.iter().all(|cell| cell.is_filled())
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {} rows, got {found}", ROWS)]
    RowCount { found: usize },
    #[display("row {row}: expected {} cells, got {found}", COLS)]
    RowWidth { row: usize, found: usize },
    #[display("row {row}, column {col}: invalid cell {ch:?}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim_end).collect();
        if lines.len() != ROWS {
            return Err(ParseBoardError::RowCount { found: lines.len() });
        }

        let mut board = Self::EMPTY;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != COLS {
                return Err(ParseBoardError::RowWidth { row, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell =
                    Cell::from_char(ch).ok_or(ParseBoardError::InvalidCell { row, col, ch })?;
                board.rows[row][col] = cell;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized as a list of row strings in the text format, top first.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(ROWS))?;
        for row in &self.rows {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            seq.serialize_element(&line)?;
        }
        seq.end()
    }
}

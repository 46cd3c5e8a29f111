use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq as _};

/// One rotation state of a piece: a rectangular matrix of occupied/empty cells.
///
/// `Shape` is a small `Copy` value. Rotating returns a new shape and never touches the
/// original, so a shape taken from the catalog can be handed to a live piece without any
/// risk of the piece's rotations leaking back into the catalog.
///
/// Cells are addressed as `(x, y)` with `(0, 0)` at the top-left. Storage is a fixed
/// `MAX_SIZE × MAX_SIZE` array; cells outside `width × height` are always empty.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// const X: bool = true;
/// const E: bool = false;
/// let t = Shape::from_rows(&[&[E, X, E], &[X, X, X]]);
/// let rotated = t.rotated_cw();
///
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(t.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; Shape::MAX_SIZE]; Shape::MAX_SIZE],
}

impl Shape {
    /// Largest width or height a shape may have.
    pub const MAX_SIZE: usize = 4;

    /// Builds a shape from rows of cells, top row first.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty, if any row is empty or has a different length from the
    /// first one, or if either dimension exceeds [`Self::MAX_SIZE`]. In a `const` context
    /// this is a compile error.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows(rows: &[&[bool]]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= Self::MAX_SIZE, "invalid shape height");
        let width = rows[0].len();
        assert!(width > 0 && width <= Self::MAX_SIZE, "invalid shape width");

        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut y = 0;
        while y < height {
            assert!(rows[y].len() == width, "shape rows must have equal length");
            let mut x = 0;
            while x < width {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at `(x, y)` is occupied. Out-of-range cells are empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates over the local `(dx, dy)` offsets of all occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[usize::from(y)][usize::from(x)])
                .map(move |x| (i32::from(x), i32::from(y)))
        })
    }

    /// Iterates over the rows of the shape, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// An `R × C` source becomes a `C × R` shape with `rotated[x][R - 1 - y] = source[y][x]`.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let src_height = self.height();
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut y = 0;
        while y < src_height {
            let mut x = 0;
            while x < self.width() {
                cells[x][src_height - 1 - y] = self.cells[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Serialized as a list of row strings, e.g. `[".#.", "###"]`.
impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.height()))?;
        for row in self.rows() {
            let row: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

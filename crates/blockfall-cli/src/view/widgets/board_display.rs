use std::iter;

use blockfall_engine::{ActivePiece, Board, COLS, Cell, Color, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::BlockDisplay;

#[derive(Debug, Clone, Copy)]
enum Tile {
    Cell(Cell),
    Ghost(Color),
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<ActivePiece>,
    active_piece: Option<ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            active_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: ActivePiece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn active_piece(self, piece: ActivePiece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Settled cells with the ghost and the active piece drawn on top.
    fn tiles(&self) -> [[Tile; COLS]; ROWS] {
        let mut tiles = [[Tile::Cell(Cell::Empty); COLS]; ROWS];
        for (tile_row, row) in iter::zip(&mut tiles, self.board.rows()) {
            for (tile, cell) in iter::zip(tile_row, row) {
                *tile = Tile::Cell(*cell);
            }
        }

        let mut paint = |piece: &ActivePiece, tile: Tile| {
            for (col, row) in piece.occupied_positions() {
                let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                    continue;
                };
                if let Some(target) = tiles.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *target = tile;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            paint(ghost, Tile::Ghost(ghost.color()));
        }
        if let Some(piece) = &self.active_piece {
            paint(piece, Tile::Cell(Cell::Filled(piece.color())));
        }
        tiles
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..COLS).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                let block_display = match tile {
                    Tile::Cell(cell) => BlockDisplay::from_cell(cell, true),
                    Tile::Ghost(color) => BlockDisplay::ghost(color),
                };
                block_display.render(grid_cell, buf);
            }
        }
    }
}

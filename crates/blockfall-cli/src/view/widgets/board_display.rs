use std::iter;

use blockfall_engine::{Board, PieceKind, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{BlockDisplay, Tile};

type TileGrid = [[Tile; Board::WIDTH]; Board::HEIGHT];

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<[Position; 4]>,
    active: Option<(PieceKind, [Position; 4])>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            active: None,
            block: None,
        }
    }

    pub fn ghost(self, cells: [Position; 4]) -> Self {
        Self {
            ghost: Some(cells),
            ..self
        }
    }

    pub fn active_piece(self, kind: PieceKind, cells: [Position; 4]) -> Self {
        Self {
            active: Some((kind, cells)),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(Board::WIDTH).unwrap() * BlockDisplay::width()
            + super::chrome_size(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        u16::try_from(Board::HEIGHT).unwrap() * BlockDisplay::height()
            + super::chrome_size(self.block.as_ref()).1
    }

    fn tiles(&self) -> TileGrid {
        let mut grid = [[Tile::Empty; Board::WIDTH]; Board::HEIGHT];
        for (pos, cell) in self.board.cells() {
            set_tile(&mut grid, pos, cell.into());
        }
        for pos in self.ghost.into_iter().flatten() {
            set_tile(&mut grid, pos, Tile::Ghost);
        }
        if let Some((kind, cells)) = self.active {
            for pos in cells {
                set_tile(&mut grid, pos, Tile::Piece(kind));
            }
        }
        grid
    }
}

fn set_tile(grid: &mut TileGrid, pos: Position, tile: Tile) {
    let (Ok(col), Ok(row)) = (usize::try_from(pos.col), usize::try_from(pos.row)) else {
        return;
    };
    if let Some(slot) = grid.get_mut(row).and_then(|row| row.get_mut(col)) {
        *slot = tile;
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

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                BlockDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}

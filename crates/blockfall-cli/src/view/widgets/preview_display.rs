use blockfall_engine::{PieceKind, Position, Rotation};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{BlockDisplay, Tile};

/// Rows between two queued pieces.
const GAP: u16 = 1;
/// Every piece fits in 4x2 squares in its spawn orientation.
const SLOT_COLS: u16 = 4;
const SLOT_ROWS: u16 = 2;

/// The upcoming pieces, next one on top, each centered in its own slot.
#[derive(Debug)]
pub struct PreviewDisplay<'a> {
    pieces: &'a [PieceKind],
    block: Option<BlockWidget<'a>>,
}

impl<'a> PreviewDisplay<'a> {
    pub fn new(pieces: &'a [PieceKind]) -> Self {
        Self {
            pieces,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        SLOT_COLS * BlockDisplay::width() + super::chrome_size(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        let count = u16::try_from(self.pieces.len()).unwrap_or(u16::MAX);
        let slots = count.saturating_mul(SLOT_ROWS * BlockDisplay::height() + GAP);
        slots.saturating_sub(GAP) + super::chrome_size(self.block.as_ref()).1
    }

    /// Top-left corner of every square of `kind`, relative to its slot.
    fn square_offsets(kind: PieceKind) -> impl Iterator<Item = (u16, u16)> {
        let cells = kind.cells(Rotation::SPAWN);
        let left = cells.iter().map(|p| p.col).min().unwrap_or(0);
        let top = cells.iter().map(|p| p.row).min().unwrap_or(0);
        let right = cells.iter().map(|p| p.col).max().unwrap_or(0);
        let bottom = cells.iter().map(|p| p.row).max().unwrap_or(0);
        // Center narrow pieces horizontally and flat ones vertically, in half
        // squares so a 3-wide piece sits one terminal column off the middle.
        let square_w = i32::from(BlockDisplay::width());
        let square_h = i32::from(BlockDisplay::height());
        let pad_cols = (i32::from(SLOT_COLS) - (right - left + 1)) * square_w / 2;
        let pad_rows = (i32::from(SLOT_ROWS) - (bottom - top + 1)) * square_h / 2;
        cells.into_iter().filter_map(move |Position { col, row }| {
            let x = (col - left) * square_w + pad_cols;
            let y = (row - top) * square_h + pad_rows;
            Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
        })
    }
}

impl Widget for PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let slot_height = SLOT_ROWS * BlockDisplay::height();

        let mut slot_top = area.y;
        for &kind in self.pieces {
            if slot_top.saturating_add(slot_height) > area.bottom() {
                break;
            }
            let square = BlockDisplay::from_tile(Tile::Piece(kind), false);
            for (dx, dy) in PreviewDisplay::square_offsets(kind) {
                let rect = Rect::new(
                    area.x + dx,
                    slot_top + dy,
                    BlockDisplay::width(),
                    BlockDisplay::height(),
                )
                .intersection(area);
                if !rect.is_empty() {
                    Widget::render(&square, rect, buf);
                }
            }
            slot_top += slot_height + GAP;
        }
    }
}

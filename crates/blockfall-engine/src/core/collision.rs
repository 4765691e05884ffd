use crate::PlacementError;

use super::{
    board::{Board, Position},
    piece::ActivePiece,
};

/// Checks that every cell lies inside the board and is empty.
///
/// Cells are checked in iteration order and the first offending cell is
/// reported. Bounds are checked before occupancy.
pub fn check_placement<I>(board: &Board, cells: I) -> Result<(), PlacementError>
where
    I: IntoIterator<Item = Position>,
{
    for pos in cells {
        if board.cell(pos)?.is_filled() {
            return Err(PlacementError::Occupied(pos));
        }
    }
    Ok(())
}

impl Board {
    /// Checks whether the piece overlaps filled cells or leaves the board.
    #[must_use]
    pub fn is_colliding(&self, piece: &ActivePiece) -> bool {
        check_placement(self, piece.cells()).is_err()
    }
}

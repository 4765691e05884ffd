use crate::{
    ActionError, PlacementError, RotationBlockedError, SpawnBlockedError,
    core::{ActivePiece, Board, Cell, PieceKind, RotationDirection, check_placement},
};

/// Holds the falling piece and applies validated moves to it.
///
/// Whenever a piece is held, its cells are inside the board and do not
/// overlap filled cells. Every operation validates the candidate placement
/// first and leaves the piece untouched when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceController {
    active: Option<ActivePiece>,
}

impl PieceController {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Places a new piece of `kind` at the spawn anchor in rotation 0.
    ///
    /// On failure the slot stays empty.
    pub fn spawn(&mut self, board: &Board, kind: PieceKind) -> Result<ActivePiece, SpawnBlockedError> {
        let piece = ActivePiece::spawn(kind);
        if board.is_colliding(&piece) {
            self.active = None;
            return Err(SpawnBlockedError { kind });
        }
        self.active = Some(piece);
        Ok(piece)
    }

    /// Replaces the active piece with `piece` if it fits.
    pub fn set(&mut self, board: &Board, piece: ActivePiece) -> Result<(), PlacementError> {
        check_placement(board, piece.cells())?;
        self.active = Some(piece);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    fn current(&self) -> Result<ActivePiece, ActionError> {
        self.active.ok_or(ActionError::NoActivePiece)
    }

    /// Moves the piece by `(dcol, drow)` if the destination is valid.
    pub fn attempt_move(&mut self, board: &Board, dcol: i32, drow: i32) -> Result<(), ActionError> {
        let candidate = self.current()?.shifted(dcol, drow);
        check_placement(board, candidate.cells())?;
        self.active = Some(candidate);
        Ok(())
    }

    /// Rotates the piece, committing the first kick candidate that fits.
    pub fn attempt_rotate(
        &mut self,
        board: &Board,
        direction: RotationDirection,
    ) -> Result<(), ActionError> {
        let candidate = self
            .current()?
            .rotation_candidates(direction)
            .find(|candidate| !board.is_colliding(candidate))
            .ok_or(RotationBlockedError)?;
        self.active = Some(candidate);
        Ok(())
    }

    /// Rows the piece can still fall before it rests on something.
    #[must_use]
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let Some(piece) = self.active else {
            return 0;
        };
        let mut distance = 0;
        while !board.is_colliding(&piece.shifted(0, distance + 1)) {
            distance += 1;
        }
        distance.unsigned_abs()
    }

    /// Where the piece would land if hard-dropped.
    #[must_use]
    pub fn ghost(&self, board: &Board) -> Option<ActivePiece> {
        let distance = i32::try_from(self.drop_distance(board)).ok()?;
        self.active.map(|piece| piece.shifted(0, distance))
    }

    /// Merges the active piece into the board and empties the slot.
    pub fn lock(&mut self, board: &mut Board) -> Result<ActivePiece, ActionError> {
        let piece = self.current()?;
        let kind = piece.kind();
        let cells = piece.cells().map(|pos| (pos, Cell::Piece(kind)));
        board.lock(&cells)?;
        self.active = None;
        Ok(piece)
    }

    /// Drops the piece as far as it goes and locks it.
    ///
    /// Returns the number of rows travelled and the locked piece.
    pub fn hard_drop(&mut self, board: &mut Board) -> Result<(u32, ActivePiece), ActionError> {
        let mut rows = 0;
        while self.attempt_move(board, 0, 1).is_ok() {
            rows += 1;
        }
        let piece = self.lock(board)?;
        Ok((rows, piece))
    }
}

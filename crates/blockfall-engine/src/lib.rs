//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - the playfield grid, the piece catalog and the placement rules
//! - [`engine`] - the falling piece controller, scoring, the randomizer and the
//!   [`GameSession`] state machine that turns tick and input events into moves
//!
//! Nothing here draws, reads the keyboard or sleeps. Hosts feed
//! [`GameEvent`]s into a [`GameSession`] and read back a [`GameSnapshot`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A board coordinate that lies outside the 10x20 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell {_0} is outside the board")]
pub struct OutOfBoundsError(#[error(not(source))] pub Position);

/// Why a set of cells cannot be placed on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum PlacementError {
    #[display("cell {_0} is outside the board")]
    OutOfBounds(#[error(not(source))] Position),
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] Position),
}

impl From<OutOfBoundsError> for PlacementError {
    fn from(err: OutOfBoundsError) -> Self {
        PlacementError::OutOfBounds(err.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no kick offset resolves the rotation")]
pub struct RotationBlockedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("spawn cells of {kind} piece are blocked")]
pub struct SpawnBlockedError {
    pub kind: PieceKind,
}

/// Failure of a single piece action. None of these end the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum ActionError {
    #[display("{_0}")]
    Placement(PlacementError),
    #[display("{_0}")]
    RotationBlocked(RotationBlockedError),
    #[display("no active piece")]
    #[from(ignore)]
    NoActivePiece,
}

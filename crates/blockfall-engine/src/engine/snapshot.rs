use serde::{Deserialize, Serialize};

use crate::{Board, GameState, PieceKind, Position, Rotation};

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActiveSnapshot>,
    /// Cells the active piece would occupy after a hard drop.
    pub ghost: Option<[Position; 4]>,
    pub preview: Vec<PieceKind>,
    pub state: GameState,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: [Position; 4],
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{ActionError, PieceKind, SpawnBlockedError};

/// Discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    /// Toggles between playing and paused.
    Pause,
}

/// Everything that can drive a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From)]
pub enum GameEvent {
    /// Gravity tick from the timer.
    #[from(ignore)]
    Tick,
    Input(Input),
    #[from(ignore)]
    Start,
    #[from(ignore)]
    Restart,
}

/// What a lock did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub kind: PieceKind,
    pub rows_cleared: usize,
    /// Points gained by the event, drop points included.
    pub points: u64,
    pub level_changed: bool,
    /// The next piece could not spawn.
    pub game_over: bool,
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EventOutcome {
    /// The event does not apply in the current state.
    Ignored,
    Applied,
    /// The move failed validation; nothing changed.
    Rejected(ActionError),
    /// The active piece was locked.
    Locked(LockReport),
    /// The game started but its first piece could not spawn; the session is
    /// over.
    SpawnBlocked(SpawnBlockedError),
}

impl EventOutcome {
    #[must_use]
    pub const fn lock_report(&self) -> Option<&LockReport> {
        match self {
            EventOutcome::Locked(report) => Some(report),
            _ => None,
        }
    }
}

/// FIFO of pending events.
///
/// Timer and keyboard sources push here; the session drains the queue in
/// arrival order so no two updates interleave.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<GameEvent>) {
        self.events.push_back(event.into());
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

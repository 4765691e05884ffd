//! Game rules on top of the playfield geometry.
//!
//! - [`PieceController`] - validated moves, rotations and drops of the falling
//!   piece
//! - [`GameSession`] - the state machine that turns [`GameEvent`]s into
//!   controller calls, locks pieces, clears rows and scores
//! - [`GameStats`] and [`GameConfig`] - scoring, levels and gravity timing
//! - [`PieceGenerator`] - pluggable bag or uniform piece selection
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] in the Ready state and send [`GameEvent::Start`]
//! 2. Feed ticks (from a timer or [`GameSession::advance`]) and inputs
//! 3. When the piece cannot fall it locks, full rows clear and the next piece
//!    spawns
//! 4. A blocked spawn ends the game; [`GameEvent::Restart`] returns to Ready

pub use self::{
    config::*, controller::*, event::*, game_session::*, game_stats::*, gravity::*, randomizer::*,
    snapshot::*,
};

mod config;
mod controller;
mod event;
mod game_session;
mod game_stats;
mod gravity;
mod randomizer;
mod snapshot;

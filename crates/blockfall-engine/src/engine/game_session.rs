use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ActionError, ActivePiece, ActiveSnapshot, Board, Cell, ConfigError, EventOutcome, EventQueue,
    GameConfig, GameEvent, GameSnapshot, GameStats, GravityClock, Input, LockReport,
    PieceController, PieceGenerator, PieceKind, PieceQueue, PieceSeed, PlacementError, Position,
    RotationDirection, SpawnBlockedError,
};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameState {
    /// Waiting for the start event; no piece on the board.
    #[default]
    Ready,
    Playing,
    Paused,
    /// A piece could not spawn.
    GameOver,
}

/// One game: board, falling piece, spawn queue, statistics and the
/// Ready → Playing ⇄ Paused → GameOver state machine.
///
/// Every event goes through [`GameSession::handle_event`], which calls
/// exactly one `on_*` handler. Events that do not apply in the current state
/// are ignored; failed moves are rejected without changing anything.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameEvent, GameSession, Input, PieceSeed};
///
/// let mut session = GameSession::new(GameConfig::default(), PieceSeed::from_u128(1)).unwrap();
/// assert!(session.handle_event(GameEvent::Start).is_applied());
/// assert!(session.handle_event(Input::MoveLeft.into()).is_applied());
///
/// let outcome = session.handle_event(Input::HardDrop.into());
/// let report = outcome.lock_report().unwrap();
/// assert_eq!(report.rows_cleared, 0);
/// assert!(session.stats().score() > 0);
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    controller: PieceController,
    queue: PieceQueue,
    stats: GameStats,
    clock: GravityClock,
    state: GameState,
}

impl GameSession {
    /// Creates a session drawing pieces from the configured randomizer.
    pub fn new(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        let generator = config.randomizer.build(seed);
        Self::with_generator(config, generator)
    }

    pub fn with_generator(
        config: GameConfig,
        generator: Box<dyn PieceGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let stats = GameStats::new(&config);
        let clock = GravityClock::new(config.drop_interval(stats.level()));
        Ok(Self {
            board: Board::new(),
            controller: PieceController::new(),
            queue: PieceQueue::new(generator, config.preview_len),
            stats,
            clock,
            state: GameState::Ready,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.controller.active()
    }

    #[must_use]
    pub fn ghost_piece(&self) -> Option<ActivePiece> {
        self.controller.ghost(&self.board)
    }

    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current gravity interval. Changes when the level changes.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Routes `event` to its handler.
    pub fn handle_event(&mut self, event: GameEvent) -> EventOutcome {
        match event {
            GameEvent::Tick => self.on_tick(),
            GameEvent::Start => self.on_start(),
            GameEvent::Restart => self.on_restart(),
            GameEvent::Input(input) => match input {
                Input::MoveLeft => self.on_move_left(),
                Input::MoveRight => self.on_move_right(),
                Input::SoftDrop => self.on_soft_drop(),
                Input::HardDrop => self.on_hard_drop(),
                Input::RotateCw => self.on_rotate_cw(),
                Input::RotateCcw => self.on_rotate_ccw(),
                Input::Pause => self.on_pause(),
            },
        }
    }

    /// Drains `events` in arrival order.
    pub fn process(&mut self, events: &mut EventQueue) -> Vec<EventOutcome> {
        std::iter::from_fn(|| events.pop())
            .map(|event| self.handle_event(event))
            .collect()
    }

    /// Feeds frame time to the gravity clock and runs every tick that became
    /// due, re-reading the interval after each one.
    ///
    /// Time only accumulates while playing.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<EventOutcome> {
        if !self.state.is_playing() {
            return vec![];
        }
        self.clock.accumulate(elapsed);
        let mut outcomes = vec![];
        while self.state.is_playing() && self.clock.take_tick() {
            outcomes.push(self.on_tick());
        }
        outcomes
    }

    pub fn on_start(&mut self) -> EventOutcome {
        if !self.state.is_ready() {
            return EventOutcome::Ignored;
        }
        self.state = GameState::Playing;
        self.clock.reset();
        match self.spawn_next() {
            Ok(_) => EventOutcome::Applied,
            Err(err) => EventOutcome::SpawnBlocked(err),
        }
    }

    /// Gravity: moves the piece down one row, or locks it if it cannot move.
    pub fn on_tick(&mut self) -> EventOutcome {
        if !self.state.is_playing() {
            return EventOutcome::Ignored;
        }
        self.stats.add_play_time(self.clock.interval());
        match self.controller.attempt_move(&self.board, 0, 1) {
            Ok(()) => EventOutcome::Applied,
            Err(ActionError::Placement(_)) => match self.controller.lock(&mut self.board) {
                Ok(piece) => EventOutcome::Locked(self.finish_lock(piece.kind(), 0)),
                Err(err) => EventOutcome::Rejected(err),
            },
            Err(err) => EventOutcome::Rejected(err),
        }
    }

    pub fn on_move_left(&mut self) -> EventOutcome {
        self.try_action(|this| this.controller.attempt_move(&this.board, -1, 0))
    }

    pub fn on_move_right(&mut self) -> EventOutcome {
        self.try_action(|this| this.controller.attempt_move(&this.board, 1, 0))
    }

    /// Moves the piece down one row for soft drop points. A blocked soft drop
    /// does not lock; the next tick does.
    pub fn on_soft_drop(&mut self) -> EventOutcome {
        self.try_action(|this| {
            this.controller.attempt_move(&this.board, 0, 1)?;
            this.stats.add_drop_points(1, this.config.soft_drop_points);
            Ok(())
        })
    }

    pub fn on_hard_drop(&mut self) -> EventOutcome {
        if !self.state.is_playing() {
            return EventOutcome::Ignored;
        }
        match self.controller.hard_drop(&mut self.board) {
            Ok((rows, piece)) => {
                let points = self
                    .stats
                    .add_drop_points(rows, self.config.hard_drop_points);
                self.clock.reset();
                EventOutcome::Locked(self.finish_lock(piece.kind(), points))
            }
            Err(err) => EventOutcome::Rejected(err),
        }
    }

    pub fn on_rotate_cw(&mut self) -> EventOutcome {
        self.try_action(|this| {
            this.controller
                .attempt_rotate(&this.board, RotationDirection::Clockwise)
        })
    }

    pub fn on_rotate_ccw(&mut self) -> EventOutcome {
        self.try_action(|this| {
            this.controller
                .attempt_rotate(&this.board, RotationDirection::CounterClockwise)
        })
    }

    /// Toggles between playing and paused.
    pub fn on_pause(&mut self) -> EventOutcome {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::Ready | GameState::GameOver => return EventOutcome::Ignored,
        };
        EventOutcome::Applied
    }

    /// Returns to Ready with an empty board and fresh statistics.
    ///
    /// The spawn queue keeps its sequence.
    pub fn on_restart(&mut self) -> EventOutcome {
        if !self.state.is_game_over() {
            return EventOutcome::Ignored;
        }
        self.board.reset();
        self.controller.clear();
        self.stats = GameStats::new(&self.config);
        self.clock = GravityClock::new(self.config.drop_interval(self.stats.level()));
        self.state = GameState::Ready;
        EventOutcome::Applied
    }

    /// Writes cells straight into the board, e.g. pre-stacked garbage.
    ///
    /// Cells must be empty, inside the board and off the active piece. Full
    /// rows stay until the next lock clears them.
    pub fn lock_cells(&mut self, cells: &[(Position, Cell)]) -> Result<(), PlacementError> {
        if let Some(piece) = self.controller.active() {
            let active = piece.cells();
            if let Some(&(pos, _)) = cells.iter().find(|(pos, _)| active.contains(pos)) {
                return Err(PlacementError::Occupied(pos));
            }
        }
        self.board.lock(cells)
    }

    /// Replaces the active piece if `piece` fits on the board.
    pub fn set_active_piece(&mut self, piece: ActivePiece) -> Result<(), PlacementError> {
        self.controller.set(&self.board, piece)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.controller.active().map(|piece| ActiveSnapshot {
                kind: piece.kind(),
                rotation: piece.rotation(),
                cells: piece.cells(),
            }),
            ghost: self.ghost_piece().map(|piece| piece.cells()),
            preview: self.preview().collect(),
            state: self.state,
            score: self.stats.score(),
            level: self.stats.level(),
            lines: self.stats.lines(),
            drop_interval_ms: u64::try_from(self.drop_interval().as_millis()).unwrap_or(u64::MAX),
        }
    }

    fn try_action(
        &mut self,
        action: impl FnOnce(&mut Self) -> Result<(), ActionError>,
    ) -> EventOutcome {
        if !self.state.is_playing() {
            return EventOutcome::Ignored;
        }
        match action(self) {
            Ok(()) => EventOutcome::Applied,
            Err(err) => EventOutcome::Rejected(err),
        }
    }

    fn spawn_next(&mut self) -> Result<ActivePiece, SpawnBlockedError> {
        let kind = self.queue.pop_next();
        let result = self.controller.spawn(&self.board, kind);
        if result.is_err() {
            self.state = GameState::GameOver;
        }
        result
    }

    /// Clears rows, scores the lock and spawns the next piece.
    fn finish_lock(&mut self, kind: PieceKind, drop_points: u64) -> LockReport {
        let rows_cleared = self.board.clear_full_rows();
        let score = self.stats.record_lock(rows_cleared, &self.config);
        if score.level_changed {
            self.clock
                .set_interval(self.config.drop_interval(self.stats.level()));
        }
        let game_over = self.spawn_next().is_err();
        LockReport {
            kind,
            rows_cleared,
            points: score.points + drop_points,
            level_changed: score.level_changed,
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rotation, SPAWN_ANCHOR};

    /// Cycles through a fixed list of kinds.
    #[derive(Debug)]
    struct Sequence {
        kinds: Vec<PieceKind>,
        next: usize,
    }

    impl PieceGenerator for Sequence {
        fn next_kind(&mut self) -> PieceKind {
            let kind = self.kinds[self.next % self.kinds.len()];
            self.next += 1;
            kind
        }
    }

    fn session_with_config(config: GameConfig, kinds: &[PieceKind]) -> GameSession {
        let generator = Box::new(Sequence {
            kinds: kinds.to_vec(),
            next: 0,
        });
        GameSession::with_generator(config, generator).unwrap()
    }

    fn session_with(kinds: &[PieceKind]) -> GameSession {
        session_with_config(GameConfig::default(), kinds)
    }

    fn started(kinds: &[PieceKind]) -> GameSession {
        let mut session = session_with(kinds);
        assert_eq!(session.handle_event(GameEvent::Start), EventOutcome::Applied);
        session
    }

    fn solid(cells: impl IntoIterator<Item = (i32, i32)>) -> Vec<(Position, Cell)> {
        cells
            .into_iter()
            .map(|(col, row)| (Position::new(col, row), Cell::Solid))
            .collect()
    }

    fn anchor(session: &GameSession) -> Position {
        session.active_piece().unwrap().anchor()
    }

    #[test]
    fn test_new_session_is_ready_and_empty() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from_u128(3)).unwrap();
        assert_eq!(session.state(), GameState::Ready);
        assert!(session.active_piece().is_none());
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.preview().count(), 5);
        assert_eq!(session.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        let err = GameSession::new(config, PieceSeed::from_u128(0)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroLinesPerLevel);
    }

    #[test]
    fn test_start_spawns_first_piece() {
        let session = started(&[PieceKind::T, PieceKind::S]);
        assert!(session.state().is_playing());
        let piece = session.active_piece().unwrap();
        assert_eq!(piece.kind(), PieceKind::T);
        assert_eq!(piece.anchor(), SPAWN_ANCHOR);
        assert_eq!(session.preview().next(), Some(PieceKind::S));
    }

    #[test]
    fn test_events_outside_playing_are_ignored() {
        let mut session = session_with(&[PieceKind::T]);
        for event in [
            GameEvent::Tick,
            GameEvent::Restart,
            Input::MoveLeft.into(),
            Input::HardDrop.into(),
            Input::Pause.into(),
        ] {
            assert_eq!(session.handle_event(event), EventOutcome::Ignored, "{event:?}");
        }
        assert!(session.state().is_ready());

        session.handle_event(GameEvent::Start);
        assert_eq!(session.handle_event(GameEvent::Start), EventOutcome::Ignored);
        assert_eq!(session.handle_event(GameEvent::Restart), EventOutcome::Ignored);
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut session = started(&[PieceKind::T]);
        assert_eq!(session.handle_event(GameEvent::Tick), EventOutcome::Applied);
        assert_eq!(anchor(&session), SPAWN_ANCHOR.offset(0, 1));
    }

    #[test]
    fn test_tick_locks_and_clears_single_row() {
        let mut session = started(&[PieceKind::I, PieceKind::O]);
        // Horizontal I on row 19, columns 3-6.
        session
            .set_active_piece(ActivePiece::new(
                PieceKind::I,
                Rotation::SPAWN,
                Position::new(3, 18),
            ))
            .unwrap();
        session
            .lock_cells(&solid([0, 1, 2, 7, 8, 9].map(|col| (col, 19))))
            .unwrap();

        let outcome = session.handle_event(GameEvent::Tick);
        assert_eq!(
            outcome,
            EventOutcome::Locked(LockReport {
                kind: PieceKind::I,
                rows_cleared: 1,
                points: 100,
                level_changed: false,
                game_over: false,
            })
        );
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.stats().lines(), 1);

        let next = session.active_piece().unwrap();
        assert_eq!(next.kind(), PieceKind::O);
        assert_eq!(next.anchor(), SPAWN_ANCHOR);
    }

    #[test]
    fn test_tetris_scores_once() {
        let mut session = started(&[PieceKind::I, PieceKind::T]);
        session
            .lock_cells(&solid((16..20).flat_map(|row| (1..10).map(move |col| (col, row)))))
            .unwrap();
        // Vertical I filling column 0, rows 16-19.
        session
            .set_active_piece(ActivePiece::new(
                PieceKind::I,
                Rotation::new(1),
                Position::new(-2, 16),
            ))
            .unwrap();

        let report = *session.handle_event(GameEvent::Tick).lock_report().unwrap();
        assert_eq!(report.rows_cleared, 4);
        assert_eq!(report.points, 800);
        assert_eq!(session.stats().score(), 800);
        assert_eq!(session.stats().line_cleared_counter()[4], 1);
        assert_eq!(session.stats().line_cleared_counter()[1], 0);
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_spawn_blocked_on_start_is_game_over() {
        let mut session = session_with(&[PieceKind::T]);
        session
            .lock_cells(&solid((0..2).flat_map(|row| (3..7).map(move |col| (col, row)))))
            .unwrap();
        assert_eq!(
            session.handle_event(GameEvent::Start),
            EventOutcome::SpawnBlocked(SpawnBlockedError {
                kind: PieceKind::T
            })
        );
        assert!(session.state().is_game_over());
        assert!(session.active_piece().is_none());
    }

    #[test]
    fn test_spawn_blocked_after_lock_then_restart() {
        let mut session = started(&[PieceKind::O]);
        session
            .set_active_piece(ActivePiece::new(
                PieceKind::O,
                Rotation::SPAWN,
                Position::new(3, 17),
            ))
            .unwrap();
        // Floor under the piece, plus a block in the spawn area.
        session
            .lock_cells(&solid([(4, 19), (5, 19), (4, 1), (5, 1)]))
            .unwrap();

        let outcome = session.handle_event(GameEvent::Tick);
        assert_eq!(
            outcome,
            EventOutcome::Locked(LockReport {
                kind: PieceKind::O,
                rows_cleared: 0,
                points: 0,
                level_changed: false,
                game_over: true,
            })
        );
        assert!(session.state().is_game_over());
        assert!(session.active_piece().is_none());

        assert_eq!(session.handle_event(GameEvent::Tick), EventOutcome::Ignored);
        assert_eq!(session.handle_event(Input::Pause.into()), EventOutcome::Ignored);
        assert_eq!(session.handle_event(GameEvent::Start), EventOutcome::Ignored);

        assert_eq!(session.handle_event(GameEvent::Restart), EventOutcome::Applied);
        assert!(session.state().is_ready());
        assert_eq!(session.board().filled_count(), 0);
        assert!(session.active_piece().is_none());
        assert_eq!(session.stats().locked_pieces(), 0);

        assert_eq!(session.handle_event(GameEvent::Start), EventOutcome::Applied);
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_move_left_at_wall_is_rejected() {
        let mut session = started(&[PieceKind::J]);
        let piece = ActivePiece::new(PieceKind::J, Rotation::SPAWN, Position::new(0, 5));
        session.set_active_piece(piece).unwrap();

        let outcome = session.handle_event(Input::MoveLeft.into());
        assert_eq!(
            outcome,
            EventOutcome::Rejected(ActionError::Placement(PlacementError::OutOfBounds(
                Position::new(-1, 5)
            )))
        );
        assert_eq!(session.active_piece(), Some(&piece));
    }

    #[test]
    fn test_pause_suspends_ticks_and_input() {
        let mut session = started(&[PieceKind::T]);
        assert_eq!(session.handle_event(Input::Pause.into()), EventOutcome::Applied);
        assert!(session.state().is_paused());

        assert_eq!(session.handle_event(GameEvent::Tick), EventOutcome::Ignored);
        assert_eq!(session.handle_event(Input::MoveLeft.into()), EventOutcome::Ignored);
        assert_eq!(session.handle_event(Input::RotateCw.into()), EventOutcome::Ignored);
        assert!(session.advance(Duration::from_secs(5)).is_empty());
        assert_eq!(anchor(&session), SPAWN_ANCHOR);

        assert_eq!(session.handle_event(Input::Pause.into()), EventOutcome::Applied);
        assert_eq!(session.handle_event(GameEvent::Tick), EventOutcome::Applied);
        assert_eq!(anchor(&session), SPAWN_ANCHOR.offset(0, 1));
    }

    #[test]
    fn test_soft_drop_scores_and_does_not_lock() {
        let mut session = started(&[PieceKind::T]);
        assert_eq!(session.handle_event(Input::SoftDrop.into()), EventOutcome::Applied);
        assert_eq!(session.stats().score(), 1);

        session
            .set_active_piece(ActivePiece::new(
                PieceKind::T,
                Rotation::SPAWN,
                Position::new(3, 18),
            ))
            .unwrap();
        let outcome = session.handle_event(Input::SoftDrop.into());
        assert!(outcome.is_rejected());
        assert!(session.active_piece().is_some());
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.stats().score(), 1);
    }

    #[test]
    fn test_hard_drop_locks_with_drop_points() {
        let mut session = started(&[PieceKind::O, PieceKind::T]);
        let outcome = session.handle_event(Input::HardDrop.into());
        assert_eq!(
            outcome,
            EventOutcome::Locked(LockReport {
                kind: PieceKind::O,
                rows_cleared: 0,
                points: 36,
                level_changed: false,
                game_over: false,
            })
        );
        assert_eq!(session.stats().score(), 36);
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(session.active_piece().unwrap().kind(), PieceKind::T);
    }

    #[test]
    fn test_rotation_inputs() {
        let mut session = started(&[PieceKind::T]);
        assert_eq!(session.handle_event(Input::RotateCw.into()), EventOutcome::Applied);
        assert_eq!(session.active_piece().unwrap().rotation(), Rotation::new(1));
        assert_eq!(session.handle_event(Input::RotateCcw.into()), EventOutcome::Applied);
        assert_eq!(session.handle_event(Input::RotateCcw.into()), EventOutcome::Applied);
        assert_eq!(session.active_piece().unwrap().rotation(), Rotation::new(3));
    }

    #[test]
    fn test_level_up_speeds_up_gravity() {
        let config = GameConfig {
            lines_per_level: 1,
            ..GameConfig::default()
        };
        let mut session = session_with_config(config, &[PieceKind::I, PieceKind::O]);
        session.handle_event(GameEvent::Start);
        session
            .set_active_piece(ActivePiece::new(
                PieceKind::I,
                Rotation::SPAWN,
                Position::new(3, 18),
            ))
            .unwrap();
        session
            .lock_cells(&solid([0, 1, 2, 7, 8, 9].map(|col| (col, 19))))
            .unwrap();

        let report = *session.handle_event(GameEvent::Tick).lock_report().unwrap();
        assert!(report.level_changed);
        // Points use the level before the clear.
        assert_eq!(report.points, 100);
        assert_eq!(session.stats().level(), 2);
        assert_eq!(session.drop_interval(), Duration::from_millis(900));
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut session = started(&[PieceKind::T]);
        let outcomes = session.advance(Duration::from_millis(2500));
        assert_eq!(outcomes, vec![EventOutcome::Applied; 2]);
        assert_eq!(anchor(&session), SPAWN_ANCHOR.offset(0, 2));

        assert_eq!(session.advance(Duration::from_millis(500)).len(), 1);
        assert_eq!(session.stats().play_time(), Duration::from_secs(3));
    }

    #[test]
    fn test_process_drains_queue_in_order() {
        let mut session = session_with(&[PieceKind::T]);
        let mut queue = EventQueue::new();
        queue.push(GameEvent::Start);
        queue.push(Input::MoveRight);
        queue.push(Input::MoveRight);
        queue.push(Input::RotateCw);

        let outcomes = session.process(&mut queue);
        assert_eq!(outcomes, vec![EventOutcome::Applied; 4]);
        assert!(queue.is_empty());
        let piece = session.active_piece().unwrap();
        assert_eq!(piece.anchor(), SPAWN_ANCHOR.offset(2, 0));
        assert_eq!(piece.rotation(), Rotation::new(1));
    }

    #[test]
    fn test_lock_cells_rejects_active_piece_cells() {
        let mut session = started(&[PieceKind::O]);
        let err = session.lock_cells(&solid([(4, 0)])).unwrap_err();
        assert_eq!(err, PlacementError::Occupied(Position::new(4, 0)));
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_snapshot() {
        let session = started(&[PieceKind::O, PieceKind::T]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, GameState::Playing);
        let active = snapshot.active.unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.cells, session.active_piece().unwrap().cells());
        assert!(snapshot.ghost.unwrap().contains(&Position::new(4, 19)));
        assert_eq!(snapshot.preview.len(), 5);
        assert_eq!(snapshot.preview[0], PieceKind::T);
        assert_eq!(snapshot.drop_interval_ms, 1000);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"state\":\"Playing\""));
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}

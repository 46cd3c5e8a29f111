use std::time::Instant;

use log::{debug, info, trace};
use serde::Serialize;

use crate::core::{board::Board, piece::ActivePiece};

use super::{
    command::Command,
    drop_scheduler::DropScheduler,
    game_stats::GameStats,
    piece_controller::{MoveOutcome, PieceController},
    piece_generator::{PieceGenerator, PieceSeed},
    snapshot::SessionSnapshot,
};

/// Play state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Active,
    Paused,
    GameOver,
}

impl GameMode {
    /// Returns the banner to show over the board, if any.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            GameMode::Active => None,
            GameMode::Paused => Some("PAUSED"),
            GameMode::GameOver => Some("GAME OVER"),
        }
    }
}

/// A game in progress: board, falling piece, preview, statistics and drop timer.
///
/// Every method that depends on time takes the current instant from the caller. The drop
/// timer runs exactly while the mode is [`GameMode::Active`].
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use blockfall_engine::{Command, GameMode, GameSession};
///
/// let t0 = Instant::now();
/// let mut session = GameSession::new(t0);
/// assert_eq!(session.mode(), GameMode::Active);
///
/// session.handle(Command::HardDrop, t0);
/// assert_eq!(session.stats().completed_pieces(), 1);
///
/// session.handle(Command::TogglePause, t0);
/// assert_eq!(session.snapshot().message, Some("PAUSED"));
/// assert!(!session.update(t0 + Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    controller: PieceController,
    next_piece: ActivePiece,
    generator: PieceGenerator,
    stats: GameStats,
    mode: GameMode,
    scheduler: DropScheduler,
}

impl GameSession {
    /// Starts a game on an empty board with a random seed.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self::with_generator(Board::new(), PieceGenerator::new(), now)
    }

    /// Starts a game on an empty board with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, now: Instant) -> Self {
        Self::with_board(Board::new(), seed, now)
    }

    /// Starts a game on a pre-filled board.
    ///
    /// The board is only used for this first game; [`Command::NewGame`] starts from an
    /// empty board. If the first piece collides at spawn the session starts in
    /// [`GameMode::GameOver`].
    #[must_use]
    pub fn with_board(board: Board, seed: PieceSeed, now: Instant) -> Self {
        Self::with_generator(board, PieceGenerator::with_seed(seed), now)
    }

    fn with_generator(board: Board, mut generator: PieceGenerator, now: Instant) -> Self {
        let seed = generator.seed();
        let piece = generator.create_piece();
        let next_piece = generator.create_piece();
        let mut session = Self {
            board,
            controller: PieceController::new(piece),
            next_piece,
            generator,
            stats: GameStats::new(),
            mode: GameMode::Active,
            scheduler: DropScheduler::new(),
        };
        info!("new game (seed {seed})");
        session.enter_spawned_piece(now);
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        self.controller.piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> &ActivePiece {
        &self.next_piece
    }

    /// Returns where the active piece would rest after a hard drop.
    #[must_use]
    pub fn drop_position(&self) -> ActivePiece {
        self.controller.drop_position(&self.board)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    /// Returns when the next automatic drop is due, or `None` unless the game is active.
    #[must_use]
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Applies a player command. Returns whether anything visible changed.
    pub fn handle(&mut self, command: Command, now: Instant) -> bool {
        if command.is_piece_command() && !self.mode.is_active() {
            trace!("ignored {command:?} while {:?}", self.mode);
            return false;
        }

        let changed = match command {
            Command::MoveLeft => self.shift(-1),
            Command::MoveRight => self.shift(1),
            Command::SoftDrop => self.soft_drop(now),
            Command::Rotate => self.controller.rotate(&self.board),
            Command::HardDrop => {
                let rows = self.controller.hard_drop(&self.board);
                trace!("hard drop fell {rows} rows");
                self.lock_piece(now);
                true
            }
            Command::TogglePause => self.toggle_pause(now),
            Command::NewGame => {
                self.new_game(now);
                true
            }
        };
        if !changed {
            trace!("rejected {command:?}");
        }
        changed
    }

    /// Runs the automatic drop if it is due. Returns whether anything visible changed.
    ///
    /// At most one drop happens per call.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.mode.is_active() || !self.scheduler.poll(now) {
            return false;
        }
        self.soft_drop(now)
    }

    /// Resets the board and statistics and starts a fresh game.
    pub fn new_game(&mut self, now: Instant) {
        self.board.reset();
        self.stats = GameStats::new();
        self.controller.set_piece(self.generator.create_piece());
        self.next_piece = self.generator.create_piece();
        info!("new game");
        self.enter_spawned_piece(now);
    }

    /// Switches between active and paused. Has no effect after game over.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.mode {
            GameMode::Active => {
                self.mode = GameMode::Paused;
                self.scheduler.stop();
                info!("paused");
                true
            }
            GameMode::Paused => {
                self.mode = GameMode::Active;
                self.scheduler.resume(now);
                info!("resumed");
                true
            }
            GameMode::GameOver => false,
        }
    }

    /// Builds an owned copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.clone(),
            active: *self.controller.piece(),
            drop_preview: self.drop_position(),
            next: self.next_piece,
            score: self.stats.score(),
            lines: self.stats.total_cleared_lines(),
            level: self.stats.level(),
            completed_pieces: self.stats.completed_pieces(),
            line_clears: *self.stats.line_cleared_counter(),
            mode: self.mode,
            message: self.mode.message(),
        }
    }

    fn shift(&mut self, dx: i32) -> bool {
        self.controller.try_move(&self.board, dx, 0).is_moved()
    }

    fn soft_drop(&mut self, now: Instant) -> bool {
        match self.controller.try_move(&self.board, 0, 1) {
            MoveOutcome::Moved => true,
            MoveOutcome::Landed => {
                self.lock_piece(now);
                true
            }
            MoveOutcome::Blocked => false,
        }
    }

    fn lock_piece(&mut self, now: Instant) {
        let piece = *self.controller.piece();
        piece.lock_into(&mut self.board);
        let cleared_lines = self.board.clear_full_lines();
        let level = self.stats.level();
        let points = self.stats.complete_piece_drop(cleared_lines);
        debug!(
            "locked {:?} at ({}, {}): {cleared_lines} lines, +{points} at level {level}",
            piece.kind(),
            piece.x(),
            piece.y(),
        );

        self.controller.set_piece(self.next_piece.respawned());
        self.next_piece = self.generator.create_piece();
        self.enter_spawned_piece(now);
    }

    /// Checks the freshly spawned piece and either starts its drop timer or ends the game.
    fn enter_spawned_piece(&mut self, now: Instant) {
        let piece = *self.controller.piece();
        if piece.collides(&self.board) {
            self.mode = GameMode::GameOver;
            self.scheduler.stop();
            info!(
                "game over: score {}, lines {}, level {}",
                self.stats.score(),
                self.stats.total_cleared_lines(),
                self.stats.level()
            );
            return;
        }
        debug!("spawned {:?}, next {:?}", piece.kind(), self.next_piece.kind());
        self.mode = GameMode::Active;
        self.scheduler.restart(now, self.stats.level());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{
        board::{COLS, Cell, ROWS},
        catalog::{Color, PieceKind},
    };

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x5e, 0xed, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
        0x0d,
    ]);

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn fill(board: &mut Board, col: usize, row: usize) {
        board.set_cell(col, row, Cell::Filled(Color::Blue));
    }

    /// Board whose bottom row is full except for `gap`.
    fn board_with_gap(gap: usize) -> Board {
        let mut board = Board::new();
        for col in (0..COLS).filter(|&c| c != gap) {
            fill(&mut board, col, ROWS - 1);
        }
        board
    }

    fn vertical_i_at(col: i32) -> ActivePiece {
        let piece = ActivePiece::new(PieceKind::I).rotated_cw(0);
        piece.moved(col - piece.x(), 0)
    }

    #[test]
    fn test_new_session_is_active() {
        let t0 = Instant::now();
        let session = GameSession::with_seed(SEED, t0);
        assert_eq!(session.mode(), GameMode::Active);
        assert_eq!(session.stats(), &GameStats::new());
        assert_eq!(session.next_tick_at(), Some(t0 + ms(800)));
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.active_piece().y(), 0);
    }

    #[test]
    fn test_random_session_starts_active() {
        let t0 = Instant::now();
        let mut session = GameSession::new(t0);
        assert_eq!(session.mode(), GameMode::Active);
        assert_eq!(session.next_tick_at(), Some(t0 + ms(800)));
        session.handle(Command::HardDrop, t0);
        assert_eq!(session.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_same_seed_same_game() {
        let t0 = Instant::now();
        let mut a = GameSession::with_seed(SEED, t0);
        let mut b = GameSession::with_seed(SEED, t0);
        for _ in 0..30 {
            a.handle(Command::HardDrop, t0);
            b.handle(Command::HardDrop, t0);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_single_line_clear() {
        let t0 = Instant::now();
        let mut session = GameSession::with_board(board_with_gap(7), SEED, t0);
        session.controller.set_piece(vertical_i_at(7));

        assert!(session.handle(Command::HardDrop, t0));
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.stats().line_cleared_counter()[1], 1);

        // The three upper I cells shifted down one row; the cleared row is gone.
        assert!(!session.board().is_row_full(ROWS - 1));
        for row in ROWS - 3..ROWS {
            assert_eq!(
                session.board().cell(7, row),
                Some(Cell::Filled(Color::Cyan)),
                "row {row}"
            );
        }
        assert_eq!(session.board().cell(0, ROWS - 1), Some(Cell::Empty));
    }

    #[test]
    fn test_line_clear_scored_at_current_level() {
        let t0 = Instant::now();
        let mut session = GameSession::with_board(board_with_gap(0), SEED, t0);
        for _ in 0..2 {
            session.stats.complete_piece_drop(4);
        }
        session.stats.complete_piece_drop(1);
        assert_eq!(session.stats().level(), 1);
        let score_before = session.stats().score();

        session.stats.complete_piece_drop(1);
        assert_eq!(session.stats().level(), 2);

        session.controller.set_piece(vertical_i_at(0));
        session.handle(Command::HardDrop, t0);
        assert_eq!(session.stats().score(), score_before + 100 + 200);
        assert_eq!(session.stats().total_cleared_lines(), 11);
    }

    #[test]
    fn test_period_recomputed_after_lock() {
        let t0 = Instant::now();
        let mut session = GameSession::with_board(board_with_gap(0), SEED, t0);
        for _ in 0..2 {
            session.stats.complete_piece_drop(4);
        }
        session.stats.complete_piece_drop(1);
        assert_eq!(session.scheduler().period(), ms(800));

        let t1 = t0 + ms(300);
        session.controller.set_piece(vertical_i_at(0));
        session.handle(Command::HardDrop, t1);
        assert_eq!(session.stats().level(), 2);
        assert_eq!(session.scheduler().period(), ms(750));
        assert_eq!(session.next_tick_at(), Some(t1 + ms(750)));
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        let y = session.active_piece().y();

        assert!(!session.update(t0 + ms(799)));
        assert_eq!(session.active_piece().y(), y);

        assert!(session.update(t0 + ms(800)));
        assert_eq!(session.active_piece().y(), y + 1);
        assert!(!session.update(t0 + ms(800)));
    }

    #[test]
    fn test_tick_locks_landed_piece() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        session
            .controller
            .set_piece(ActivePiece::new(PieceKind::O).moved(0, 18));
        let next = *session.next_piece();

        let t1 = t0 + ms(800);
        assert!(session.update(t1));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.board().cell(4, 19), Some(Cell::Filled(Color::Yellow)));
        assert_eq!(*session.active_piece(), next.respawned());
        assert_eq!(session.next_tick_at(), Some(t1 + ms(800)));
    }

    #[test]
    fn test_game_over_on_spawn_collision() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        session
            .controller
            .set_piece(ActivePiece::new(PieceKind::O).moved(-4, 10));
        session.next_piece = ActivePiece::new(PieceKind::O);
        fill(&mut session.board, 4, 1);

        assert!(session.handle(Command::HardDrop, t0));
        assert_eq!(session.mode(), GameMode::GameOver);
        assert!(!session.scheduler().is_running());
        assert_eq!(session.next_tick_at(), None);
        assert_eq!(session.snapshot().message, Some("GAME OVER"));

        // No ticks and no moves after game over.
        let before = session.snapshot();
        assert!(!session.update(t0 + ms(60_000)));
        for command in Command::PIECE_COMMANDS {
            assert!(!session.handle(command, t0), "{command:?}");
        }
        assert!(!session.handle(Command::TogglePause, t0));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_game_over_on_first_spawn() {
        let t0 = Instant::now();
        let mut board = Board::new();
        for col in 3..7 {
            fill(&mut board, col, 0);
        }
        let session = GameSession::with_board(board, SEED, t0);
        assert_eq!(session.mode(), GameMode::GameOver);
        assert_eq!(session.next_tick_at(), None);
    }

    #[test]
    fn test_pause_and_resume() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        let piece = *session.active_piece();

        assert!(session.handle(Command::TogglePause, t0 + ms(100)));
        assert_eq!(session.mode(), GameMode::Paused);
        assert_eq!(session.snapshot().message, Some("PAUSED"));
        assert_eq!(session.next_tick_at(), None);

        for command in Command::PIECE_COMMANDS {
            assert!(!session.handle(command, t0 + ms(200)), "{command:?}");
        }
        assert!(!session.update(t0 + ms(5000)));
        assert_eq!(*session.active_piece(), piece);
        assert_eq!(session.stats().completed_pieces(), 0);

        let t1 = t0 + ms(10_000);
        assert!(session.handle(Command::TogglePause, t1));
        assert_eq!(session.mode(), GameMode::Active);
        assert_eq!(session.snapshot().message, None);
        assert_eq!(session.next_tick_at(), Some(t1 + ms(800)));
        assert!(!session.update(t1 + ms(799)));
        assert!(session.update(t1 + ms(800)));
        assert_eq!(session.active_piece().y(), piece.y() + 1);
    }

    #[test]
    fn test_new_game_from_game_over() {
        let t0 = Instant::now();
        let mut board = board_with_gap(0);
        for col in 3..7 {
            fill(&mut board, col, 0);
        }
        let mut session = GameSession::with_board(board, SEED, t0);
        session.stats.complete_piece_drop(4);
        assert!(session.mode().is_game_over());

        let t1 = t0 + ms(1000);
        assert!(session.handle(Command::NewGame, t1));
        assert_eq!(session.mode(), GameMode::Active);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().total_cleared_lines(), 0);
        assert_eq!(session.stats().level(), 1);
        assert_eq!(session.active_piece().y(), 0);
        assert!(!session.active_piece().collides(session.board()));
        assert_eq!(session.next_tick_at(), Some(t1 + ms(800)));
    }

    #[test]
    fn test_new_game_while_paused() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        session.handle(Command::HardDrop, t0);
        session.handle(Command::TogglePause, t0);

        assert!(session.handle(Command::NewGame, t0));
        assert_eq!(session.mode(), GameMode::Active);
        assert_eq!(session.stats().completed_pieces(), 0);
        assert!(session.scheduler().is_running());
    }

    #[test]
    fn test_blocked_move_reports_no_change() {
        let t0 = Instant::now();
        let mut session = GameSession::with_seed(SEED, t0);
        session.controller.set_piece(ActivePiece::new(PieceKind::O).moved(-4, 0));
        assert!(!session.handle(Command::MoveLeft, t0));
        assert!(session.handle(Command::MoveRight, t0));
        assert_eq!(session.active_piece().x(), 1);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let t0 = Instant::now();
        let session = GameSession::with_seed(SEED, t0);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["mode"], "active");
        assert_eq!(json["score"], 0);
        assert_eq!(json["level"], 1);
        assert!(json["message"].is_null());
        assert_eq!(json["board"].as_array().unwrap().len(), ROWS);
        assert_eq!(json["board"][0].as_str().unwrap().len(), COLS);
        assert!(json["active"]["shape"].is_array());
    }
}

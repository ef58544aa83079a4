//! Board module - the game state machine
//!
//! A [`Board`] owns the locked grid, the active piece, the hold slot, the piece
//! queue and the score. Every operation is synchronous and reports its result
//! as a plain value: a blocked move is `false`, never an error.
//!
//! Coordinates: `(x, y)` locates the origin of the active shape, with
//! `shape[row][col]` occupying `(x + col, y + row)`. New pieces appear at
//! `(width / 2 - 1, 0)`, inside the hidden buffer.
//!
//! The board always has an active piece: construction spawns the first one.
//! After game over the last locked piece stays as the active piece and the
//! board waits for [`Board::reset`]; the board itself does not refuse further
//! calls.

use log::{debug, info, trace};

use crate::config::BoardConfig;
use crate::error::ConfigError;
use crate::matrix::{clear_full_rows, intersects, merge, ClearResult, Grid};
use crate::pieces::{Piece, Shape};
use crate::rng::{PieceGenerator, RandomSource, SimpleRng};
use crate::rotation::RotationTracker;
use crate::scoring::ScoreTracker;
use crate::snapshot::{PiecePreview, ViewSnapshot};
use crate::types::{PieceKind, DANGER_ROW, SPAWN_Y};

/// What happened after a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// A new piece was spawned
    Continue(ClearResult),
    /// The danger row is occupied; no piece was spawned
    GameOver(ClearResult),
}

impl LockOutcome {
    pub fn clear(&self) -> &ClearResult {
        match self {
            LockOutcome::Continue(clear) | LockOutcome::GameOver(clear) => clear,
        }
    }

    pub fn into_clear(self) -> ClearResult {
        match self {
            LockOutcome::Continue(clear) | LockOutcome::GameOver(clear) => clear,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, LockOutcome::GameOver(_))
    }
}

/// One game session
#[derive(Debug, Clone)]
pub struct Board<R = SimpleRng> {
    config: BoardConfig,
    grid: Grid,
    generator: PieceGenerator<R>,
    rotation: RotationTracker,
    x: i32,
    y: i32,
    held: Option<&'static Piece>,
    can_hold: bool,
    score: ScoreTracker,
    game_over: bool,
}

impl Board<SimpleRng> {
    /// Create a board whose pieces come from a seeded [`SimpleRng`]
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Board<R> {
    /// Create a board drawing pieces from `rng`, with the first piece spawned
    pub fn with_rng(config: BoardConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let mut generator = PieceGenerator::new(rng, config.lookahead);
        let first = generator.take();
        debug!("spawned {}", first.kind().as_str());

        Ok(Self {
            config,
            grid,
            generator,
            rotation: RotationTracker::new(first),
            x: config.spawn_x(),
            y: SPAWN_Y,
            held: None,
            can_hold: true,
            score: ScoreTracker::new(),
            game_over: false,
        })
    }

    /// Replace the active piece with the next one from the queue.
    ///
    /// Re-enables hold. Does not test the spawn cells: game over is decided
    /// after a lock, not here.
    pub fn spawn_piece(&mut self) {
        let piece = self.generator.take();
        self.place_at_spawn(piece);
        self.can_hold = true;
        debug!("spawned {}", piece.kind().as_str());
    }

    fn place_at_spawn(&mut self, piece: &'static Piece) {
        self.rotation.set_piece(piece);
        self.x = self.config.spawn_x();
        self.y = SPAWN_Y;
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if intersects(&self.grid, self.rotation.current_shape(), nx, ny) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Advance to the next rotation state in place; no kicks
    pub fn rotate(&mut self) -> bool {
        let next = self.rotation.peek_next();
        if intersects(&self.grid, next.shape, self.x, self.y) {
            return false;
        }
        self.rotation.commit(next.index);
        true
    }

    /// Landing row of the active piece, without moving it
    pub fn ghost_position(&self) -> i32 {
        let shape = self.rotation.current_shape();
        let mut y = self.y;
        while !intersects(&self.grid, shape, self.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Move the active piece straight to its landing row.
    ///
    /// Returns the number of rows descended. The piece is not locked.
    pub fn hard_drop(&mut self) -> u32 {
        let landing = self.ghost_position();
        let distance = (landing - self.y).max(0) as u32;
        self.y = landing;
        distance
    }

    /// Merge the active piece, clear full rows, then either end the game or
    /// spawn the next piece.
    pub fn lock_and_advance(&mut self) -> LockOutcome {
        let merged = merge(&self.grid, self.rotation.current_shape(), self.x, self.y);
        let clear = clear_full_rows(&merged);
        self.grid = clear.grid.clone();

        if clear.lines_removed > 0 {
            debug!(
                "cleared {} line(s) {:?} for {} points",
                clear.lines_removed, clear.cleared_rows, clear.score_bonus
            );
        }

        if self.is_danger_line_reached() {
            self.game_over = true;
            info!(
                "game over: score {}, lines {}",
                self.score.points(),
                self.score.lines()
            );
            return LockOutcome::GameOver(clear);
        }

        self.spawn_piece();
        LockOutcome::Continue(clear)
    }

    /// True when the first visible row holds any locked cell
    pub fn is_danger_line_reached(&self) -> bool {
        self.grid.is_row_occupied(DANGER_ROW)
    }

    /// Put the active piece on hold, or swap it with the held one.
    ///
    /// Returns `false` when hold is not available for the current piece. The
    /// first hold spawns a fresh piece, which re-enables hold; a swap keeps
    /// hold disabled until the next lock.
    pub fn hold_or_swap(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        self.can_hold = false;

        let active = self.rotation.piece();
        match self.held.replace(active) {
            None => {
                trace!("hold {}", active.kind().as_str());
                self.spawn_piece();
            }
            Some(previous) => {
                trace!(
                    "swap {} for {}",
                    active.kind().as_str(),
                    previous.kind().as_str()
                );
                self.place_at_spawn(previous);
            }
        }
        true
    }

    /// Empty grid, zeroed score, empty hold, fresh piece. Leaves game over.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.held = None;
        self.can_hold = true;
        self.game_over = false;
        self.spawn_piece();
        info!("new game");
    }

    /// Owned projection of the active piece, hold slot, queue and counters
    pub fn view_snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            kind: self.rotation.piece().kind(),
            shape: *self.rotation.current_shape(),
            rotation: self.rotation.current_index(),
            x: self.x,
            y: self.y,
            ghost_y: self.ghost_position(),
            held: self.held.map(PiecePreview::of),
            next: self
                .generator
                .peek_all(self.config.lookahead)
                .into_iter()
                .map(PiecePreview::of)
                .collect(),
            can_hold: self.can_hold,
            game_over: self.game_over,
            score: self.score.points(),
            level: self.score.level(),
            lines: self.score.lines(),
        }
    }
}

impl<R> Board<R> {
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Independent copy of the locked grid
    pub fn grid_snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Direct access to the locked cells, for setting up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active_kind(&self) -> PieceKind {
        self.rotation.piece().kind()
    }

    pub fn active_shape(&self) -> &'static Shape {
        self.rotation.current_shape()
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation.current_index()
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held.map(Piece::kind)
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreTracker {
        &mut self.score
    }

    /// Kinds of the next `n` pieces (at most the queue length)
    pub fn upcoming(&self, n: usize) -> Vec<PieceKind> {
        self.generator
            .peek_all(n)
            .into_iter()
            .map(Piece::kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::EMPTY;

    /// I, T, O, Z, J, L, S, repeating
    fn scripted_board() -> Board<ScriptedSource> {
        Board::with_rng(
            BoardConfig::default(),
            ScriptedSource::new([0, 5, 3, 6, 1, 2, 4]),
        )
        .unwrap()
    }

    #[test]
    fn test_new_board_spawns_at_top_center() {
        let board = scripted_board();
        assert_eq!(board.active_kind(), PieceKind::I);
        assert_eq!(board.position(), (4, 0));
        assert_eq!(board.rotation_index(), 0);
        assert!(board.can_hold());
        assert!(!board.is_game_over());
        assert!(board.grid().is_empty());
        assert_eq!(board.upcoming(4), vec![PieceKind::T, PieceKind::O, PieceKind::Z, PieceKind::J]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Board::new(BoardConfig::new(0, 25), 1).is_err());
        assert!(Board::new(BoardConfig::new(10, 2), 1).is_err());
        assert!(Board::new(BoardConfig::default().with_lookahead(3), 1).is_err());
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut board = scripted_board();
        // Horizontal I spans columns x..x+3
        for _ in 0..4 {
            assert!(board.move_left());
        }
        assert!(!board.move_left());
        assert_eq!(board.position(), (0, 0));
    }

    #[test]
    fn test_move_right_stops_at_wall() {
        let mut board = scripted_board();
        assert!(board.move_right());
        assert!(board.move_right());
        assert!(!board.move_right());
        assert_eq!(board.position(), (6, 0));
    }

    #[test]
    fn test_move_down_blocked_by_locked_cells() {
        let mut board = scripted_board();
        board.grid_mut().set(5, 3, 2);
        assert!(board.move_down());
        assert!(!board.move_down());
        assert_eq!(board.position(), (4, 1));
    }

    #[test]
    fn test_ghost_and_hard_drop() {
        let mut board = scripted_board();
        // I occupies row offset 1, so it lands with y = 23 on a 25-row board
        assert_eq!(board.ghost_position(), 23);
        assert_eq!(board.position(), (4, 0));
        assert_eq!(board.hard_drop(), 23);
        assert_eq!(board.position(), (4, 23));
        assert_eq!(board.hard_drop(), 0);
    }

    #[test]
    fn test_rotate_blocked_leaves_state() {
        let mut board = scripted_board();
        // Vertical I would cover (5, 0..=3)
        board.grid_mut().set(5, 3, 1);
        assert!(!board.rotate());
        assert_eq!(board.rotation_index(), 0);
        board.grid_mut().set(5, 3, EMPTY);
        assert!(board.rotate());
        assert_eq!(board.rotation_index(), 1);
    }

    #[test]
    fn test_rotation_cycle_closes() {
        let mut board = scripted_board();
        board.move_down();
        board.move_down();
        for _ in 0..2 {
            assert!(board.rotate());
        }
        assert_eq!(board.rotation_index(), 0);
    }

    #[test]
    fn test_lock_spawns_next_piece() {
        let mut board = scripted_board();
        board.hard_drop();
        let outcome = board.lock_and_advance();
        assert!(!outcome.is_game_over());
        assert_eq!(outcome.clear().lines_removed, 0);
        assert_eq!(board.grid().row(24), &[0, 0, 0, 0, 1, 1, 1, 1, 0, 0]);
        assert_eq!(board.active_kind(), PieceKind::T);
        assert_eq!(board.position(), (4, 0));
        assert!(!board.is_danger_line_reached());
    }

    #[test]
    fn test_lock_clears_full_row() {
        let mut board = scripted_board();
        for x in 0..10 {
            if !(4..8).contains(&x) {
                board.grid_mut().set(x, 24, 3);
            }
        }
        board.hard_drop();
        let clear = board.lock_and_advance().into_clear();
        assert_eq!(clear.lines_removed, 1);
        assert_eq!(clear.score_bonus, 50);
        assert_eq!(clear.cleared_rows, vec![24]);
        assert!(board.grid().is_empty());
    }

    #[test]
    fn test_lock_into_danger_row_ends_game() {
        let mut board = scripted_board();
        board.grid_mut().set(0, 2, 7);
        let active = board.active_kind();
        let outcome = board.lock_and_advance();
        assert!(outcome.is_game_over());
        assert!(board.is_game_over());
        assert!(board.is_danger_line_reached());
        // No new piece
        assert_eq!(board.active_kind(), active);
        assert_eq!(board.upcoming(1), vec![PieceKind::T]);
    }

    #[test]
    fn test_first_hold_spawns_and_reenables() {
        let mut board = scripted_board();
        assert!(board.hold_or_swap());
        assert_eq!(board.held_kind(), Some(PieceKind::I));
        assert_eq!(board.active_kind(), PieceKind::T);
        assert!(board.can_hold());
    }

    #[test]
    fn test_swap_disables_hold_until_lock() {
        let mut board = scripted_board();
        assert!(board.hold_or_swap());
        board.move_right();
        assert!(board.hold_or_swap());
        assert_eq!(board.active_kind(), PieceKind::I);
        assert_eq!(board.held_kind(), Some(PieceKind::T));
        assert_eq!(board.position(), (4, 0));
        assert_eq!(board.rotation_index(), 0);
        assert!(!board.can_hold());

        assert!(!board.hold_or_swap());
        assert_eq!(board.active_kind(), PieceKind::I);
        assert_eq!(board.held_kind(), Some(PieceKind::T));

        board.hard_drop();
        board.lock_and_advance();
        assert!(board.can_hold());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = scripted_board();
        board.grid_mut().set(0, 2, 7);
        board.hold_or_swap();
        board.score_mut().add_points(500);
        board.score_mut().add_lines(4);
        board.lock_and_advance();
        assert!(board.is_game_over());

        board.reset();
        assert!(!board.is_game_over());
        assert!(board.grid().is_empty());
        assert_eq!(board.held_kind(), None);
        assert!(board.can_hold());
        assert_eq!(*board.score(), ScoreTracker::new());
        assert_eq!(board.position(), (4, 0));
    }

    #[test]
    fn test_view_snapshot_contents() {
        let mut board = scripted_board();
        board.hold_or_swap();
        let view = board.view_snapshot();
        assert_eq!(view.kind, PieceKind::T);
        assert_eq!(view.shape, *Piece::of(PieceKind::T).spawn_shape());
        assert_eq!((view.x, view.y), (4, 0));
        assert_eq!(view.ghost_y, 23);
        assert_eq!(view.held.map(|p| p.kind), Some(PieceKind::I));
        assert_eq!(view.next.len(), 4);
        assert_eq!(view.next[0].kind, PieceKind::O);
        assert_eq!(view.level, 1);
    }

    #[test]
    fn test_snapshots_do_not_alias_board() {
        let mut board = scripted_board();
        let grid = board.grid_snapshot();
        let view = board.view_snapshot();
        board.grid_mut().set(0, 24, 5);
        board.rotate();
        board.move_down();
        assert!(grid.is_empty());
        assert_eq!(view.rotation, 0);
        assert_eq!(view.y, 0);
    }

    #[test]
    fn test_seeded_boards_match() {
        let a = Board::new(BoardConfig::default(), 42).unwrap();
        let b = Board::new(BoardConfig::default(), 42).unwrap();
        assert_eq!(a.active_kind(), b.active_kind());
        assert_eq!(a.upcoming(4), b.upcoming(4));
    }

    /// Read-only accessors need no random source bound
    fn preview<R>(board: &Board<R>) -> (Option<PieceKind>, Vec<PieceKind>) {
        (board.held_kind(), board.upcoming(3))
    }

    #[test]
    fn test_upcoming_through_unbounded_board() {
        let board = scripted_board();
        assert_eq!(
            preview(&board),
            (None, vec![PieceKind::T, PieceKind::O, PieceKind::Z])
        );
    }
}

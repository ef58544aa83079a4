//! Game module - one call per player action
//!
//! [`Game`] wraps a [`Board`] and adds the scoring flow around it: drop points,
//! clear bonuses and line counts. Each action returns what the renderer needs
//! next, a [`ViewSnapshot`] for plain moves and a [`DropOutcome`] for drops,
//! which may lock the piece.
//!
//! The game does not refuse actions after game over; the driver decides which
//! actions it still forwards (normally only reset).

use crate::board::{Board, LockOutcome};
use crate::config::BoardConfig;
use crate::error::ConfigError;
use crate::matrix::{ClearResult, Grid};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{hard_drop_points, soft_drop_points};
use crate::snapshot::ViewSnapshot;
use crate::types::{EventSource, GameAction};

/// Result of a soft or hard drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    /// Set when the piece locked and the game goes on
    pub clear: Option<ClearResult>,
    pub game_over: bool,
    pub view: ViewSnapshot,
    /// Full grid after a lock, for redrawing the background
    pub background: Option<Grid>,
}

impl DropOutcome {
    pub fn locked(&self) -> bool {
        self.background.is_some()
    }

    pub fn lines_removed(&self) -> u32 {
        self.clear.as_ref().map_or(0, |c| c.lines_removed)
    }
}

/// Result of [`Game::apply_action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    View(ViewSnapshot),
    Drop(DropOutcome),
    Reset(ViewSnapshot, Grid),
    /// Actions the game does not own (pause)
    Unhandled,
}

impl ActionOutcome {
    pub fn view(&self) -> Option<&ViewSnapshot> {
        match self {
            ActionOutcome::View(view) | ActionOutcome::Reset(view, _) => Some(view),
            ActionOutcome::Drop(drop) => Some(&drop.view),
            ActionOutcome::Unhandled => None,
        }
    }

    /// Grid to redraw, when one was issued
    pub fn background(&self) -> Option<&Grid> {
        match self {
            ActionOutcome::Drop(drop) => drop.background.as_ref(),
            ActionOutcome::Reset(_, grid) => Some(grid),
            _ => None,
        }
    }
}

/// Action controller for one session
#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng> {
    board: Board<R>,
}

impl Game<SimpleRng> {
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            board: Board::new(config, seed)?,
        })
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(config: BoardConfig, rng: R) -> Result<Self, ConfigError> {
        Ok(Self {
            board: Board::with_rng(config, rng)?,
        })
    }

    pub fn from_board(board: Board<R>) -> Self {
        Self { board }
    }

    pub fn move_left(&mut self) -> ViewSnapshot {
        self.board.move_left();
        self.view()
    }

    pub fn move_right(&mut self) -> ViewSnapshot {
        self.board.move_right();
        self.view()
    }

    pub fn rotate(&mut self) -> ViewSnapshot {
        self.board.rotate();
        self.view()
    }

    pub fn hold(&mut self) -> ViewSnapshot {
        self.board.hold_or_swap();
        self.view()
    }

    /// Move down one row, or lock if the piece has landed.
    ///
    /// A successful user drop scores a point; gravity drops are free.
    pub fn soft_drop(&mut self, source: EventSource) -> DropOutcome {
        if self.board.move_down() {
            self.board.score_mut().add_points(soft_drop_points(source));
            return DropOutcome {
                clear: None,
                game_over: false,
                view: self.view(),
                background: None,
            };
        }
        self.lock()
    }

    /// Drop to the landing row, score two points per row, and lock
    pub fn hard_drop(&mut self) -> DropOutcome {
        let rows = self.board.hard_drop();
        self.board.score_mut().add_points(hard_drop_points(rows));
        self.lock()
    }

    fn lock(&mut self) -> DropOutcome {
        let outcome = self.board.lock_and_advance();
        let clear = outcome.clear();
        let score = self.board.score_mut();
        score.add_points(clear.score_bonus);
        score.add_lines(clear.lines_removed);

        let (clear, game_over) = match outcome {
            LockOutcome::Continue(clear) => (Some(clear), false),
            LockOutcome::GameOver(_) => (None, true),
        };
        DropOutcome {
            clear,
            game_over,
            view: self.view(),
            background: Some(self.board.grid_snapshot()),
        }
    }

    /// Start over: empty grid, zero score
    pub fn reset(&mut self) -> (ViewSnapshot, Grid) {
        self.board.reset();
        (self.view(), self.board.grid_snapshot())
    }

    pub fn apply_action(&mut self, action: GameAction, source: EventSource) -> ActionOutcome {
        match action {
            GameAction::MoveLeft => ActionOutcome::View(self.move_left()),
            GameAction::MoveRight => ActionOutcome::View(self.move_right()),
            GameAction::Rotate => ActionOutcome::View(self.rotate()),
            GameAction::Hold => ActionOutcome::View(self.hold()),
            GameAction::SoftDrop => ActionOutcome::Drop(self.soft_drop(source)),
            GameAction::HardDrop => ActionOutcome::Drop(self.hard_drop()),
            GameAction::Reset => {
                let (view, grid) = self.reset();
                ActionOutcome::Reset(view, grid)
            }
            GameAction::Pause => ActionOutcome::Unhandled,
        }
    }

    pub fn view(&self) -> ViewSnapshot {
        self.board.view_snapshot()
    }
}

impl<R> Game<R> {
    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<R> {
        &mut self.board
    }

    pub fn grid(&self) -> Grid {
        self.board.grid_snapshot()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.board.score().points()
    }

    pub fn level(&self) -> u32 {
        self.board.score().level()
    }

    pub fn lines(&self) -> u32 {
        self.board.score().lines()
    }
}

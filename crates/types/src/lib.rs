//! Shared types and constants for the blockfall workspace.
//!
//! Everything here is plain data with no dependencies, so the core, the input
//! layer and the renderer can all agree on the same vocabulary.
//!
//! # Board Geometry
//!
//! The default playfield is 10 columns by 25 rows. Rows `0` and `1` are a
//! hidden buffer above the visible area; the first visible row is
//! [`DANGER_ROW`] (index 2). A locked block in that row ends the game.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Columns |
//! | `DEFAULT_BOARD_HEIGHT` | 25 | Rows, including the hidden buffer |
//! | `HIDDEN_ROWS` | 2 | Rows above the visible area |
//! | `DANGER_ROW` | 2 | First visible row, game over when occupied |
//! | `MAX_BOARD_WIDTH` / `MAX_BOARD_HEIGHT` | 100 | Largest accepted board |
//! | `SHAPE_SIZE` | 4 | Side length of every shape matrix |
//!
//! # Scoring
//!
//! - Line clears award `50 × lines²` (50, 200, 450, 800).
//! - A user soft drop awards 1 point; gravity drops award nothing.
//! - A hard drop awards 2 points per row descended.
//! - The level is `lines / 3 + 1`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{fall_interval_ms, GameAction, PieceKind};
//!
//! assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
//! assert_eq!(PieceKind::T.id(), 6);
//!
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(fall_interval_ms(1), 600);
//! assert_eq!(fall_interval_ms(20), 50);
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells, hidden buffer included
pub const DEFAULT_BOARD_HEIGHT: usize = 25;

/// Widest accepted board, in cells
pub const MAX_BOARD_WIDTH: usize = 100;

/// Tallest accepted board, hidden buffer included
pub const MAX_BOARD_HEIGHT: usize = 100;

/// Rows above the visible play area
pub const HIDDEN_ROWS: usize = 2;

/// First visible row; any locked block here ends the game
pub const DANGER_ROW: usize = 2;

/// Row at which new pieces are placed (top of the hidden buffer)
pub const SPAWN_Y: i32 = 0;

/// Side length of every shape matrix in the piece catalog
pub const SHAPE_SIZE: usize = 4;

/// Minimum number of upcoming pieces exposed for previews
pub const MIN_LOOKAHEAD: usize = 4;

/// Default number of upcoming pieces exposed for previews
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Line clear bonus base: a clear of `n` rows awards `LINE_CLEAR_BASE * n * n`
pub const LINE_CLEAR_BASE: u32 = 50;

/// Points for one user-initiated soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row descended by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 3;

/// Gravity interval at level 1
pub const BASE_FALL_MS: u32 = 600;

/// Gravity speed-up per level
pub const FALL_STEP_MS: u32 = 100;

/// Fastest gravity interval
pub const MIN_FALL_MS: u32 = 50;

/// Driver loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeat interval while the key is held
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Gravity interval for a level.
///
/// This is a driver policy: the core never schedules itself. Each level past
/// the first shaves [`FALL_STEP_MS`] off [`BASE_FALL_MS`], floored at
/// [`MIN_FALL_MS`].
pub fn fall_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    BASE_FALL_MS
        .saturating_sub(steps.saturating_mul(FALL_STEP_MS))
        .max(MIN_FALL_MS)
}

/// A cell value on the board: `0` is empty, `1..=7` is a [`PieceKind::id`].
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven tetromino kinds, in catalog order.
///
/// The discriminant order doubles as the color id written into the grid:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Cell value written into the grid for this kind (1..=7)
    pub fn id(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Reverse of [`PieceKind::id`]; `None` for `0` and out-of-range values
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in previews
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Who asked for a downward step.
///
/// Only user-initiated soft drops score; the gravity timer's drops are free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    User,
    Timer,
}

/// Abstract actions the input layer can request.
///
/// Each action maps to exactly one core operation, except `Pause`, which the
/// driver handles by stopping its own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance to the next rotation state
    Rotate,
    /// Drop piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Store the active piece, or swap it with the held one
    Hold,
    /// Stop or resume the driver clock
    Pause,
    /// Start a new game
    Reset,
}

impl GameAction {
    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}

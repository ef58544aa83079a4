//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the game rules and state. It has no dependencies on a
//! terminal, a clock or any I/O: an external driver calls one operation per
//! player action or gravity tick, then pulls a [`ViewSnapshot`] to render.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes and their rotation states
//! - [`matrix`]: the grid plus collision, merge and row clearing
//! - [`rng`]: injectable random sources and the upcoming-piece queue
//! - [`rotation`]: the active piece's orientation, peek then commit
//! - [`board`]: the state machine: movement, locking, hold, game over
//! - [`scoring`]: points, lines and level
//! - [`snapshot`]: owned views for the renderer
//! - [`game`]: one call per player action, with the scoring flow
//! - [`config`] and [`error`]: board configuration and its validation
//!
//! # Game Rules
//!
//! - **Uniform draws**: each piece is picked independently; repeats happen
//! - **Rotation without kicks**: a rotation that collides just fails
//! - **Hold**: once per piece; the first hold spawns a fresh piece
//! - **Game over**: a lock that leaves a block in row 2, the first visible row
//! - **Scoring**: `50 × lines²` per clear, 1 per user soft drop, 2 per hard-dropped row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{BoardConfig, Game};
//! use blockfall_types::EventSource;
//!
//! let mut game = Game::new(BoardConfig::default(), 12345).unwrap();
//!
//! game.move_right();
//! game.rotate();
//! game.soft_drop(EventSource::User);
//! let outcome = game.hard_drop();
//!
//! assert!(outcome.background.is_some()); // the piece locked
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod matrix;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome};
pub use config::BoardConfig;
pub use error::ConfigError;
pub use game::{ActionOutcome, DropOutcome, Game};
pub use matrix::{clear_full_rows, intersects, merge, ClearResult, Grid};
pub use pieces::{Piece, Shape, CATALOG};
pub use rng::{PieceGenerator, RandomSource, ScriptedSource, SimpleRng};
pub use rotation::RotationTracker;
pub use scoring::ScoreTracker;
pub use snapshot::{PiecePreview, ViewSnapshot};

//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer instead of using widget layouts, then flushes the
//! framebuffer to the terminal.
//!
//! - [`GameView`] turns a grid and a view snapshot into a framebuffer (pure)
//! - [`TerminalRenderer`] writes framebuffers, only redrawing what changed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BonusNotice, Frame, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};

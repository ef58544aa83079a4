//! Construction-time errors.
//!
//! Gameplay never fails: blocked moves and unavailable holds are ordinary
//! `false` results. The only errors are malformed inputs caught before a
//! board exists.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board cannot hold a single column, or has no row for the danger check.
    #[error("board must be at least {min_width}x{min_height} cells, got {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    #[error("board must be at most {max_width}x{max_height} cells, got {width}x{height}")]
    TooLarge {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },

    #[error("lookahead of {lookahead} is below the minimum of {min}")]
    LookaheadTooShort { lookahead: usize, min: usize },

    /// A grid built from rows whose lengths disagree.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

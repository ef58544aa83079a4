//! Snapshot module - read-only views handed to the renderer
//!
//! Everything here is owned data. Shapes are copied out of the catalog and the
//! preview list is a fresh `Vec`, so a snapshot stays valid no matter what the
//! board does afterwards.

use crate::pieces::{occupied_cells, Piece, Shape};
use crate::types::PieceKind;

/// A piece in its spawn orientation, as drawn in the hold and next boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl PiecePreview {
    pub fn of(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            shape: *piece.spawn_shape(),
        }
    }
}

/// The active piece, its landing row, the hold slot, the upcoming queue and
/// the counters.
///
/// The locked grid is not part of the view: it is issued separately after a
/// lock, clear or reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewSnapshot {
    pub kind: PieceKind,
    /// Current rotation state of the active piece
    pub shape: Shape,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
    /// Row the active piece would land on if hard-dropped now
    pub ghost_y: i32,
    pub held: Option<PiecePreview>,
    /// Upcoming pieces, next first
    pub next: Vec<PiecePreview>,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl ViewSnapshot {
    /// Absolute grid coordinates of the active piece
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        occupied_cells(&self.shape).map(move |(col, row)| (self.x + col, self.y + row))
    }

    /// Absolute grid coordinates of the landing preview
    pub fn ghost_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        occupied_cells(&self.shape).map(move |(col, row)| (self.x + col, self.ghost_y + row))
    }
}

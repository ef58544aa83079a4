//! Pieces module - the seven tetromino shapes and their rotation states
//!
//! Every rotation state is a 4x4 matrix of cell values: `0` is empty and a
//! nonzero value is the piece's color id. States are listed in clockwise order
//! and the list is cyclic: rotating past the last state returns to the first.
//!
//! Coordinates: `shape[row][col]` occupies grid cell `(x + col, y + row)` when
//! the shape's origin sits at `(x, y)`. Collision, merge and rendering all use
//! this one mapping.

use crate::types::{PieceKind, SHAPE_SIZE};

/// One rotation state: `SHAPE_SIZE` rows of `SHAPE_SIZE` cells
pub type Shape = [[u8; SHAPE_SIZE]; SHAPE_SIZE];

/// An immutable catalog entry
#[derive(Debug, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shapes: &'static [Shape],
}

impl Piece {
    /// Catalog entry for a kind
    pub fn of(kind: PieceKind) -> &'static Piece {
        match kind {
            PieceKind::I => &I_PIECE,
            PieceKind::J => &J_PIECE,
            PieceKind::L => &L_PIECE,
            PieceKind::O => &O_PIECE,
            PieceKind::S => &S_PIECE,
            PieceKind::T => &T_PIECE,
            PieceKind::Z => &Z_PIECE,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// All rotation states, spawn orientation first
    pub fn shapes(&self) -> &'static [Shape] {
        self.shapes
    }

    /// Number of distinct rotation states (never zero)
    pub fn rotation_count(&self) -> usize {
        self.shapes.len()
    }

    /// Rotation state at `index`, wrapping past the end
    pub fn shape(&self, index: usize) -> &'static Shape {
        &self.shapes[index % self.shapes.len()]
    }

    /// Spawn orientation, used for hold and next-piece previews
    pub fn spawn_shape(&self) -> &'static Shape {
        &self.shapes[0]
    }
}

/// The full catalog, in color-id order
pub static CATALOG: [&Piece; 7] = [
    &I_PIECE, &J_PIECE, &L_PIECE, &O_PIECE, &S_PIECE, &T_PIECE, &Z_PIECE,
];

/// Occupied cells of a shape as `(col, row)` offsets from its origin
pub fn occupied_cells(shape: &Shape) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(col, _)| (col as i32, row as i32))
    })
}

static I_PIECE: Piece = Piece {
    kind: PieceKind::I,
    shapes: &[
        [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    ],
};

static J_PIECE: Piece = Piece {
    kind: PieceKind::J,
    shapes: &[
        [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
        [[0, 2, 0, 0], [0, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0]],
    ],
};

static L_PIECE: Piece = Piece {
    kind: PieceKind::L,
    shapes: &[
        [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [3, 3, 3, 0], [3, 0, 0, 0], [0, 0, 0, 0]],
        [[3, 3, 0, 0], [0, 3, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0]],
    ],
};

// Single state: rotation re-tests the same footprint.
static O_PIECE: Piece = Piece {
    kind: PieceKind::O,
    shapes: &[[[0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]]],
};

static S_PIECE: Piece = Piece {
    kind: PieceKind::S,
    shapes: &[
        [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 5, 0, 0], [0, 5, 5, 0], [0, 0, 5, 0], [0, 0, 0, 0]],
    ],
};

static T_PIECE: Piece = Piece {
    kind: PieceKind::T,
    shapes: &[
        [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
        [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    ],
};

static Z_PIECE: Piece = Piece {
    kind: PieceKind::Z,
    shapes: &[
        [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 7, 0], [0, 7, 7, 0], [0, 7, 0, 0], [0, 0, 0, 0]],
    ],
};

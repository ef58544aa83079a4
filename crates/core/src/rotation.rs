//! Rotation module - the active piece's orientation
//!
//! Rotation is a two-step transition: [`RotationTracker::peek_next`] proposes the
//! next state without touching anything, the board tests it for collision, and
//! only then calls [`RotationTracker::commit`]. There are no wall kicks: a
//! colliding rotation simply fails.

use crate::pieces::{Piece, Shape};

/// A proposed rotation, not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextShape {
    pub shape: &'static Shape,
    pub index: usize,
}

/// Current piece and orientation index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTracker {
    piece: &'static Piece,
    current: usize,
}

impl RotationTracker {
    pub fn new(piece: &'static Piece) -> Self {
        Self { piece, current: 0 }
    }

    /// Switch to another piece, back at orientation 0
    pub fn set_piece(&mut self, piece: &'static Piece) {
        self.piece = piece;
        self.current = 0;
    }

    pub fn piece(&self) -> &'static Piece {
        self.piece
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_shape(&self) -> &'static Shape {
        self.piece.shape(self.current)
    }

    /// The clockwise successor of the current state
    pub fn peek_next(&self) -> NextShape {
        let index = (self.current + 1) % self.piece.rotation_count();
        NextShape {
            shape: self.piece.shape(index),
            index,
        }
    }

    /// Apply a previously peeked index
    pub fn commit(&mut self, index: usize) {
        self.current = index % self.piece.rotation_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_starts_at_zero() {
        let tracker = RotationTracker::new(Piece::of(PieceKind::T));
        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.current_shape(), Piece::of(PieceKind::T).spawn_shape());
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let tracker = RotationTracker::new(Piece::of(PieceKind::J));
        let next = tracker.peek_next();
        assert_eq!(next.index, 1);
        assert_eq!(next.shape, Piece::of(PieceKind::J).shape(1));
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn test_cycle_wraps() {
        for kind in PieceKind::ALL {
            let piece = Piece::of(kind);
            let mut tracker = RotationTracker::new(piece);
            for _ in 0..piece.rotation_count() {
                let next = tracker.peek_next();
                tracker.commit(next.index);
            }
            assert_eq!(tracker.current_index(), 0, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_piece_peeks_itself() {
        let tracker = RotationTracker::new(Piece::of(PieceKind::O));
        assert_eq!(tracker.peek_next().index, 0);
    }

    #[test]
    fn test_set_piece_resets_index() {
        let mut tracker = RotationTracker::new(Piece::of(PieceKind::L));
        tracker.commit(2);
        tracker.set_piece(Piece::of(PieceKind::S));
        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.piece().kind(), PieceKind::S);
    }
}

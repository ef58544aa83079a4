//! RNG module - random sources and the upcoming-piece queue
//!
//! Pieces are drawn uniformly and independently from the seven-piece catalog:
//! there is no bag, so repeats are possible. The random source is injected so a
//! session can be replayed from a seed and tests can script the exact order.

use std::collections::VecDeque;

use crate::pieces::{Piece, CATALOG};

/// Anything that can pick an index uniformly below a bound.
pub trait RandomSource {
    /// A value in `0..bound`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid zero seed
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % bound
    }
}

/// A source that replays a fixed list of values, cycling when it runs out.
///
/// Values are reduced modulo the requested bound, so `[5, 0, 3]` against the
/// catalog yields T, I, O, T, I, O, ...
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedSource {
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, pos: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}

/// FIFO of upcoming pieces with a fixed preview depth
#[derive(Debug, Clone)]
pub struct PieceGenerator<R> {
    queue: VecDeque<&'static Piece>,
    lookahead: usize,
    rng: R,
}

impl<R: RandomSource> PieceGenerator<R> {
    /// Seed the queue with `lookahead + 1` draws
    pub fn new(rng: R, lookahead: usize) -> Self {
        let mut generator = Self {
            queue: VecDeque::with_capacity(lookahead + 2),
            lookahead,
            rng,
        };
        for _ in 0..=lookahead {
            generator.push_random();
        }
        generator
    }

    fn push_random(&mut self) {
        let idx = self.rng.next_below(CATALOG.len() as u32) as usize;
        self.queue.push_back(CATALOG[idx]);
    }

    /// Pop the front piece, topping the queue up first so that at least
    /// `lookahead` pieces remain afterwards.
    pub fn take(&mut self) -> &'static Piece {
        while self.queue.len() <= self.lookahead {
            self.push_random();
        }
        match self.queue.pop_front() {
            Some(piece) => piece,
            // The loop above guarantees at least one queued piece.
            None => unreachable!("piece queue is never empty after refill"),
        }
    }

}

impl<R> PieceGenerator<R> {
    /// The piece the next [`take`](PieceGenerator::take) returns
    pub fn peek(&self) -> Option<&'static Piece> {
        self.queue.front().copied()
    }

    /// Up to `n` pieces from the front, without consuming them
    pub fn peek_all(&self, n: usize) -> Vec<&'static Piece> {
        self.queue.iter().take(n).copied().collect()
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_below(7) < 7);
        }
    }

    #[test]
    fn test_uniform_draw_hits_every_kind() {
        let mut generator = PieceGenerator::new(SimpleRng::new(99), 4);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let kind = generator.take().kind();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut src = ScriptedSource::new([5, 0, 10]);
        assert_eq!(src.next_below(7), 5);
        assert_eq!(src.next_below(7), 0);
        assert_eq!(src.next_below(7), 3);
        assert_eq!(src.next_below(7), 5);
    }

    #[test]
    fn test_generator_seeds_lookahead_plus_one() {
        let generator = PieceGenerator::new(SimpleRng::new(1), 4);
        assert_eq!(generator.len(), 5);
        assert_eq!(generator.peek_all(10).len(), 5);
    }

    #[test]
    fn test_take_keeps_lookahead_depth() {
        let mut generator = PieceGenerator::new(SimpleRng::new(1), 4);
        for _ in 0..20 {
            generator.take();
            assert!(generator.len() >= 4);
        }
    }

    #[test]
    fn test_take_follows_scripted_order() {
        // T, O, I, Z, J, L, S in catalog indices.
        let mut generator = PieceGenerator::new(ScriptedSource::new([5, 3, 0, 6, 1, 2, 4]), 4);
        let drawn: Vec<PieceKind> = (0..7).map(|_| generator.take().kind()).collect();
        assert_eq!(
            drawn,
            vec![
                PieceKind::T,
                PieceKind::O,
                PieceKind::I,
                PieceKind::Z,
                PieceKind::J,
                PieceKind::L,
                PieceKind::S
            ]
        );
    }

    #[test]
    fn test_peek_matches_take() {
        let mut generator = PieceGenerator::new(SimpleRng::new(3), 4);
        let preview = generator.peek_all(4);
        assert_eq!(generator.peek(), Some(preview[0]));
        for expected in preview {
            assert_eq!(generator.take(), expected);
        }
    }

    #[test]
    fn test_repeats_are_possible() {
        let mut generator = PieceGenerator::new(ScriptedSource::new([2]), 4);
        assert_eq!(generator.take().kind(), PieceKind::L);
        assert_eq!(generator.take().kind(), PieceKind::L);
    }

    fn depth<R>(generator: &PieceGenerator<R>) -> (usize, usize) {
        (generator.lookahead(), generator.peek_all(usize::MAX).len())
    }

    #[test]
    fn test_queue_inspection_needs_no_rng_bound() {
        let generator = PieceGenerator::new(ScriptedSource::new([1]), 6);
        assert_eq!(depth(&generator), (6, 7));
        assert!(!generator.is_empty());
    }
}

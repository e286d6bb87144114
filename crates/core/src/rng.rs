//! RNG module - bag-based random piece generation
//!
//! Implements the "7-bag" randomization algorithm.
//! Each bag contains one of each piece (Z, S, I, T, O, L, J), shuffled, and every
//! piece is already placed at its spawn offset. Draws from the bag until empty,
//! then generates a new bag.
//!
//! Also provides a simple LCG so sequences are reproducible from a seed.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (feeding it back into `new` resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Upcoming pieces, drawn from shuffled bags of all seven kinds.
///
/// The queue starts empty; it is filled lazily the first time [`PieceBag::advance`]
/// runs and refilled whenever the last piece is taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceBag {
    queue: VecDeque<Piece>,
    rng: SimpleRng,
    width: u8,
    height: u8,
}

impl PieceBag {
    /// Create an empty bag spawning into a `width` x `height` board
    pub fn new(seed: u32, width: u8, height: u8) -> Self {
        Self {
            queue: VecDeque::with_capacity(PieceKind::ALL.len()),
            rng: SimpleRng::new(seed),
            width,
            height,
        }
    }

    /// The piece that will become active next, if the queue is not empty
    pub fn peek(&self) -> Option<&Piece> {
        self.queue.front()
    }

    /// Take the head of the queue (the empty piece if there is none) and refill
    /// the queue if that emptied it.
    pub fn advance(&mut self) -> Piece {
        let next = self.queue.pop_front().unwrap_or_else(Piece::empty);
        if self.queue.is_empty() {
            self.refill();
        }
        next
    }

    /// Drop the queued pieces; the RNG keeps its position.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.queue.iter()
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Generate a new shuffled bag of spawn-ready pieces
    fn refill(&mut self) {
        let mut kinds = PieceKind::ALL;
        self.rng.shuffle(&mut kinds);

        let span = (self.width as u32).saturating_sub(1).max(1);
        for kind in kinds {
            let x = self.rng.next_range(span) as i8;
            let piece = Piece::new(kind, Cell::new(x, -1)).recenter(self.width, self.height, false);
            self.queue.push_back(piece);
        }
    }
}

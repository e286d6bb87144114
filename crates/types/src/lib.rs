//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, scheduling).
//!
//! # Board Dimensions
//!
//! The default playfield ("matrix") is taller and wider than a guideline board:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 24 rows (indexed 0-23, row 0 at the top)
//! - **Next preview**: a 4x2 matrix
//!
//! # Coordinates
//!
//! `x` grows to the right and `y` grows downward. Piece cells may sit above the
//! visible top (`y < 0`) while spawning; they are never stored on the board.
//!
//! # Examples
//!
//! ```
//! use brick_tetris_types::{level_for_lines, Cell, Direction};
//!
//! let cell = Cell::new(3, 4) + Direction::Down.step();
//! assert_eq!(cell, Cell::new(3, 5));
//!
//! assert_eq!(level_for_lines(0), 1);
//! assert_eq!(level_for_lines(45), 3);
//! ```

use std::ops::{Add, AddAssign};

/// Board width in cells (12 columns)
pub const MATRIX_WIDTH: u8 = 12;

/// Board height in cells (24 rows)
pub const MATRIX_HEIGHT: u8 = 24;

/// Size of the "next piece" preview matrix (width, height)
pub const NEXT_MATRIX: (u8, u8) = (4, 2);

/// Flat bonus awarded every time a piece locks
pub const PIECE_LOCK_BONUS: u32 = 12;

/// Points by number of lines cleared by a single lock (index = lines)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 20;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Number of flash frames shown before cleared rows collapse
pub const LINE_FLASH_FRAMES: u32 = 5;

/// Pause between line-clear flash frames (milliseconds)
pub const LINE_FLASH_MS: u32 = 100;

/// Pause between screen-wipe frames (milliseconds)
pub const WIPE_FRAME_MS: u32 = 50;

/// Tick intervals by level (milliseconds per row). Index 0 = level 1.
pub const TICK_INTERVALS: [u32; 10] = [800, 720, 630, 550, 470, 380, 300, 220, 150, 100];

/// Level derived from the total number of cleared lines.
///
/// `min(10, 1 + lines / 20)`
pub fn level_for_lines(lines: u32) -> u32 {
    (1 + lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Tick interval for a level (clamped into 1..=10).
pub fn tick_interval_ms(level: u32) -> u32 {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    TICK_INTERVALS[idx]
}

/// A position (or a relative offset) on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Translate by a `(dx, dy)` step.
    ///
    /// Saturates at the `i8` range, so a piece pushed far above the board
    /// (repeated `Move(Up)` is legal) parks at the limit instead of wrapping.
    pub fn offset_by(self, (dx, dy): (i8, i8)) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        self.offset_by((rhs.x, rhs.y))
    }
}

impl Add<(i8, i8)> for Cell {
    type Output = Cell;

    fn add(self, rhs: (i8, i8)) -> Cell {
        self.offset_by(rhs)
    }
}

impl AddAssign<(i8, i8)> for Cell {
    fn add_assign(&mut self, rhs: (i8, i8)) {
        *self = self.offset_by(rhs);
    }
}

impl From<(i8, i8)> for Cell {
    fn from((x, y): (i8, i8)) -> Self {
        Self { x, y }
    }
}

/// Movement directions accepted by [`Action::Move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Unit step for this direction
    pub fn step(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind also picks the colour the terminal renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Z,
    S,
    I,
    T,
    O,
    L,
    J,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Z,
        PieceKind::S,
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
    ];
}

/// Top-level mode of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Idle, showing the title
    #[default]
    Onboard,
    Running,
    Paused,
    /// Transient: cleared rows are flashing
    LineClearing,
    /// Transient: full-board wipe before Onboard or GameOver
    ScreenClearing,
    GameOver,
}

/// Input actions accepted by the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Reset,
    Pause,
    Resume,
    Move(Direction),
    Rotate,
    Drop,
    Tick,
    Mute,
}

/// Audio cue kinds sent to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Start,
    Drop,
    Clean,
}

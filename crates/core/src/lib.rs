//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the brick game: the board, the seven pieces,
//! the bag that feeds them, scoring, and the reducer that turns actions into frames.
//! It has no dependency on timers, terminals or audio, so it is:
//!
//! - **Deterministic**: the same seed and action sequence produce the same frames
//! - **Testable**: every rule is exercised by plain unit tests
//! - **Portable**: the terminal runner and the headless tests share it
//!
//! # Module Structure
//!
//! - [`board`]: 12x24 committed cells, validity checks and line clearing
//! - [`pieces`]: tetromino shapes, translation and the simple clockwise rotation
//! - [`rng`]: seeded LCG and the 7-piece bag that spawns pieces
//! - [`scoring`]: line table, lock bonus and level derivation
//! - [`game_state`]: the [`GameState`] value and its action reducer
//! - [`machine`]: [`GameMachine`], the holder that commits transitions
//! - [`snapshot`]: owned read-only views for rendering
//!
//! # Example
//!
//! ```
//! use brick_tetris_core::GameMachine;
//! use brick_tetris_core::types::{Action, Direction, Phase};
//!
//! let mut machine = GameMachine::new(12345, 12, 24);
//! machine.dispatch(Action::Reset);
//! assert_eq!(machine.state().phase(), Phase::Running);
//!
//! // The first tick only fills the queue; the second brings in a piece.
//! machine.dispatch(Action::Tick);
//! machine.dispatch(Action::Tick);
//! assert!(!machine.state().active().is_empty());
//!
//! let t = machine.dispatch(Action::Move(Direction::Left));
//! assert!(t.frames.len() <= 1);
//! ```
//!
//! # Timing
//!
//! Animations are expressed as frames carrying a `hold_ms` pause. Gravity is an
//! ordinary [`Action::Tick`](types::Action::Tick) sent by whoever owns the clock.

pub mod board;
pub mod game_state;
pub mod machine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use brick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineClear};
pub use game_state::{Frame, GameState, Transition};
pub use machine::GameMachine;
pub use pieces::{get_shape, Piece};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, calculate_score};
pub use snapshot::Snapshot;

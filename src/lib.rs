//! Brick Tetris (workspace facade crate).
//!
//! Re-exports `brick_tetris::{core,runtime,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use brick_tetris_core as core;
pub use brick_tetris_input as input;
pub use brick_tetris_runtime as runtime;
pub use brick_tetris_term as term;
pub use brick_tetris_types as types;

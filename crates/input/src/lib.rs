//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Action`]s. The mapping is
//! stateless apart from the current [`crate::types::Phase`], which decides
//! whether the pause key pauses or resumes.

pub mod map;

pub use brick_tetris_types as types;

pub use map::{handle_key_event, should_quit};

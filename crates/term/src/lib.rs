//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! libraries and instead renders snapshots into a framebuffer that is diffed
//! and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` free of any presentation concern
//! - Allow precise control over aspect ratio (2 columns per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use brick_tetris_core as core;
pub use brick_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Tone};
pub use game_view::{next_preview, overlay_text, AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};

//! Runtime - the external scheduler around the game machine
//!
//! The core crate is a pure reducer; this crate gives it a clock. A single
//! tokio task owns the [`GameMachine`](core::GameMachine), reads actions from a
//! bounded mpsc queue, generates gravity ticks while the game runs, and plays
//! every transition back frame by frame with the pauses the frames ask for.
//!
//! # Environment Variables
//!
//! - `BRICK_SEED`: RNG seed (default: derived from the system clock)
//! - `BRICK_WIDTH` / `BRICK_HEIGHT`: board size (default 12x24)
//! - `BRICK_TICK_MS`: fixed gravity interval instead of the level table
//! - `BRICK_MUTED`: set to "1" or "true" to start muted
//! - `BRICK_MAX_PENDING`: action queue capacity (default 32)
//!
//! # Usage
//!
//! Async callers run [`run_scheduler`] directly with their own sink. A
//! synchronous UI thread uses [`Runtime`], which owns a tokio runtime and
//! exposes `send` / `try_recv`.

pub mod config;
pub mod runtime;
pub mod scheduler;

pub use brick_tetris_core as core;
pub use brick_tetris_types as types;

pub use config::RuntimeConfig;
pub use runtime::Runtime;
pub use scheduler::{play_transition, run_scheduler, AudioSink, ChannelSink, Outbound, SnapshotSink};

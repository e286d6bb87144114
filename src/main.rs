//! Terminal brick game runner (default binary).
//!
//! The game itself runs on the scheduler task; this thread only forwards key
//! presses and draws whatever snapshot arrived last. Audio cues ring the bell.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use brick_tetris::core::Snapshot;
use brick_tetris::input::{handle_key_event, should_quit};
use brick_tetris::runtime::{Outbound, Runtime, RuntimeConfig};
use brick_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const POLL_MS: u64 = 16;

fn main() -> Result<()> {
    // Logs before raw mode and after it ends, never while the board is on screen.
    let mut runtime = Runtime::start(RuntimeConfig::from_env())?;
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut runtime);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, runtime: &mut Runtime) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut latest: Option<Snapshot> = None;
    let mut dirty = false;

    loop {
        while let Some(msg) = runtime.try_recv() {
            match msg {
                Outbound::Snapshot(snap) => {
                    latest = Some(snap);
                    dirty = true;
                }
                Outbound::Cue(_) => term.bell()?,
            }
        }

        if dirty {
            if let Some(snap) = &latest {
                let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
                view.render_into(snap, Viewport::new(w, h), &mut fb);
                term.draw_swap(&mut fb)?;
            }
            dirty = false;
        }

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let phase = latest.as_ref().map(|s| s.phase).unwrap_or_default();
                if let Some(action) = handle_key_event(key, phase) {
                    // A full queue drops the key press, like a missed keystroke.
                    runtime.send(action);
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}

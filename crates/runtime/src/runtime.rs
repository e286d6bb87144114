//! Runtime integration.
//!
//! Bridges a synchronous UI loop with the async scheduler task.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::config::RuntimeConfig;
use crate::core::{GameMachine, GameState};
use crate::scheduler::{run_scheduler, ChannelSink, Outbound};
use crate::types::Action;

/// Running scheduler instance.
///
/// Dropping the handle shuts the scheduler down. Log lines are printed here,
/// on the caller's thread, so the caller decides when the terminal can take them.
pub struct Runtime {
    _rt: tokio::runtime::Runtime,
    action_tx: mpsc::Sender<Action>,
    out_rx: mpsc::UnboundedReceiver<Outbound>,
}

impl Runtime {
    /// Start the scheduler from environment variables.
    pub fn start_from_env() -> Result<Self> {
        Self::start(RuntimeConfig::from_env())
    }

    pub fn start(config: RuntimeConfig) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::channel::<Action>(config.max_pending.max(1));
        let (mut sink, out_rx) = ChannelSink::channel();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        let machine = GameMachine::from_state(
            GameState::new(config.seed, config.width, config.height).with_muted(config.muted),
        );
        println!(
            "[Runtime] Scheduler starting (seed {}, {}x{}, queue {}{})",
            config.seed,
            config.width,
            config.height,
            config.max_pending,
            if config.muted { ", muted" } else { "" }
        );
        rt.spawn(async move {
            run_scheduler(config, machine, action_rx, &mut sink).await;
        });

        Ok(Self {
            _rt: rt,
            action_tx,
            out_rx,
        })
    }

    /// Queue an action. Returns false when the queue is full or the scheduler is gone.
    pub fn send(&self, action: Action) -> bool {
        self.action_tx.try_send(action).is_ok()
    }

    pub fn try_recv(&mut self) -> Option<Outbound> {
        self.out_rx.try_recv().ok()
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        println!("[Runtime] Scheduler stopped");
    }
}

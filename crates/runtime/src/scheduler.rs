//! The scheduler: the only task that touches the [`GameMachine`].
//!
//! Actions are taken one at a time from an mpsc queue. Gravity ticks are
//! generated here while the game is running. Every transition is played back
//! in full (cues first, then each frame followed by its pause) before the next
//! action is looked at, so input that arrives mid-animation simply waits in the
//! queue.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, Instant};

use crate::config::RuntimeConfig;
use crate::core::{GameMachine, Snapshot, Transition};
use crate::types::{Action, SoundCue};

/// Receives every published frame
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: Snapshot);
}

/// Plays audio cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Message forwarded by [`ChannelSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Snapshot(Snapshot),
    Cue(SoundCue),
}

/// Sink that forwards snapshots and cues over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&mut self, snapshot: Snapshot) {
        // A closed receiver means the UI is gone; the scheduler stops once the
        // action queue closes too.
        let _ = self.tx.send(Outbound::Snapshot(snapshot));
    }
}

impl AudioSink for ChannelSink {
    fn play(&mut self, cue: SoundCue) {
        let _ = self.tx.send(Outbound::Cue(cue));
    }
}

/// Drive `machine` until the action queue closes, then hand it back.
///
/// The current state is published once on start. The task never writes to
/// stdout; the sinks are its only output.
pub async fn run_scheduler<S>(
    config: RuntimeConfig,
    mut machine: GameMachine,
    mut actions: mpsc::Receiver<Action>,
    sink: &mut S,
) -> GameMachine
where
    S: SnapshotSink + AudioSink,
{
    sink.publish(machine.snapshot());

    let mut next_tick = Instant::now() + config.tick_interval(machine.state().level());

    loop {
        let action = if machine.state().is_running() {
            tokio::select! {
                biased;
                received = actions.recv() => match received {
                    Some(action) => action,
                    None => break,
                },
                _ = sleep_until(next_tick) => Action::Tick,
            }
        } else {
            match actions.recv().await {
                Some(action) => action,
                None => break,
            }
        };

        let was_running = machine.state().is_running();
        let transition = machine.dispatch(action);
        play_transition(&transition, sink).await;

        // Gravity restarts from a full interval after each tick and whenever play (re)starts.
        let started = !was_running && machine.state().is_running();
        if action == Action::Tick || started {
            next_tick = Instant::now() + config.tick_interval(machine.state().level());
        }
    }

    machine
}

/// Emit a transition: cues, then each frame and its pause.
pub async fn play_transition<S>(transition: &Transition, sink: &mut S)
where
    S: SnapshotSink + AudioSink,
{
    for &cue in &transition.cues {
        sink.play(cue);
    }
    for frame in &transition.frames {
        sink.publish(frame.state.snapshot());
        if frame.hold_ms > 0 {
            sleep(Duration::from_millis(frame.hold_ms as u64)).await;
        }
    }
}

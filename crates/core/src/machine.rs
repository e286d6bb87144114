//! The stateful wrapper the scheduler drives.

use crate::game_state::{GameState, Transition};
use crate::snapshot::Snapshot;
use crate::types::{Action, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Holds the current [`GameState`] and adopts the last frame of every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMachine {
    state: GameState,
}

impl GameMachine {
    pub fn new(seed: u32, width: u8, height: u8) -> Self {
        Self::from_state(GameState::new(seed, width, height))
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Reduce `action` against the current state and commit the result.
    ///
    /// No-op transitions leave the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let transition = self.state.reduce(action);
        if let Some(last) = transition.final_state() {
            self.state = last.clone();
        }
        transition
    }
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new(1, MATRIX_WIDTH, MATRIX_HEIGHT)
    }
}

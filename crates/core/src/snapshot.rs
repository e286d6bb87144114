//! Read-only view of a game state, handed to the renderer and any other observer.
//!
//! Snapshots own their data so they can cross thread and channel boundaries
//! while the machine keeps running.

use arrayvec::ArrayVec;

use crate::game_state::GameState;
use crate::types::{Cell, PieceKind, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Committed board slots, row-major (`y * width + x`)
    pub filled: Vec<bool>,
    /// Absolute cells of the falling piece (may include y < 0)
    pub active: ArrayVec<Cell, 4>,
    pub active_kind: Option<PieceKind>,
    /// Relative shape of the queue head (empty until the queue is filled)
    pub next: ArrayVec<Cell, 4>,
    pub next_kind: Option<PieceKind>,
    pub width: u8,
    pub height: u8,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub muted: bool,
}

impl Snapshot {
    /// Whether the committed board has `cell` filled (false off the board)
    pub fn is_filled(&self, cell: Cell) -> bool {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width as i8 || cell.y >= self.height as i8 {
            return false;
        }
        self.filled[cell.y as usize * self.width as usize + cell.x as usize]
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        let board = state.board();
        let active = state.active();
        let next = state.next_piece();

        Self {
            filled: board.slots().to_vec(),
            active: active.cells().collect(),
            active_kind: active.kind(),
            next: next
                .map(|p| p.shape().iter().copied().collect())
                .unwrap_or_default(),
            next_kind: next.and_then(|p| p.kind()),
            width: board.width(),
            height: board.height(),
            phase: state.phase(),
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
            muted: state.muted(),
        }
    }
}

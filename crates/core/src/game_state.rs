//! Game state module - the single authoritative game value and its reducer
//!
//! This module ties together all core components: board, pieces, bag, and scoring.
//! [`GameState::reduce`] is a pure function from (state, action) to a [`Transition`]:
//! the ordered frames to publish (each with a pause before the next one) plus the
//! audio cues to play. Nothing here sleeps or performs I/O; the scheduler realizes
//! the pauses.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::PieceBag;
use crate::scoring::{calculate_level, calculate_score};
use crate::snapshot::Snapshot;
use crate::types::*;

/// One published state plus how long to hold it before the next frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub state: GameState,
    pub hold_ms: u32,
}

/// Everything a single action produces.
///
/// An empty frame list means the action was a no-op and the state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub frames: Vec<Frame>,
    /// Cues to play before the first frame (already filtered by the mute flag)
    pub cues: ArrayVec<SoundCue, 2>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn single(state: GameState) -> Self {
        Self {
            frames: vec![Frame { state, hold_ms: 0 }],
            cues: ArrayVec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.frames.is_empty()
    }

    /// The state the machine settles into
    pub fn final_state(&self) -> Option<&GameState> {
        self.frames.last().map(|f| &f.state)
    }

    /// Phases of all frames, in emission order
    pub fn phases(&self) -> Vec<Phase> {
        self.frames.iter().map(|f| f.state.phase).collect()
    }

    /// Sum of all frame pauses
    pub fn duration_ms(&self) -> u32 {
        self.frames.iter().map(|f| f.hold_ms).sum()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    active: Piece,
    bag: PieceBag,
    phase: Phase,
    score: u32,
    lines: u32,
    muted: bool,
}

impl GameState {
    /// Create an idle (Onboard) game with the given RNG seed and board size
    pub fn new(seed: u32, width: u8, height: u8) -> Self {
        Self {
            board: Board::new(width, height),
            active: Piece::empty(),
            bag: PieceBag::new(seed, width, height),
            phase: Phase::Onboard,
            score: 0,
            lines: 0,
            muted: false,
        }
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Derived: `min(10, 1 + lines / 20)`
    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn bag(&self) -> &PieceBag {
        &self.bag
    }

    /// The queued piece that becomes active on the next lock
    pub fn next_piece(&self) -> Option<&Piece> {
        self.bag.peek()
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Apply one action and return the frames it produces
    pub fn reduce(&self, action: Action) -> Transition {
        match action {
            Action::Reset => self.reset(),
            Action::Pause => {
                if self.phase != Phase::Running {
                    return Transition::none();
                }
                Transition::single(self.with_phase(Phase::Paused))
            }
            Action::Resume => {
                if self.phase != Phase::Paused {
                    return Transition::none();
                }
                Transition::single(self.with_phase(Phase::Running))
            }
            Action::Move(direction) => self.try_move(direction),
            Action::Rotate => self.try_rotate(),
            Action::Drop => self.hard_drop(),
            Action::Tick => self.tick(),
            Action::Mute => Transition::single(Self {
                muted: !self.muted,
                ..self.clone()
            }),
        }
    }

    fn with_phase(&self, phase: Phase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    fn with_active(&self, active: Piece) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    /// A brand-new game in `phase`: empty board and queue, zeroed counters.
    /// The mute flag and the RNG position carry over.
    fn fresh(&self, phase: Phase) -> Self {
        let mut bag = self.bag.clone();
        bag.clear();
        Self {
            board: Board::new(self.board.width(), self.board.height()),
            active: Piece::empty(),
            bag,
            phase,
            score: 0,
            lines: 0,
            muted: self.muted,
        }
    }

    fn push_cue(&self, transition: &mut Transition, cue: SoundCue) {
        if !self.muted {
            transition.cues.push(cue);
        }
    }

    fn reset(&self) -> Transition {
        let mut transition = match self.phase {
            Phase::Onboard | Phase::GameOver => Transition::single(self.fresh(Phase::Running)),
            _ => {
                let mut frames = self.screen_wipe();
                frames.push(Frame {
                    state: self.fresh(Phase::Onboard),
                    hold_ms: 0,
                });
                Transition {
                    frames,
                    cues: ArrayVec::new(),
                }
            }
        };
        self.push_cue(&mut transition, SoundCue::Start);
        transition
    }

    /// Wipe the screen, then settle into GameOver with the board as it was.
    fn game_over(&self) -> Transition {
        let mut frames = self.screen_wipe();
        frames.push(Frame {
            state: self.with_phase(Phase::GameOver),
            hold_ms: 0,
        });
        let mut transition = Transition {
            frames,
            cues: ArrayVec::new(),
        };
        self.push_cue(&mut transition, SoundCue::Start);
        transition
    }

    /// Fill the board bottom-up over the current cells, then erase it top-down.
    fn screen_wipe(&self) -> Vec<Frame> {
        let width = self.board.width();
        let height = self.board.height();
        let rows = height as i8;

        let frame = |board: Board| Frame {
            state: Self {
                board,
                phase: Phase::ScreenClearing,
                ..self.clone()
            },
            hold_ms: WIPE_FRAME_MS,
        };

        let fill = (0..=rows).rev().map(|y| {
            let mut board = self.board.clone();
            board.fill_rows_from(y);
            frame(board)
        });
        let erase = (0..=rows).map(|y| frame(Board::filled_from_row(width, height, y)));

        fill.chain(erase).collect()
    }

    /// Move the active piece one step; rejected silently when blocked.
    fn try_move(&self, direction: Direction) -> Transition {
        if self.phase != Phase::Running || self.active.is_empty() {
            return Transition::none();
        }

        let moved = self.active.move_by(direction.step());
        if !self.board.is_valid(&moved) {
            return Transition::none();
        }

        let mut transition = Transition::single(self.with_active(moved));
        self.push_cue(&mut transition, SoundCue::Move);
        transition
    }

    /// Rotate clockwise, re-centre inside the walls once, and keep it if it fits.
    fn try_rotate(&self) -> Transition {
        if self.phase != Phase::Running || self.active.is_empty() {
            return Transition::none();
        }

        let rotated = self
            .active
            .rotate()
            .recenter(self.board.width(), self.board.height(), true);
        if !self.board.is_valid(&rotated) {
            return Transition::none();
        }

        let mut transition = Transition::single(self.with_active(rotated));
        self.push_cue(&mut transition, SoundCue::Rotate);
        transition
    }

    /// Drop the active piece as far as it goes. Locking waits for the next tick.
    fn hard_drop(&self) -> Transition {
        if self.phase != Phase::Running || self.active.is_empty() {
            return Transition::none();
        }

        let mut landed = self.active.clone();
        loop {
            let next = landed.move_by(Direction::Down.step());
            if !self.board.is_valid(&next) {
                break;
            }
            landed = next;
        }

        let mut transition = Transition::single(self.with_active(landed));
        self.push_cue(&mut transition, SoundCue::Drop);
        transition
    }

    /// Gravity step: fall one row, or lock and bring in the next piece.
    fn tick(&self) -> Transition {
        if self.phase != Phase::Running {
            return Transition::none();
        }

        if !self.active.is_empty() {
            let fallen = self.active.move_by(Direction::Down.step());
            if self.board.is_valid(&fallen) {
                return Transition::single(self.with_active(fallen));
            }
        }

        // The spawned piece already overlaps the stack: the board overflowed.
        if !self.board.is_valid(&self.active) {
            return self.game_over();
        }

        self.lock()
    }

    fn lock(&self) -> Transition {
        let had_piece = !self.active.is_empty();
        let Some(clear) = self.board.lock(&self.active) else {
            return self.game_over();
        };
        let lines = clear.count();

        let mut bag = self.bag.clone();
        let next = bag.advance();

        let settled = Self {
            board: clear.cleared,
            active: next,
            bag,
            phase: Phase::Running,
            score: self.score + calculate_score(lines, had_piece),
            lines: self.lines + lines as u32,
            muted: self.muted,
        };

        if lines == 0 {
            return Transition::single(settled);
        }

        let mut frames: Vec<Frame> = (0..LINE_FLASH_FRAMES)
            .map(|i| Frame {
                state: Self {
                    board: if i % 2 == 0 {
                        clear.merged.clone()
                    } else {
                        clear.flashing.clone()
                    },
                    active: Piece::empty(),
                    phase: Phase::LineClearing,
                    ..self.clone()
                },
                hold_ms: LINE_FLASH_MS,
            })
            .collect();
        frames.push(Frame {
            state: settled,
            hold_ms: 0,
        });

        let mut transition = Transition {
            frames,
            cues: ArrayVec::new(),
        };
        self.push_cue(&mut transition, SoundCue::Clean);
        transition
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, MATRIX_WIDTH, MATRIX_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Running game with `piece` active on an otherwise empty default board
    fn running_with(piece: Piece) -> GameState {
        let mut state = GameState::default();
        state.set_phase(Phase::Running);
        state.set_active(piece);
        state
    }

    fn settle(state: &GameState, action: Action) -> GameState {
        state
            .reduce(action)
            .final_state()
            .cloned()
            .unwrap_or_else(|| state.clone())
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345, 12, 24);

        assert_eq!(state.phase(), Phase::Onboard);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.level(), 1);
        assert!(!state.muted());
        assert!(state.active().is_empty());
        assert!(state.next_piece().is_none());
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_reset_from_onboard_starts_running() {
        let state = GameState::default().with_muted(false);
        let t = state.reduce(Action::Reset);

        assert_eq!(t.phases(), vec![Phase::Running]);
        assert_eq!(t.cues.as_slice(), &[SoundCue::Start]);
        let running = t.final_state().unwrap();
        assert!(running.active().is_empty());
        assert!(running.bag().is_empty());
    }

    #[test]
    fn test_reset_preserves_mute() {
        let state = GameState::default().with_muted(true);
        let t = state.reduce(Action::Reset);
        assert!(t.final_state().unwrap().muted());
        assert!(t.cues.is_empty());
    }

    #[test]
    fn test_reset_mid_game_wipes_then_onboard() {
        let mut state = running_with(Piece::new(PieceKind::T, Cell::new(5, 5)));
        state.score = 500;
        state.lines = 3;

        let t = state.reduce(Action::Reset);
        let height = state.board().height() as usize;

        assert_eq!(t.frames.len(), 2 * (height + 1) + 1);
        assert!(t.frames[..t.frames.len() - 1]
            .iter()
            .all(|f| f.state.phase() == Phase::ScreenClearing && f.hold_ms == WIPE_FRAME_MS));

        let settled = t.final_state().unwrap();
        assert_eq!(settled.phase(), Phase::Onboard);
        assert_eq!(settled.score(), 0);
        assert_eq!(settled.lines(), 0);
        assert!(settled.board().is_empty());
    }

    #[test]
    fn test_screen_wipe_fill_and_erase_frames() {
        let state = running_with(Piece::empty());
        let frames = state.screen_wipe();
        let height = state.board().height() as usize;
        let width = state.board().width() as usize;

        // Fill sweep: first frame untouched, last frame completely full.
        assert_eq!(frames[0].state.board().filled_count(), 0);
        assert_eq!(frames[height].state.board().filled_count(), width * height);
        assert_eq!(frames[1].state.board().filled_count(), width);

        // Erase sweep: starts full, ends empty.
        assert_eq!(frames[height + 1].state.board().filled_count(), width * height);
        assert_eq!(frames[2 * height + 1].state.board().filled_count(), 0);
    }

    #[test]
    fn test_pause_and_resume() {
        let state = running_with(Piece::empty());

        let paused = settle(&state, Action::Pause);
        assert_eq!(paused.phase(), Phase::Paused);
        assert!(paused.reduce(Action::Pause).is_noop());

        let resumed = settle(&paused, Action::Resume);
        assert_eq!(resumed.phase(), Phase::Running);
        assert!(resumed.reduce(Action::Resume).is_noop());
    }

    #[test]
    fn test_move_while_paused_is_noop() {
        let mut state = running_with(Piece::new(PieceKind::O, Cell::new(5, 5)));
        state.set_phase(Phase::Paused);

        for dir in [Direction::Left, Direction::Right, Direction::Down, Direction::Up] {
            assert!(state.reduce(Action::Move(dir)).is_noop());
        }
        assert!(state.reduce(Action::Rotate).is_noop());
        assert!(state.reduce(Action::Drop).is_noop());
        assert!(state.reduce(Action::Tick).is_noop());
    }

    #[test]
    fn test_move_commits_and_cues() {
        let state = running_with(Piece::new(PieceKind::T, Cell::new(5, 5)));
        let t = state.reduce(Action::Move(Direction::Left));

        assert_eq!(t.frames.len(), 1);
        assert_eq!(t.final_state().unwrap().active().offset(), Cell::new(4, 5));
        assert_eq!(t.cues.as_slice(), &[SoundCue::Move]);
    }

    #[test]
    fn test_move_into_wall_rejected() {
        // I piece is a vertical bar at x = 0.
        let state = running_with(Piece::new(PieceKind::I, Cell::new(0, 5)));
        let t = state.reduce(Action::Move(Direction::Left));
        assert!(t.is_noop());
        assert!(t.cues.is_empty());
    }

    #[test]
    fn test_move_onto_filled_cell_rejected() {
        let mut state = running_with(Piece::new(PieceKind::I, Cell::new(5, 5)));
        state.board_mut().fill(Cell::new(6, 6));
        assert!(state.reduce(Action::Move(Direction::Right)).is_noop());
    }

    #[test]
    fn test_rotate_recenters_against_wall() {
        // Vertical I hugging the left wall; rotated it pokes out to x = -1.
        let state = running_with(Piece::new(PieceKind::I, Cell::new(0, 5)));
        let t = state.reduce(Action::Rotate);

        let rotated = t.final_state().unwrap().active();
        assert!(rotated.cells().all(|c| c.x >= 0));
        assert!(rotated.cells().all(|c| c.y == 5));
        assert_eq!(t.cues.as_slice(), &[SoundCue::Rotate]);
    }

    #[test]
    fn test_rotate_rejected_when_blocked() {
        let mut state = running_with(Piece::new(PieceKind::I, Cell::new(5, 5)));
        // Rotated I occupies (4..=7, 5); block one of those.
        state.board_mut().fill(Cell::new(7, 5));
        assert!(state.reduce(Action::Rotate).is_noop());
    }

    #[test]
    fn test_hard_drop_lands_without_locking() {
        let state = running_with(Piece::new(PieceKind::I, Cell::new(3, 0)));
        let t = state.reduce(Action::Drop);

        let dropped = t.final_state().unwrap();
        assert_eq!(dropped.active().cells().map(|c| c.y).max(), Some(23));
        assert!(dropped.board().is_empty());
        assert_eq!(t.cues.as_slice(), &[SoundCue::Drop]);
    }

    #[test]
    fn test_tick_falls_one_row() {
        let state = running_with(Piece::new(PieceKind::T, Cell::new(5, 5)));
        let next = settle(&state, Action::Tick);
        assert_eq!(next.active().offset(), Cell::new(5, 6));
        assert_eq!(next.score(), 0);
    }

    #[test]
    fn test_first_ticks_after_reset() {
        let running = settle(&GameState::default(), Action::Reset);

        // First tick: nothing to lock, no bonus, queue filled, still no piece.
        let first = settle(&running, Action::Tick);
        assert_eq!(first.phase(), Phase::Running);
        assert_eq!(first.score(), 0);
        assert!(first.active().is_empty());
        assert_eq!(first.bag().len(), 7);

        // Second tick promotes the queue head.
        let head = first.next_piece().cloned().unwrap();
        let second = settle(&first, Action::Tick);
        assert_eq!(second.active(), &head);
        assert_eq!(second.bag().len(), 6);
        assert_eq!(second.score(), 0);
    }

    #[test]
    fn test_lock_awards_bonus_and_advances() {
        let state = running_with(Piece::new(PieceKind::O, Cell::new(0, 23)));
        let state = settle(&state, Action::Tick);

        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.score(), PIECE_LOCK_BONUS);
        assert_eq!(state.lines(), 0);
    }

    #[test]
    fn test_lock_with_line_clear_flashes() {
        let mut state = running_with(Piece::new(PieceKind::I, Cell::new(11, 21)));
        // Row 23 full except column 11, which the I piece fills.
        for x in 0..11 {
            state.board_mut().fill(Cell::new(x, 23));
        }
        state.board_mut().fill(Cell::new(0, 22));

        let t = state.reduce(Action::Tick);
        assert_eq!(
            t.phases(),
            vec![
                Phase::LineClearing,
                Phase::LineClearing,
                Phase::LineClearing,
                Phase::LineClearing,
                Phase::LineClearing,
                Phase::Running
            ]
        );
        assert_eq!(t.cues.as_slice(), &[SoundCue::Clean]);
        assert_eq!(t.duration_ms(), LINE_FLASH_FRAMES * LINE_FLASH_MS);

        // Even frames show the merged board, odd ones the board with the row gone.
        assert_eq!(t.frames[0].state.board().filled_count(), 11 + 1 + 4);
        assert_eq!(t.frames[1].state.board().filled_count(), 1 + 3);
        assert!(t.frames[0].state.active().is_empty());

        let settled = t.final_state().unwrap();
        assert_eq!(settled.lines(), 1);
        assert_eq!(settled.score(), 100 + PIECE_LOCK_BONUS);
        // (0,22) and three I cells in column 11 fell by one row.
        assert!(settled.board().is_filled(Cell::new(0, 23)));
        assert!(settled.board().is_filled(Cell::new(11, 23)));
        assert!(settled.board().is_filled(Cell::new(11, 21)));
        assert_eq!(settled.board().filled_count(), 4);
    }

    #[test]
    fn test_tick_with_invalid_spawn_is_game_over() {
        let mut state = running_with(Piece::new(PieceKind::T, Cell::new(5, 1)));
        state.board_mut().fill(Cell::new(5, 1));
        state.score = 240;

        let t = state.reduce(Action::Tick);
        let phases = t.phases();
        assert_eq!(phases[0], Phase::ScreenClearing);
        assert_eq!(*phases.last().unwrap(), Phase::GameOver);
        assert!(phases[..phases.len() - 1]
            .iter()
            .all(|p| *p == Phase::ScreenClearing));

        // The wipe is cosmetic: the final state keeps the score and board.
        let over = t.final_state().unwrap();
        assert_eq!(over.score(), 240);
        assert_eq!(over.board(), state.board());
    }

    #[test]
    fn test_lock_above_top_is_game_over() {
        let mut state = running_with(Piece::new(PieceKind::O, Cell::new(5, -1)));
        // O occupies rows -2 and -1 here; block the row beneath it.
        state.board_mut().fill(Cell::new(5, 0));

        let t = state.reduce(Action::Tick);
        assert_eq!(t.final_state().unwrap().phase(), Phase::GameOver);
    }

    #[test]
    fn test_lock_completing_top_row_keeps_playing() {
        // O occupies rows -1 and 0 on columns 5..=6, resting on (5,1) and (6,1).
        let mut state = running_with(Piece::new(PieceKind::O, Cell::new(5, 0)));
        for x in (0..12).filter(|x| *x != 5 && *x != 6) {
            state.board_mut().fill(Cell::new(x, 0));
        }
        state.board_mut().fill(Cell::new(5, 1));
        state.board_mut().fill(Cell::new(6, 1));

        let t = state.reduce(Action::Tick);
        assert_eq!(t.phases()[0], Phase::LineClearing);

        let settled = t.final_state().unwrap();
        assert_eq!(settled.phase(), Phase::Running);
        assert_eq!(settled.lines(), 1);
        assert_eq!(settled.score(), 100 + PIECE_LOCK_BONUS);
        // The two cells above the top dropped into row 0.
        assert!(settled.board().is_filled(Cell::new(5, 0)));
        assert!(settled.board().is_filled(Cell::new(6, 0)));
        assert!(settled.board().is_filled(Cell::new(5, 1)));
        assert!(settled.board().is_filled(Cell::new(6, 1)));
        assert_eq!(settled.board().filled_count(), 4);
    }

    #[test]
    fn test_repeated_move_up_stays_playable() {
        let mut state = running_with(Piece::new(PieceKind::I, Cell::new(5, -1)));
        for _ in 0..200 {
            state = settle(&state, Action::Move(Direction::Up));
        }
        assert_eq!(state.active().offset(), Cell::new(5, i8::MIN));

        let t = state.reduce(Action::Move(Direction::Down));
        assert_eq!(t.frames.len(), 1);
        assert_eq!(t.final_state().unwrap().active().offset(), Cell::new(5, i8::MIN + 1));

        // Rotating and dropping from the ceiling are still well-defined.
        let rotated = settle(&state, Action::Rotate);
        assert_eq!(rotated.phase(), Phase::Running);
        let dropped = settle(&state, Action::Drop);
        assert!(dropped.active().cells().all(|c| c.y >= 0));
    }

    #[test]
    fn test_game_over_then_reset_starts_fresh() {
        let mut state = running_with(Piece::empty());
        state.set_phase(Phase::GameOver);
        state.score = 99;

        let t = state.reduce(Action::Reset);
        assert_eq!(t.phases(), vec![Phase::Running]);
        assert_eq!(t.final_state().unwrap().score(), 0);
    }

    #[test]
    fn test_mute_toggles_in_any_phase() {
        for phase in [Phase::Onboard, Phase::Running, Phase::Paused, Phase::GameOver] {
            let mut state = GameState::default();
            state.set_phase(phase);

            let once = settle(&state, Action::Mute);
            assert!(once.muted());
            assert_eq!(once.phase(), phase);
            let twice = settle(&once, Action::Mute);
            assert!(!twice.muted());
        }
    }

    #[test]
    fn test_muted_suppresses_cues() {
        let state = running_with(Piece::new(PieceKind::T, Cell::new(5, 5))).with_muted(true);
        let t = state.reduce(Action::Move(Direction::Right));
        assert_eq!(t.frames.len(), 1);
        assert!(t.cues.is_empty());
    }

    #[test]
    fn test_level_from_lines() {
        let mut state = GameState::default();
        state.lines = 19;
        assert_eq!(state.level(), 1);
        state.lines = 20;
        assert_eq!(state.level(), 2);
        state.lines = 500;
        assert_eq!(state.level(), 10);
    }
}

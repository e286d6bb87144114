//! Pieces module - tetromino catalog and the active piece
//!
//! Shapes are four cells around a local origin. Rotation is a plain 90° clockwise
//! transform about that origin (no kick tables), so each kind pivots around a
//! different cell.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind};

/// Offset of a single mino relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Up to four minos; empty for [`Piece::empty`]
pub type Shape = ArrayVec<Cell, 4>;

/// Get the catalog shape (mino offsets) for a piece kind
pub fn get_shape(kind: PieceKind) -> [MinoOffset; 4] {
    match kind {
        PieceKind::Z => [(1, -1), (1, 0), (0, 0), (0, 1)],
        PieceKind::S => [(0, -1), (0, 0), (1, 0), (1, 1)],
        PieceKind::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        PieceKind::T => [(0, 1), (0, 0), (0, -1), (1, 0)],
        PieceKind::O => [(1, 0), (0, 0), (1, -1), (0, -1)],
        PieceKind::L => [(0, -1), (1, -1), (1, 0), (1, 1)],
        PieceKind::J => [(1, -1), (0, -1), (0, 0), (0, 1)],
    }
}

/// A shape plus a translation offset.
///
/// Pieces are small `Clone` values; every operation returns a new piece and
/// leaves legality checks to the [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    kind: Option<PieceKind>,
    shape: Shape,
    offset: Cell,
}

impl Piece {
    /// Create a piece of the given kind at `offset`
    pub fn new(kind: PieceKind, offset: Cell) -> Self {
        Self {
            kind: Some(kind),
            shape: get_shape(kind).into_iter().map(Cell::from).collect(),
            offset,
        }
    }

    /// The "no active piece" sentinel: zero cells, always valid.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn offset(&self) -> Cell {
        self.offset
    }

    /// Relative cells around the local origin
    pub fn shape(&self) -> &[Cell] {
        &self.shape
    }

    /// Absolute cells (shape + offset)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.shape.iter().map(move |&c| c + self.offset)
    }

    /// Translate by `(dx, dy)`; never fails.
    pub fn move_by(&self, step: (i8, i8)) -> Self {
        Self {
            offset: self.offset + step,
            ..self.clone()
        }
    }

    /// Rotate 90° clockwise about the local origin: `(x, y) -> (y, -x)`.
    pub fn rotate(&self) -> Self {
        Self {
            shape: self.shape.iter().map(|c| Cell::new(c.y, -c.x)).collect(),
            ..self.clone()
        }
    }

    /// Shift the piece back inside a `width` x `height` matrix.
    ///
    /// The horizontal correction is always applied; the vertical one only when
    /// `adjust_vertical` is set (spawned pieces are allowed to hang above the top).
    pub fn recenter(&self, width: u8, height: u8, adjust_vertical: bool) -> Self {
        let dx = axis_shift(self.cells().map(|c| c.x), width);
        let dy = if adjust_vertical {
            axis_shift(self.cells().map(|c| c.y), height)
        } else {
            0
        };
        self.move_by((dx, dy))
    }
}

/// Minimal shift that brings every coordinate into `0..len`.
fn axis_shift(coords: impl Iterator<Item = i8>, len: u8) -> i8 {
    let bounds = coords.fold(None, |acc: Option<(i8, i8)>, v| match acc {
        Some((min, max)) => Some((min.min(v), max.max(v))),
        None => Some((v, v)),
    });
    let Some((min, max)) = bounds else {
        return 0;
    };

    // Widened so a piece parked at the i8 limit can't overflow the correction.
    let (min, max) = (i16::from(min), i16::from(max));
    let limit = i16::from(len) - 1;
    let mut shift = 0;
    if min < 0 {
        shift += -min;
    }
    if max > limit {
        shift += limit - max;
    }
    shift.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: Vec<Cell>) -> Vec<Cell> {
        cells.sort();
        cells
    }

    #[test]
    fn test_every_kind_has_four_distinct_minos() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, Cell::ORIGIN);
            let mut cells: Vec<_> = piece.cells().collect();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_empty_piece() {
        let piece = Piece::empty();
        assert!(piece.is_empty());
        assert_eq!(piece.kind(), None);
        assert_eq!(piece.cells().count(), 0);
        assert_eq!(piece.recenter(12, 24, true), piece);
    }

    #[test]
    fn test_move_by_translates_offset_only() {
        let piece = Piece::new(PieceKind::T, Cell::new(4, 2));
        let moved = piece.move_by((-1, 3));
        assert_eq!(moved.offset(), Cell::new(3, 5));
        assert_eq!(moved.shape(), piece.shape());
    }

    #[test]
    fn test_rotate_transform() {
        let piece = Piece::new(PieceKind::I, Cell::new(5, 5));
        let rotated = piece.rotate();
        // (0,-1) (0,0) (0,1) (0,2) -> (-1,0) (0,0) (1,0) (2,0)
        assert_eq!(
            rotated.shape(),
            &[Cell::new(-1, 0), Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );
        assert_eq!(rotated.offset(), piece.offset());
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, Cell::new(6, 6));
            let back = piece.rotate().rotate().rotate().rotate();
            assert_eq!(sorted(back.cells().collect()), sorted(piece.cells().collect()));
        }
    }

    #[test]
    fn test_recenter_pushes_right_from_left_wall() {
        // I rotated is horizontal: x in -1..=2 relative.
        let piece = Piece::new(PieceKind::I, Cell::new(0, 5)).rotate();
        let fixed = piece.recenter(12, 24, true);
        assert_eq!(fixed.cells().map(|c| c.x).min(), Some(0));
        assert_eq!(fixed.offset(), Cell::new(1, 5));
    }

    #[test]
    fn test_recenter_pushes_left_from_right_wall() {
        let piece = Piece::new(PieceKind::I, Cell::new(11, 5)).rotate();
        let fixed = piece.recenter(12, 24, true);
        assert_eq!(fixed.cells().map(|c| c.x).max(), Some(11));
        assert_eq!(fixed.offset(), Cell::new(9, 5));
    }

    #[test]
    fn test_recenter_vertical_is_optional() {
        let piece = Piece::new(PieceKind::I, Cell::new(3, -1));
        assert_eq!(piece.recenter(12, 24, false).offset(), Cell::new(3, -1));
        // Min y is -2, so shifting down by 2 brings it inside.
        assert_eq!(piece.recenter(12, 24, true).offset(), Cell::new(3, 1));

        let low = Piece::new(PieceKind::I, Cell::new(3, 23));
        assert_eq!(low.recenter(12, 24, true).offset(), Cell::new(3, 21));
    }

    #[test]
    fn test_recenter_from_i8_ceiling() {
        let piece = Piece::new(PieceKind::I, Cell::new(5, i8::MIN)).rotate();
        let back = piece.recenter(12, 24, true);
        assert!(back.cells().all(|c| c.y > i8::MIN));
        assert_eq!(back.offset().x, 5);
    }
}

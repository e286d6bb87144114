//! GameView: maps a [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Piece, Snapshot};
use crate::fb::{FrameBuffer, Tone};
use crate::types::{Cell, Phase, NEXT_MATRIX};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the brick game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// The preview shown under NEXT: the queue head rotated once and pushed into
/// the 4x2 preview matrix. Nothing is shown while no piece is falling.
pub fn next_preview(snap: &Snapshot) -> Option<Piece> {
    if snap.active.is_empty() {
        return None;
    }
    let kind = snap.next_kind?;
    let (w, h) = NEXT_MATRIX;
    Some(Piece::new(kind, Cell::ORIGIN).rotate().recenter(w, h, true))
}

/// Overlay caption for phases that need one
pub fn overlay_text(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Onboard => Some("PRESS R"),
        Phase::Paused => Some("PAUSED"),
        Phase::GameOver => Some("GAME OVER"),
        _ => None,
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the board border for this snapshot and viewport
    pub fn board_origin(&self, snap: &Snapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    fn frame_size(&self, snap: &Snapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Paint a snapshot into `fb`, resetting it to the viewport size first.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let (frame_w, frame_h) = self.frame_size(snap);
        let (start_x, start_y) = self.board_origin(snap, viewport);

        draw_border(fb, start_x, start_y, frame_w, frame_h);

        let origin = (start_x + 1, start_y + 1);
        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                let cell = Cell::new(x, y);
                if snap.is_filled(cell) {
                    self.fill_cell(fb, origin, cell, '█', Tone::Locked);
                } else {
                    self.fill_cell(fb, origin, cell, '·', Tone::Well);
                }
            }
        }

        if let Some(kind) = snap.active_kind {
            for &cell in snap.active.iter() {
                if in_bounds(cell, snap.width, snap.height) {
                    self.fill_cell(fb, origin, cell, '█', Tone::Piece(kind));
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if let Some(text) = overlay_text(snap.phase) {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, origin: (u16, u16), cell: Cell, ch: char, tone: Tone) {
        let px = origin.0 + cell.x as u16 * self.cell_w;
        let py = origin.1 + cell.y as u16 * self.cell_h;
        fb.fill(px, py, self.cell_w, self.cell_h, ch, tone);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.text(panel_x, y, name, Tone::Label);
            fb.text(panel_x, y.saturating_add(1), &n.to_string(), Tone::Value);
            y = y.saturating_add(3);
        }

        fb.text(panel_x, y, "NEXT", Tone::Label);
        y = y.saturating_add(1);
        let (nw, nh) = NEXT_MATRIX;
        let preview = next_preview(snap);
        for py in 0..nh as i8 {
            for px in 0..nw as i8 {
                let cell = Cell::new(px, py);
                let lit = preview
                    .as_ref()
                    .map(|p| p.cells().any(|c| c == cell))
                    .unwrap_or(false);
                let (ch, tone) = match (lit, preview.as_ref().and_then(Piece::kind)) {
                    (true, Some(kind)) => ('█', Tone::Piece(kind)),
                    _ => ('·', Tone::Unlit),
                };
                self.fill_cell(fb, (panel_x, y), cell, ch, tone);
            }
        }
        y = y.saturating_add(nh as u16 * self.cell_h + 1);

        fb.text(panel_x, y, "MUTE", Tone::Label);
        fb.text(
            panel_x,
            y.saturating_add(1),
            if snap.muted { "ON" } else { "OFF" },
            Tone::Value,
        );
    }
}

fn in_bounds(cell: Cell, width: u8, height: u8) -> bool {
    cell.x >= 0 && cell.x < width as i8 && cell.y >= 0 && cell.y < height as i8
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.fill(x + 1, y, w - 2, 1, '─', Tone::Frame);
    fb.fill(x + 1, bottom, w - 2, 1, '─', Tone::Frame);
    fb.fill(x, y + 1, 1, h - 2, '│', Tone::Frame);
    fb.fill(right, y + 1, 1, h - 2, '│', Tone::Frame);
    for (cx, cy, ch) in [(x, y, '┌'), (right, y, '┐'), (x, bottom, '└'), (right, bottom, '┘')] {
        fb.put(cx, cy, ch, Tone::Frame);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.text(x, mid_y, text, Tone::Overlay);
}

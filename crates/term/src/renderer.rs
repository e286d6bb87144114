//! TerminalRenderer: puts framebuffers on a real terminal.
//!
//! Each frame is compared row by row with the one drawn before it, and only
//! the spans that differ are rewritten. A missing or differently sized
//! previous frame forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Tone};
use crate::types::PieceKind;

const BOARD_BG: Color = Color::Rgb { r: 30, g: 30, b: 40 };

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame put on screen
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(cursor::Hide)?;
        self.shown = None;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen so the next draw repaints everything (resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Ring the terminal bell; stands in for audio cues.
    pub fn bell(&mut self) -> Result<()> {
        self.stdout.write_all(b"\x07")?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Draw `fb`, then trade it for the previously shown frame.
    ///
    /// The caller gets a buffer back to paint the next frame into, so steady
    /// state rendering allocates nothing.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let shown = self.shown.get_or_insert_with(|| FrameBuffer::new(0, 0));
        std::mem::swap(shown, fb);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the terminal output that turns `prev` into `next`.
///
/// With no usable `prev` the screen is cleared and every row is written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.same_size(next));
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut tone: Option<Tone> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        let spans = match prev {
            Some(prev) => dirty_spans(prev.row(y), row),
            None => vec![(0, row.len())],
        };
        for (start, len) in spans {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &row[start..start + len] {
                if tone != Some(glyph.tone) {
                    apply_tone(out, glyph.tone)?;
                    tone = Some(glyph.tone);
                }
                out.queue(Print(glyph.ch))?;
            }
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(())
}

/// `(start, len)` spans where two equally long rows differ
fn dirty_spans(prev: &[Glyph], next: &[Glyph]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (x, _) in prev.iter().zip(next).enumerate().filter(|(_, (a, b))| a != b) {
        match spans.last_mut() {
            Some((start, len)) if *start + *len == x => *len += 1,
            _ => spans.push((x, 1)),
        }
    }
    spans
}

fn apply_tone(out: &mut Vec<u8>, tone: Tone) -> Result<()> {
    let (fg, bg, attr) = palette(tone);
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(fg))?;
    out.queue(SetBackgroundColor(bg))?;
    if let Some(attr) = attr {
        out.queue(SetAttribute(attr))?;
    }
    Ok(())
}

/// Foreground, background and optional attribute for a tone
fn palette(tone: Tone) -> (Color, Color, Option<Attribute>) {
    match tone {
        Tone::Blank => (Color::Reset, Color::Reset, None),
        Tone::Well => (Color::Rgb { r: 90, g: 90, b: 100 }, BOARD_BG, Some(Attribute::Dim)),
        Tone::Locked => (Color::Rgb { r: 170, g: 170, b: 180 }, BOARD_BG, None),
        Tone::Piece(kind) => (piece_color(kind), BOARD_BG, Some(Attribute::Bold)),
        Tone::Unlit => (Color::Rgb { r: 60, g: 60, b: 70 }, Color::Reset, Some(Attribute::Dim)),
        Tone::Frame => (Color::Grey, Color::Reset, None),
        Tone::Label => (Color::White, Color::Reset, Some(Attribute::Bold)),
        Tone::Value => (Color::Grey, Color::Reset, None),
        Tone::Overlay => (Color::White, BOARD_BG, Some(Attribute::Bold)),
    }
}

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Rgb { r: 80, g: 220, b: 220 },
        PieceKind::O => Color::Rgb { r: 240, g: 220, b: 80 },
        PieceKind::T => Color::Rgb { r: 200, g: 120, b: 220 },
        PieceKind::S => Color::Rgb { r: 100, g: 220, b: 120 },
        PieceKind::Z => Color::Rgb { r: 220, g: 80, b: 80 },
        PieceKind::J => Color::Rgb { r: 80, g: 120, b: 220 },
        PieceKind::L => Color::Rgb { r: 255, g: 165, b: 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trailer() -> Vec<u8> {
        let mut out = Vec::new();
        out.queue(SetAttribute(Attribute::Reset)).unwrap();
        out.queue(ResetColor).unwrap();
        out
    }

    #[test]
    fn dirty_spans_merge_neighbours() {
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        b.text(1, 0, "XYZ", Tone::Label);
        b.put(5, 0, 'Q', Tone::Value);
        assert_eq!(dirty_spans(a.row(0), b.row(0)), vec![(1, 3), (5, 1)]);
    }

    #[test]
    fn tone_change_alone_is_dirty() {
        let mut a = FrameBuffer::new(2, 1);
        a.put(0, 0, '█', Tone::Locked);
        let mut b = a.clone();
        b.put(0, 0, '█', Tone::Piece(PieceKind::S));
        assert_eq!(dirty_spans(a.row(0), b.row(0)), vec![(0, 1)]);
    }

    #[test]
    fn unchanged_frame_writes_only_the_reset() {
        let fb = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        encode_frame(Some(&fb), &fb.clone(), &mut out).unwrap();
        assert_eq!(out, trailer());
    }

    #[test]
    fn missing_or_resized_frame_clears_screen() {
        let mut clear = Vec::new();
        clear.queue(terminal::Clear(terminal::ClearType::All)).unwrap();

        let next = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        encode_frame(None, &next, &mut out).unwrap();
        assert!(out.starts_with(&clear));

        out.clear();
        encode_frame(Some(&FrameBuffer::new(2, 2)), &next, &mut out).unwrap();
        assert!(out.starts_with(&clear));
    }

    #[test]
    fn every_piece_kind_has_its_own_colour() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(piece_color(*a), piece_color(*b));
            }
        }
    }
}

//! Character grid the game view paints into.
//!
//! Glyphs record what they depict (a [`Tone`]) rather than raw colours, so the
//! view stays free of terminal concerns and the renderer owns the palette.

use crate::types::PieceKind;

/// What a glyph depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    /// Outside the playfield
    #[default]
    Blank,
    /// Empty playfield slot
    Well,
    /// Committed brick
    Locked,
    /// Falling piece, or a lit slot of the next preview
    Piece(PieceKind),
    /// Unlit slot of the next preview
    Unlit,
    /// Playfield border
    Frame,
    Label,
    Value,
    /// Caption drawn over the playfield
    Overlay,
}

/// One terminal character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub tone: Tone,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::new(' ', Tone::Blank);

    pub const fn new(ch: char, tone: Tone) -> Self {
        Self { ch, tone }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of glyphs. Writes outside the grid are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Blank every glyph and take the given size, reusing the allocation.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(width as usize * height as usize, Glyph::BLANK);
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width {
            return None;
        }
        self.row(y).get(x as usize).copied()
    }

    /// Glyphs of row `y`; empty past the bottom
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.glyphs[start..start + self.width as usize]
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, tone: Tone) {
        if x < self.width && y < self.height {
            self.glyphs[y as usize * self.width as usize + x as usize] = Glyph::new(ch, tone);
        }
    }

    /// Write `text` left to right from `(x, y)`
    pub fn text(&mut self, x: u16, y: u16, text: &str, tone: Tone) {
        for (col, ch) in (x..self.width).zip(text.chars()) {
            self.put(col, y, ch, tone);
        }
    }

    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, tone: Tone) {
        for row in y..y.saturating_add(h).min(self.height) {
            for col in x..x.saturating_add(w).min(self.width) {
                self.put(col, row, ch, tone);
            }
        }
    }

    /// Characters of row `y` (tests and debugging)
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}

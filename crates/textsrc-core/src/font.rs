//! Fonts after resolution: a face, a size and a style

use std::fmt;
use std::sync::Arc;

use crate::{state::FontFlags, traits::FontFace, types::GlyphId};

/// Vertical metrics in font units (y up, descent negative)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    /// Underline position relative to the baseline and its thickness
    pub underline: Option<(f32, f32)>,
    /// Strikeout position relative to the baseline and its thickness
    pub strikeout: Option<(f32, f32)>,
}

/// Slant applied to upright faces when italic was requested
pub const SYNTHETIC_ITALIC_SKEW: f32 = 0.2;

/// A face ready for measuring and drawing at one size
///
/// Cloning is cheap; the face itself is shared.
#[derive(Clone)]
pub struct ResolvedFont {
    face: Arc<dyn FontFace>,
    size: f32,
    flags: FontFlags,
    synthetic_bold: bool,
    synthetic_italic: bool,
}

impl ResolvedFont {
    /// Wrap `face` with a character cell `size` pixels tall
    ///
    /// Bold or italic requests the face cannot honour natively are recorded
    /// so the rasterizer can synthesize them.
    pub fn new(face: Arc<dyn FontFace>, size: f32, flags: FontFlags) -> Self {
        let synthetic_bold = flags.contains(FontFlags::BOLD) && !face.is_bold();
        let synthetic_italic = flags.contains(FontFlags::ITALIC) && !face.is_italic();
        Self {
            face,
            size: size.max(0.0),
            flags,
            synthetic_bold,
            synthetic_italic,
        }
    }

    pub fn face(&self) -> &Arc<dyn FontFace> {
        &self.face
    }

    pub fn family(&self) -> &str {
        self.face.family()
    }

    /// Cell height in pixels: ascent plus descent, not the em
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Pixels per em
    pub fn em_size(&self) -> f32 {
        self.size * self.face.units_per_em().max(1) as f32 / self.cell_units()
    }

    pub fn flags(&self) -> FontFlags {
        self.flags
    }

    pub fn synthetic_bold(&self) -> bool {
        self.synthetic_bold
    }

    pub fn synthetic_italic(&self) -> bool {
        self.synthetic_italic
    }

    /// Font units to pixels
    pub fn scale(&self) -> f32 {
        self.size / self.cell_units()
    }

    // Faces without vertical metrics fall back to the em square.
    fn cell_units(&self) -> f32 {
        let metrics = self.face.line_metrics();
        let cell = metrics.ascent - metrics.descent;
        if cell > 0.0 {
            cell
        } else {
            self.face.units_per_em().max(1) as f32
        }
    }

    pub fn ascent(&self) -> f32 {
        self.face.line_metrics().ascent * self.scale()
    }

    /// Distance below the baseline, positive
    pub fn descent(&self) -> f32 {
        -self.face.line_metrics().descent * self.scale()
    }

    /// Distance from one baseline to the next
    pub fn line_height(&self) -> f32 {
        let metrics = self.face.line_metrics();
        (metrics.ascent - metrics.descent + metrics.line_gap) * self.scale()
    }

    /// Height of one character cell in top-to-bottom text
    pub fn vertical_advance(&self) -> f32 {
        self.ascent() + self.descent()
    }

    /// Glyph for `ch`, `.notdef` when the face lacks it
    pub fn glyph_id(&self, ch: char) -> GlyphId {
        self.face.glyph_id(ch).unwrap_or(0)
    }

    /// Horizontal advance of `ch` in pixels
    pub fn advance(&self, ch: char) -> f32 {
        self.face.advance_width(self.glyph_id(ch)) * self.scale()
    }

    /// Underline offset below the baseline and thickness, in pixels
    pub fn underline(&self) -> (f32, f32) {
        let scale = self.scale();
        match self.face.line_metrics().underline {
            Some((offset, thickness)) => (-offset * scale, thickness.max(1.0) * scale),
            None => (self.descent() * 0.5, (self.size / 14.0).max(1.0)),
        }
    }

    /// Strikeout offset above the baseline and thickness, in pixels
    pub fn strikeout(&self) -> (f32, f32) {
        let scale = self.scale();
        match self.face.line_metrics().strikeout {
            Some((offset, thickness)) => (offset * scale, thickness.max(1.0) * scale),
            None => (self.ascent() * 0.3, (self.size / 14.0).max(1.0)),
        }
    }
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family())
            .field("size", &self.size)
            .field("flags", &self.flags)
            .field("synthetic_bold", &self.synthetic_bold)
            .field("synthetic_italic", &self.synthetic_italic)
            .finish()
    }
}

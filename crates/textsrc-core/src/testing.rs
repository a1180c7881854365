// this_file: crates/textsrc-core/src/testing.rs

//! Deterministic fonts for tests
//!
//! [`BlockFace`] draws every visible character as a solid block so layout
//! and raster tests work without font files. With 1000 units per em, a
//! 20 px font gives 10 px advances, a 16 px ascent, a 4 px descent and
//! 20 px lines.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    error::{FontLoadError, Result},
    font::LineMetrics,
    state::FontFlags,
    traits::{FontFace, FontProvider},
    types::GlyphId,
};

/// Advance of every glyph, in font units
pub const BLOCK_ADVANCE: f32 = 500.0;

/// A face whose glyphs are rectangles
#[derive(Debug, Clone)]
pub struct BlockFace {
    family: String,
    bold: bool,
    italic: bool,
    ascent: f32,
    descent: f32,
}

impl BlockFace {
    pub fn new(family: &str) -> Self {
        Self {
            family: family.to_string(),
            bold: false,
            italic: false,
            ascent: 800.0,
            descent: -200.0,
        }
    }

    /// Replace the 800 / -200 ascent and descent, in font units
    pub fn with_vertical_metrics(mut self, ascent: f32, descent: f32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

impl FontFace for BlockFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.ascent,
            descent: self.descent,
            line_gap: 0.0,
            underline: Some((-100.0, 50.0)),
            strikeout: Some((300.0, 50.0)),
        }
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        Some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
        BLOCK_ADVANCE
    }

    fn glyph_path(&self, glyph_id: GlyphId) -> Option<kurbo::BezPath> {
        let ch = char::from_u32(glyph_id)?;
        if ch.is_whitespace() || ch.is_control() {
            return None;
        }
        let mut path = kurbo::BezPath::new();
        path.move_to((50.0, 0.0));
        path.line_to((450.0, 0.0));
        path.line_to((450.0, 700.0));
        path.line_to((50.0, 700.0));
        path.close_path();
        Some(path)
    }

    fn is_bold(&self) -> bool {
        self.bold
    }

    fn is_italic(&self) -> bool {
        self.italic
    }
}

/// A provider over a fixed set of faces that remembers every request
#[derive(Default)]
pub struct StaticProvider {
    faces: HashMap<String, Arc<dyn FontFace>>,
    requests: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block face under `family`
    pub fn with_block_face(mut self, family: &str) -> Self {
        self.faces
            .insert(family.to_string(), Arc::new(BlockFace::new(family)));
        self
    }

    /// Family names asked for so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl FontProvider for StaticProvider {
    fn load_face(&self, family: &str, _flags: FontFlags) -> Result<Arc<dyn FontFace>> {
        self.requests.lock().push(family.to_string());
        self.faces
            .get(family)
            .cloned()
            .ok_or_else(|| FontLoadError::FamilyNotFound(family.to_string()).into())
    }
}

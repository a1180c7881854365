// this_file: crates/textsrc-fontdb/src/face.rs

//! A parsed font face backed by skrifa
//!
//! Stores the raw font bytes and creates `FontRef` on demand for parsing,
//! so one face can be shared across sources without self-referencing
//! lifetimes. For TTC collections `face_index` picks the face. Charmap
//! and advance lookups are memoized per face, since layout asks for the
//! same characters on every update.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::raw::TableProvider;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use textsrc_core::{
    error::{FontLoadError, Result},
    traits::FontFace,
    types::GlyphId as CoreGlyphId,
    LineMetrics,
};

/// One face of a font file, ready to measure and outline text
pub struct SkrifaFace {
    data: Vec<u8>,
    face_index: u32,
    family: String,
    units_per_em: u16,
    metrics: LineMetrics,
    bold: bool,
    italic: bool,
    glyph_ids: RwLock<HashMap<char, Option<CoreGlyphId>>>,
    advances: RwLock<HashMap<CoreGlyphId, f32>>,
}

impl SkrifaFace {
    /// Turns raw font bytes into a face (index 0 for single fonts)
    pub fn from_data(data: Vec<u8>, family: &str) -> Result<Self> {
        Self::from_data_index(data, 0, family)
    }

    /// Turns raw font bytes into a specific face of a collection
    pub fn from_data_index(data: Vec<u8>, face_index: u32, family: &str) -> Result<Self> {
        let font = FontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let raw = font.metrics(Size::unscaled(), LocationRef::default());
        let metrics = LineMetrics {
            ascent: raw.ascent,
            descent: raw.descent,
            line_gap: raw.leading,
            underline: raw.underline.map(|d| (d.offset, d.thickness)),
            strikeout: raw.strikeout.map(|d| (d.offset, d.thickness)),
        };

        Ok(Self {
            data,
            face_index,
            family: family.to_string(),
            units_per_em,
            metrics,
            bold: false,
            italic: false,
            glyph_ids: RwLock::default(),
            advances: RwLock::default(),
        })
    }

    /// Record the design style reported by the font database
    pub fn with_style(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontFace for SkrifaFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn line_metrics(&self) -> LineMetrics {
        self.metrics
    }

    fn glyph_id(&self, ch: char) -> Option<CoreGlyphId> {
        memoized(&self.glyph_ids, ch, || {
            self.font_ref()?.charmap().map(ch).map(|gid| gid.to_u32())
        })
    }

    fn advance_width(&self, glyph_id: CoreGlyphId) -> f32 {
        memoized(&self.advances, glyph_id, || {
            self.font_ref()
                .and_then(|font| {
                    font.glyph_metrics(Size::unscaled(), LocationRef::default())
                        .advance_width(GlyphId::new(glyph_id))
                })
                .unwrap_or(self.units_per_em as f32 / 2.0)
        })
    }

    fn glyph_path(&self, glyph_id: CoreGlyphId) -> Option<kurbo::BezPath> {
        let font = self.font_ref()?;
        let glyph = font.outline_glyphs().get(GlyphId::new(glyph_id))?;

        let mut path = kurbo::BezPath::new();
        let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
        if let Err(err) = glyph.draw(settings, &mut PathPen { path: &mut path }) {
            log::debug!("{}: glyph {} outline failed: {:?}", self.family, glyph_id, err);
            return None;
        }

        if path.elements().is_empty() {
            None
        } else {
            Some(path)
        }
    }

    fn is_bold(&self) -> bool {
        self.bold
    }

    fn is_italic(&self) -> bool {
        self.italic
    }
}

/// Look `key` up in `cache`, computing and storing the value on a miss
fn memoized<K, V>(cache: &RwLock<HashMap<K, V>>, key: K, compute: impl FnOnce() -> V) -> V
where
    K: Eq + Hash,
    V: Copy,
{
    if let Some(value) = cache.read().get(&key) {
        return *value;
    }
    let value = compute();
    cache.write().insert(key, value);
    value
}

/// Bridge between skrifa's outline commands and kurbo's path format
struct PathPen<'a> {
    path: &'a mut kurbo::BezPath,
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

//! The contracts at the edges of the pipeline
//!
//! - [`FontFace`] - one parsed face: metrics, cmap, advances, outlines
//! - [`FontProvider`] - finds faces by family and style
//! - [`GraphicsHost`] - the compositor's texture API
//! - [`TextReader`] - file-backed text

use std::sync::Arc;

use crate::{
    error::Result,
    font::LineMetrics,
    state::FontFlags,
    types::{GlyphId, TextureFormat},
};

/// Your window into one font face
///
/// All values are in font units; [`crate::ResolvedFont`] does the scaling.
/// Outlines use the font's y-up coordinate system.
///
/// ```ignore
/// struct MyFace;
///
/// impl FontFace for MyFace {
///     fn family(&self) -> &str { "My Face" }
///     fn units_per_em(&self) -> u16 { 1000 }
///     fn line_metrics(&self) -> LineMetrics { LineMetrics::default() }
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> { Some(ch as u32) }
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 { 500.0 }
///     fn glyph_path(&self, _glyph_id: GlyphId) -> Option<kurbo::BezPath> { None }
/// }
/// ```
pub trait FontFace: Send + Sync {
    /// Family name, for logs
    fn family(&self) -> &str;

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Ascent, descent, gap and decoration metrics
    fn line_metrics(&self) -> LineMetrics;

    /// Find the glyph that represents this character
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How far to move after this glyph
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Outline of the glyph, `None` for blank or missing glyphs
    fn glyph_path(&self, glyph_id: GlyphId) -> Option<kurbo::BezPath>;

    /// Whether the face itself is a bold design
    fn is_bold(&self) -> bool {
        false
    }

    /// Whether the face itself is an italic or oblique design
    fn is_italic(&self) -> bool {
        false
    }
}

/// Where faces come from
pub trait FontProvider: Send + Sync {
    /// Load the face of `family` closest to the requested style
    fn load_face(&self, family: &str, flags: FontFlags) -> Result<Arc<dyn FontFace>>;
}

/// Opaque host texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// The compositor's graphics surface
///
/// Texture calls must happen between [`GraphicsHost::enter_graphics`] and
/// [`GraphicsHost::leave_graphics`]; use [`GraphicsScope`] to get that
/// right on every exit path.
pub trait GraphicsHost: Send + Sync {
    /// Take the exclusive graphics context
    fn enter_graphics(&self);

    /// Give the graphics context back
    fn leave_graphics(&self);

    /// Allocate a texture initialised with `data`
    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) -> Result<TextureId>;

    /// Release a texture
    fn destroy_texture(&self, texture: TextureId);

    /// Replace the pixels of a texture of unchanged size
    fn update_texture(&self, texture: TextureId, data: &[u8], stride: u32) -> Result<()>;

    /// Draw the texture as a sprite during frame rendering
    fn draw_sprite(&self, texture: TextureId, x: u32, y: u32, width: u32, height: u32);
}

/// Holds the host's graphics context until dropped
pub struct GraphicsScope<'a> {
    host: &'a dyn GraphicsHost,
}

impl<'a> GraphicsScope<'a> {
    pub fn enter(host: &'a dyn GraphicsHost) -> Self {
        host.enter_graphics();
        Self { host }
    }

    pub fn host(&self) -> &'a dyn GraphicsHost {
        self.host
    }
}

impl Drop for GraphicsScope<'_> {
    fn drop(&mut self) {
        self.host.leave_graphics();
    }
}

/// Reads the text of file-backed sources
///
/// Failures come back as empty text, never as errors.
pub trait TextReader: Send + Sync {
    fn read_text(&self, path: &str) -> String;
}

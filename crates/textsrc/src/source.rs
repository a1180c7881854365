//! The text source engine
//!
//! [`TextSource::update`] runs the whole pipeline synchronously: normalize
//! settings, resolve the font, lay out, rasterize, sync the texture.
//! [`TextSource::render`] only draws what the last update produced.

use std::sync::Arc;

use textsrc_core::{
    types::Canvas,
    GraphicsHost, RenderState, ResolvedFont, TextReader, TextSettings, TextureId,
};
use textsrc_fontdb::FontResolver;
use textsrc_layout::compute_layout;
use textsrc_render_skia::SkiaRasterizer;

use crate::texture::{TextureAction, TextureSync};

/// One text source: a settings record turned into a host texture
pub struct TextSource {
    name: String,
    state: RenderState,
    font: Option<ResolvedFont>,
    resolver: FontResolver,
    reader: Arc<dyn TextReader>,
    rasterizer: SkiaRasterizer,
    texture: TextureSync,
}

impl TextSource {
    /// Create a source and run its first update
    pub fn new(
        name: impl Into<String>,
        settings: &TextSettings,
        resolver: FontResolver,
        reader: Arc<dyn TextReader>,
        host: Arc<dyn GraphicsHost>,
    ) -> Self {
        let name = name.into();
        let state = RenderState::from_settings(settings, reader.as_ref());
        let mut source = Self {
            rasterizer: SkiaRasterizer::new(name.clone()),
            texture: TextureSync::new(name.clone(), host),
            name,
            state,
            font: None,
            resolver,
            reader,
        };
        source.refresh();
        source
    }

    /// Apply new settings and rebuild the texture
    ///
    /// Never fails: problems are logged and the output degrades to
    /// background only or no texture at all.
    pub fn update(&mut self, settings: &TextSettings) {
        self.state.apply(settings, self.reader.as_ref());
        self.refresh();
    }

    /// Draw the current texture; does nothing when there is none
    pub fn render(&self) {
        self.texture.draw();
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.state.canvas.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.state.canvas.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// The font of the last update, `None` when even the fallback failed
    pub fn font(&self) -> Option<&ResolvedFont> {
        self.font.as_ref()
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture.texture()
    }

    fn refresh(&mut self) {
        self.font = self.resolver.resolve(&self.state.font);

        let layout = compute_layout(&self.state, self.font.as_ref());
        self.state.canvas = layout.canvas;

        let pixels = self.rasterizer.rasterize(&self.state, &layout);
        let Canvas { width, height } = pixels.canvas();

        if let Ok(action) = self.texture.sync(&pixels) {
            match action {
                TextureAction::Created => {
                    log::debug!("[{}] created {}x{} texture", self.name, width, height)
                },
                TextureAction::Updated => {
                    log::debug!("[{}] updated {}x{} texture", self.name, width, height)
                },
            }
        }
    }
}

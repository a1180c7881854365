//! Keeping the host texture in step with the latest pixels
//!
//! A texture lives as long as the canvas size holds still: same size means
//! an in-place update, a new size means destroy then create. Every host
//! call happens inside a [`GraphicsScope`].

use std::sync::Arc;

use textsrc_core::{
    error::Result,
    types::{Canvas, PixelBuffer, TextureFormat},
    GraphicsHost, GraphicsScope, TextSourceError, TextureId,
};

/// What [`TextureSync::sync`] did with the host texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureAction {
    /// A new texture was created, replacing any older one
    Created,
    /// The existing texture received the new pixels
    Updated,
}

/// Owns the host texture of one text source
pub struct TextureSync {
    name: String,
    host: Arc<dyn GraphicsHost>,
    texture: Option<TextureId>,
    size: Canvas,
}

impl TextureSync {
    pub fn new(name: impl Into<String>, host: Arc<dyn GraphicsHost>) -> Self {
        Self {
            name: name.into(),
            host,
            texture: None,
            size: Canvas::default(),
        }
    }

    /// The live texture, if the last creation succeeded
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Size of the last texture this synchronizer asked for
    pub fn size(&self) -> Canvas {
        self.size
    }

    pub fn host(&self) -> &Arc<dyn GraphicsHost> {
        &self.host
    }

    /// Push `buffer` to the host
    ///
    /// On a failed creation no texture is kept; drawing is skipped until a
    /// later sync succeeds.
    pub fn sync(&mut self, buffer: &PixelBuffer) -> Result<TextureAction> {
        let canvas = buffer.canvas();
        let host = Arc::clone(&self.host);
        let scope = GraphicsScope::enter(host.as_ref());

        match self.texture {
            Some(texture) if self.size == canvas => {
                scope
                    .host()
                    .update_texture(texture, &buffer.data, buffer.stride())
                    .map_err(|err| self.warn_failed("update_texture", err))?;
                Ok(TextureAction::Updated)
            },
            _ => {
                if let Some(old) = self.texture.take() {
                    scope.host().destroy_texture(old);
                }
                self.size = canvas;

                let texture = scope
                    .host()
                    .create_texture(
                        canvas.width,
                        canvas.height,
                        TextureFormat::Rgba8,
                        &buffer.data,
                    )
                    .map_err(|err| self.warn_failed("create_texture", err))?;
                self.texture = Some(texture);
                Ok(TextureAction::Created)
            },
        }
    }

    /// Draw the texture at its own size; no-op without one
    ///
    /// Called while the host already holds the graphics context for the frame.
    pub fn draw(&self) {
        if let Some(texture) = self.texture {
            self.host
                .draw_sprite(texture, 0, 0, self.size.width, self.size.height);
        }
    }

    fn warn_failed(&self, op: &str, err: TextSourceError) -> TextSourceError {
        log::warn!("[{}] {}: call failed ({})", self.name, op, err);
        err
    }
}

impl Drop for TextureSync {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            let scope = GraphicsScope::enter(self.host.as_ref());
            scope.host().destroy_texture(texture);
        }
    }
}

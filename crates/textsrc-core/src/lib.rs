//! Textsrc Core: settings in, pixels out
//!
//! A text source turns a settings record into a texture the compositor can
//! draw. This crate holds the pieces every stage of that trip agrees on.
//!
//! ## The Pipeline
//!
//! Every configuration update runs the same five steps, synchronously:
//!
//! 1. **Configuration** - [`TextSettings`] normalizes into a [`RenderState`]
//! 2. **Font resolution** - a [`FontDescriptor`] becomes a [`ResolvedFont`]
//! 3. **Layout** - text is measured and the [`types::Canvas`] is derived
//! 4. **Rasterization** - background, outline and fill land in a [`types::PixelBuffer`]
//! 5. **Texture sync** - the buffer is uploaded through a [`GraphicsHost`]
//!
//! Per-frame drawing only replays the texture built by step 5.
//!
//! ## The Traits at the Seams
//!
//! - [`FontFace`] - metrics, character map and glyph outlines of one face
//! - [`FontProvider`] - finds a face by family name and style
//! - [`GraphicsHost`] - the compositor's texture API
//! - [`TextReader`] - where file-backed text comes from

pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod state;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use color::NativeColor;
pub use config::{FontSettings, TextSettings};
pub use error::{Result, TextSourceError};
pub use font::{LineMetrics, ResolvedFont};
pub use state::{Align, FontDescriptor, FontFlags, RenderState, VAlign};
pub use traits::{FontFace, FontProvider, GraphicsHost, GraphicsScope, TextReader, TextureId};

/// Smallest canvas edge, in pixels
pub const MIN_CANVAS_SIZE: u32 = 32;

/// Largest canvas edge, in pixels
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// The data structures that travel between stages
pub mod types {
    use crate::{MAX_CANVAS_SIZE, MIN_CANVAS_SIZE};

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// A floating point size, used for layout boxes
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct SizeF {
        pub width: f32,
        pub height: f32,
    }

    impl SizeF {
        pub const fn new(width: f32, height: f32) -> Self {
            Self { width, height }
        }
    }

    /// A floating point rectangle in canvas space (y grows downwards)
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct RectF {
        pub x: f32,
        pub y: f32,
        pub width: f32,
        pub height: f32,
    }

    impl RectF {
        pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        pub fn is_empty(&self) -> bool {
            self.width <= 0.0 || self.height <= 0.0
        }

        pub fn right(&self) -> f32 {
            self.x + self.width
        }

        pub fn bottom(&self) -> f32 {
            self.y + self.height
        }

        /// Same size, moved by `(dx, dy)`
        pub fn offset(&self, dx: f32, dy: f32) -> Self {
            Self::new(self.x + dx, self.y + dy, self.width, self.height)
        }

        pub fn size(&self) -> SizeF {
            SizeF::new(self.width, self.height)
        }
    }

    /// Final pixel dimensions of the bitmap and texture
    ///
    /// Both edges are even and lie in `[MIN_CANVAS_SIZE, MAX_CANVAS_SIZE]`
    /// once built through [`Canvas::quantized`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Canvas {
        pub width: u32,
        pub height: u32,
    }

    impl Canvas {
        pub const fn new(width: u32, height: u32) -> Self {
            Self { width, height }
        }

        /// Round each edge up to even, then clamp into the legal range
        pub fn quantized(width: i64, height: i64) -> Self {
            Self {
                width: quantize_edge(width),
                height: quantize_edge(height),
            }
        }

        /// Bytes needed for an RGBA8 buffer of this size
        pub fn byte_len(&self) -> usize {
            self.width as usize * self.height as usize * 4
        }

        /// Row stride of an RGBA8 buffer of this size
        pub fn stride(&self) -> u32 {
            self.width * 4
        }
    }

    fn quantize_edge(edge: i64) -> u32 {
        let even = edge + edge.rem_euclid(2);
        even.clamp(MIN_CANVAS_SIZE as i64, MAX_CANVAS_SIZE as i64) as u32
    }

    /// How texels are laid out in host textures
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextureFormat {
        /// 8-bit red, green, blue, alpha; straight alpha
        Rgba8,
    }

    impl TextureFormat {
        pub const fn bytes_per_pixel(self) -> u32 {
            match self {
                TextureFormat::Rgba8 => 4,
            }
        }
    }

    /// Raw RGBA8 pixels produced by one rasterization pass
    ///
    /// Row-major, stride `width * 4`, straight color with alpha carrying
    /// the configured opacity.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PixelBuffer {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl PixelBuffer {
        /// A fully transparent buffer of the canvas size
        pub fn transparent(canvas: Canvas) -> Self {
            Self {
                width: canvas.width,
                height: canvas.height,
                data: vec![0; canvas.byte_len()],
            }
        }

        pub fn canvas(&self) -> Canvas {
            Canvas::new(self.width, self.height)
        }

        pub fn stride(&self) -> u32 {
            self.width * 4
        }

        /// RGBA of the pixel at `(x, y)`, or `None` outside the buffer
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let idx = ((y * self.width + x) * 4) as usize;
            let px = self.data.get(idx..idx + 4)?;
            Some([px[0], px[1], px[2], px[3]])
        }
    }
}

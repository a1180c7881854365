//! Skia Rasterizer - text and background into RGBA pixels via tiny-skia
//!
//! One pass per update, in this order:
//!
//! 1. Background: the whole canvas, or only the measured box when an
//!    auto-sized canvas grew past it
//! 2. Text path: every glyph outline plus underline and strikeout bars,
//!    built in canvas space so pen widths are in pixels
//! 3. Outline: a round-joined stroke of that path in the outline color
//! 4. Fill: the same path in the text color, on top
//!
//! Text wrapped to fixed extents is masked to the layout's clip box, so
//! neither the outline nor the fill spills past it.
//!
//! A failing step is logged as `[name] op: call failed (reason)` and
//! skipped; the pass always yields a buffer.

use kurbo::{Affine, BezPath, PathEl, Shape};
use tiny_skia::{
    Color, FillRule, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use textsrc_core::{
    error::RenderError,
    font::SYNTHETIC_ITALIC_SKEW,
    types::{PixelBuffer, RectF},
    NativeColor, RenderState,
};
use textsrc_layout::TextLayout;

/// Width of the extra stroke that fakes a bold face, per pixel of font size
const SYNTHETIC_BOLD_RATIO: f32 = 1.0 / 24.0;

/// Rasterizes one text source's layouts
pub struct SkiaRasterizer {
    /// Source name used in log messages
    name: String,
}

impl SkiaRasterizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draw background and text of `state` as laid out in `layout`
    pub fn rasterize(&self, state: &RenderState, layout: &TextLayout) -> PixelBuffer {
        let canvas = layout.canvas;
        let Some(mut pixmap) = Pixmap::new(canvas.width, canvas.height) else {
            self.warn_failed(
                "Pixmap::new",
                &RenderError::PixmapCreationFailed {
                    width: canvas.width,
                    height: canvas.height,
                },
            );
            return PixelBuffer::transparent(canvas);
        };

        self.draw_background(&mut pixmap, state, layout);

        if layout.has_text() {
            if let Err(err) = self.draw_text(&mut pixmap, state, layout) {
                self.warn_failed("draw_text", &err);
            }
        }

        to_pixel_buffer(&pixmap)
    }

    fn draw_background(&self, pixmap: &mut Pixmap, state: &RenderState, layout: &TextLayout) {
        let background = state.background_color();
        let bounds = layout.bounding_box;
        let canvas = layout.canvas;

        let grew_past_box =
            canvas.width as f32 > bounds.width || canvas.height as f32 > bounds.height;

        if grew_past_box && !state.use_extents {
            pixmap.fill(Color::TRANSPARENT);
            if bounds.is_empty() {
                return;
            }
            match to_skia_rect(bounds) {
                Ok(rect) => {
                    pixmap.fill_rect(rect, &paint(background), Transform::identity(), None);
                },
                Err(err) => self.warn_failed("fill_rect", &err),
            }
        } else {
            pixmap.fill(to_skia_color(background));
        }
    }

    fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        state: &RenderState,
        layout: &TextLayout,
    ) -> Result<(), RenderError> {
        let Some(font) = layout.font() else {
            return Ok(());
        };

        let arrangement = layout.arrange(layout.draw_box);
        let scale = font.scale() as f64;
        let skew = if font.synthetic_italic() {
            SYNTHETIC_ITALIC_SKEW as f64
        } else {
            0.0
        };

        let mut text_path = BezPath::new();
        for glyph in &arrangement.glyphs {
            let Some(outline) = font.face().glyph_path(glyph.glyph_id) else {
                continue;
            };
            // Font units are y-up; flip onto the baseline and slant if needed
            let transform = Affine::new([
                scale,
                0.0,
                skew * scale,
                -scale,
                glyph.x as f64,
                glyph.baseline as f64,
            ]);
            let placed = transform * outline;
            text_path.extend(placed.elements().iter().copied());
        }

        for bar in &arrangement.decorations {
            let rect = kurbo::Rect::new(
                bar.x as f64,
                bar.y as f64,
                bar.right() as f64,
                bar.bottom() as f64,
            );
            text_path.extend(rect.path_elements(0.1));
        }

        if text_path.elements().is_empty() {
            log::debug!("[{}] nothing visible to draw", self.name);
            return Ok(());
        }

        let path = to_skia_path(&text_path)?;
        let fill = paint(state.fill_color());
        let mask = match layout.clip {
            Some(clip) if clip.is_empty() => return Ok(()),
            Some(clip) => Some(clip_mask(pixmap, clip)?),
            None => None,
        };

        if state.use_outline && state.outline_size > 0.0 {
            let pen = Stroke {
                width: state.outline_size,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(state.outline_color()),
                &pen,
                Transform::identity(),
                mask.as_ref(),
            );
        }

        pixmap.fill_path(
            &path,
            &fill,
            FillRule::Winding,
            Transform::identity(),
            mask.as_ref(),
        );

        if font.synthetic_bold() {
            let pen = Stroke {
                width: font.size() * SYNTHETIC_BOLD_RATIO,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &fill, &pen, Transform::identity(), mask.as_ref());
        }

        Ok(())
    }

    fn warn_failed(&self, op: &str, err: &RenderError) {
        log::warn!("[{}] {}: call failed ({})", self.name, op, err);
    }
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new("text")
    }
}

fn to_skia_color(color: NativeColor) -> Color {
    let [r, g, b, a] = color.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

fn paint(color: NativeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    paint.set_color_rgba8(r, g, b, a);
    paint
}

fn to_skia_rect(rect: RectF) -> Result<Rect, RenderError> {
    Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        .ok_or_else(|| RenderError::InvalidRect(format!("{:?}", rect)))
}

/// Coverage mask the size of `pixmap` that only lets `clip` through
fn clip_mask(pixmap: &Pixmap, clip: RectF) -> Result<Mask, RenderError> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height()).ok_or(
        RenderError::PixmapCreationFailed {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )?;
    let area = PathBuilder::from_rect(to_skia_rect(clip)?);
    mask.fill_path(&area, FillRule::Winding, false, Transform::identity());
    Ok(mask)
}

/// Translate kurbo's path format into tiny-skia's
fn to_skia_path(path: &BezPath) -> Result<Path, RenderError> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish().ok_or(RenderError::PathBuildingFailed)
}

/// Convert the premultiplied pixmap into straight RGBA
fn to_pixel_buffer(pixmap: &Pixmap) -> PixelBuffer {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    PixelBuffer {
        width: pixmap.width(),
        height: pixmap.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_uses_native_channels() {
        // 0xAABBGGRR: red lives in the low byte
        let color = NativeColor(0xFF00_00FF);
        assert_eq!(to_skia_color(color).red(), 1.0);
        assert_eq!(to_skia_color(color).blue(), 0.0);
        assert!(paint(color).anti_alias);
    }

    #[test]
    fn test_rect_conversion_rejects_negative_size() {
        assert!(to_skia_rect(RectF::new(0.0, 0.0, 10.0, 5.0)).is_ok());
        assert!(matches!(
            to_skia_rect(RectF::new(0.0, 0.0, -1.0, 5.0)),
            Err(RenderError::InvalidRect(_))
        ));
    }

    #[test]
    fn test_path_conversion() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.quad_to((10.0, 10.0), (0.0, 10.0));
        path.close_path();
        let skia = to_skia_path(&path).unwrap();
        assert_eq!(skia.bounds().width(), 10.0);
    }

    #[test]
    fn test_empty_path_is_an_error() {
        assert!(matches!(
            to_skia_path(&BezPath::new()),
            Err(RenderError::PathBuildingFailed)
        ));
    }

    #[test]
    fn test_demultiplied_output() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.fill(Color::from_rgba8(255, 0, 0, 128));
        let buffer = to_pixel_buffer(&pixmap);
        assert_eq!(buffer.data.len(), 8);
        let [r, g, b, a] = buffer.pixel(1, 0).unwrap();
        assert!(r >= 254);
        assert_eq!((g, b, a), (0, 0, 128));
    }
}

//! From render state to bounding box, draw box and canvas
//!
//! [`compute_layout`] runs once per update. The rasterizer gets the result
//! and asks it to [`TextLayout::arrange`] the glyphs; nothing is measured
//! twice.

use textsrc_core::{
    types::{Canvas, GlyphId, RectF, SizeF},
    FontFlags, RenderState, ResolvedFont,
};

use crate::{
    format::StringFormat,
    lines::{measure, Line, LineBreaker},
};

/// Added before truncating measured sizes to whole pixels
pub const EPSILON: f32 = 1e-4;

/// A glyph with its pen position on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub glyph_id: GlyphId,
    pub ch: char,
    /// Left edge of the glyph cell
    pub x: f32,
    /// Baseline, y grows downwards
    pub baseline: f32,
}

/// Everything the rasterizer draws for the text itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    pub glyphs: Vec<PlacedGlyph>,
    /// Underline and strikeout bars
    pub decorations: Vec<RectF>,
}

impl Arrangement {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.decorations.is_empty()
    }
}

/// Result of one layout pass
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub format: StringFormat,
    pub lines: Vec<Line>,
    /// Area the background fills when it does not cover the whole canvas
    pub bounding_box: RectF,
    /// Box the glyphs are arranged in
    pub draw_box: RectF,
    pub canvas: Canvas,
    /// Drawing stays inside this box when the text was wrapped to extents
    pub clip: Option<RectF>,
    font: Option<ResolvedFont>,
}

impl TextLayout {
    pub fn font(&self) -> Option<&ResolvedFont> {
        self.font.as_ref()
    }

    /// Whether there is anything to draw besides the background
    pub fn has_text(&self) -> bool {
        self.font.is_some() && !self.lines.is_empty()
    }

    /// Position every glyph and decoration inside `draw_box`
    ///
    /// Lines lying wholly outside [`TextLayout::clip`] are left out.
    pub fn arrange(&self, draw_box: RectF) -> Arrangement {
        let Some(font) = &self.font else {
            return Arrangement::default();
        };

        let mut arrangement = Arrangement::default();
        let line_height = font.line_height();
        let block = line_height * self.lines.len() as f32;

        if self.format.vertical {
            let left = draw_box.x + self.format.line_offset(draw_box.width, block);
            let cell = font.vertical_advance();

            for (index, line) in self.lines.iter().enumerate() {
                let column = left + block - line_height * (index + 1) as f32;
                if !self.keeps_span(column, line_height, |clip| (clip.x, clip.right())) {
                    continue;
                }
                let top = draw_box.y + self.format.flow_offset(draw_box.height, line.advance);

                for (row, ch) in line.text.chars().enumerate() {
                    arrangement.glyphs.push(PlacedGlyph {
                        glyph_id: font.glyph_id(ch),
                        ch,
                        x: column + (line_height - font.advance(ch)) / 2.0,
                        baseline: top + cell * row as f32 + font.ascent(),
                    });
                }

                if line.advance > 0.0 {
                    self.vertical_decorations(font, line, column, top, &mut arrangement);
                }
            }
        } else {
            let top = draw_box.y + self.format.line_offset(draw_box.height, block);

            for (index, line) in self.lines.iter().enumerate() {
                let line_top = top + line_height * index as f32;
                if !self.keeps_span(line_top, line_height, |clip| (clip.y, clip.bottom())) {
                    continue;
                }

                let start = draw_box.x + self.format.flow_offset(draw_box.width, line.advance);
                let baseline = line_top + font.ascent();

                let mut x = start;
                for ch in line.text.chars() {
                    arrangement.glyphs.push(PlacedGlyph {
                        glyph_id: font.glyph_id(ch),
                        ch,
                        x,
                        baseline,
                    });
                    x += font.advance(ch);
                }

                if line.advance > 0.0 {
                    self.horizontal_decorations(font, line, start, baseline, &mut arrangement);
                }
            }
        }

        arrangement
    }

    // Whether a line spanning `start..start + extent` on the line axis
    // overlaps the clip box at all
    fn keeps_span(&self, start: f32, extent: f32, axis: impl Fn(&RectF) -> (f32, f32)) -> bool {
        match &self.clip {
            Some(clip) => {
                let (low, high) = axis(clip);
                start < high && start + extent > low
            },
            None => true,
        }
    }

    fn horizontal_decorations(
        &self,
        font: &ResolvedFont,
        line: &Line,
        start: f32,
        baseline: f32,
        arrangement: &mut Arrangement,
    ) {
        if font.flags().contains(FontFlags::UNDERLINE) {
            let (offset, thickness) = font.underline();
            arrangement.decorations.push(RectF::new(
                start,
                baseline + offset - thickness / 2.0,
                line.advance,
                thickness,
            ));
        }
        if font.flags().contains(FontFlags::STRIKEOUT) {
            let (offset, thickness) = font.strikeout();
            arrangement.decorations.push(RectF::new(
                start,
                baseline - offset - thickness / 2.0,
                line.advance,
                thickness,
            ));
        }
    }

    // Columns carry their decorations as vertical bars: underline along the
    // left edge, strikeout through the middle.
    fn vertical_decorations(
        &self,
        font: &ResolvedFont,
        line: &Line,
        column: f32,
        top: f32,
        arrangement: &mut Arrangement,
    ) {
        let line_height = font.line_height();
        if font.flags().contains(FontFlags::UNDERLINE) {
            let (_, thickness) = font.underline();
            arrangement
                .decorations
                .push(RectF::new(column, top, thickness, line.advance));
        }
        if font.flags().contains(FontFlags::STRIKEOUT) {
            let (_, thickness) = font.strikeout();
            arrangement.decorations.push(RectF::new(
                column + (line_height - thickness) / 2.0,
                top,
                thickness,
                line.advance,
            ));
        }
    }
}

/// Measure the text of `state` and derive the canvas
///
/// `font` is `None` when resolution failed; the result then only sizes
/// the background.
pub fn compute_layout(state: &RenderState, font: Option<&ResolvedFont>) -> TextLayout {
    let format = StringFormat::from_state(state);
    let outline = state.outline_inset();
    let font = font.filter(|_| !state.text.is_empty());

    let mut lines = Vec::new();
    let mut bounding_box = RectF::default();

    if let Some(font) = font {
        let breaker = LineBreaker::new(font, state.vertical);

        if state.use_extents && state.wrap {
            let layout_box = SizeF::new(
                (state.extents_cx as f32 - outline).max(0.0),
                (state.extents_cy as f32 - outline).max(0.0),
            );
            let limit = if state.vertical {
                layout_box.height
            } else {
                layout_box.width
            };

            lines = breaker.break_lines(&state.text, Some(limit));
            let size = measure(&lines, font, state.vertical);
            bounding_box = place_in_box(&format, size, layout_box);
        } else {
            lines = breaker.break_lines(&state.text, None);
            let size = measure(&lines, font, state.vertical);
            bounding_box = RectF::new(0.0, 0.0, size.width + outline, size.height + outline);
        }
    }

    let face_size = state.font.size as i64;
    let mut cx: i64;
    let mut cy: i64;
    if state.vertical {
        if bounding_box.width < face_size as f32 {
            cx = face_size;
            bounding_box.width = face_size as f32;
        } else {
            cx = (bounding_box.width + EPSILON) as i64;
        }
        cy = (bounding_box.height + EPSILON) as i64;
    } else {
        if bounding_box.height < face_size as f32 {
            cy = face_size;
            bounding_box.height = face_size as f32;
        } else {
            cy = (bounding_box.height + EPSILON) as i64;
        }
        cx = (bounding_box.width + EPSILON) as i64;
    }

    if state.use_extents {
        let (extents_cx, extents_cy) = (state.extents_cx as i64, state.extents_cy as i64);
        if state.wrap {
            cx = extents_cx;
            cy = extents_cy;
        } else if extents_cx > cx {
            cx = extents_cx;
        } else if extents_cy > cy {
            cy = extents_cy;
        }
    }

    let canvas = Canvas::quantized(cx, cy);

    let draw_box = if state.use_outline {
        bounding_box.offset(state.outline_size / 2.0, state.outline_size / 2.0)
    } else {
        bounding_box
    };

    let clip = (state.use_extents && state.wrap).then_some(draw_box);

    log::debug!(
        "Layout: {} lines, box {:?}, canvas {}x{}",
        lines.len(),
        bounding_box,
        canvas.width,
        canvas.height
    );

    TextLayout {
        format,
        lines,
        bounding_box,
        draw_box,
        canvas,
        clip,
        font: font.cloned(),
    }
}

/// Where a measured block lands inside a constrained layout box
fn place_in_box(format: &StringFormat, size: SizeF, layout_box: SizeF) -> RectF {
    let (x, y) = if format.vertical {
        (
            format.line_offset(layout_box.width, size.width),
            format.flow_offset(layout_box.height, size.height),
        )
    } else {
        (
            format.flow_offset(layout_box.width, size.width),
            format.line_offset(layout_box.height, size.height),
        )
    };

    let left = x.max(0.0);
    let top = y.max(0.0);
    let right = (x + size.width).min(layout_box.width);
    let bottom = (y + size.height).min(layout_box.height);
    RectF::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
}

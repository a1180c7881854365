//! Integration tests for the Skia rasterizer
//!
//! Block faces draw every glyph as a rectangle, so expected pixels can be
//! worked out by hand: at 20 px a glyph cell is 10 px wide, the block spans
//! x 1..9 of its cell and y 2..16 of a 20 px line.

use std::sync::Arc;

use textsrc_core::{
    testing::BlockFace,
    types::{Canvas, PixelBuffer},
    FontFlags, RenderState, ResolvedFont, TextReader, TextSettings,
};
use textsrc_layout::compute_layout;
use textsrc_render_skia::SkiaRasterizer;

const CLEAR: [u8; 4] = [0, 0, 0, 0];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

struct NoFiles;

impl TextReader for NoFiles {
    fn read_text(&self, _path: &str) -> String {
        String::new()
    }
}

fn state(text: &str, tweak: impl FnOnce(&mut TextSettings)) -> RenderState {
    let mut settings = TextSettings {
        text: text.to_string(),
        ..TextSettings::default()
    };
    settings.font.size = 20;
    tweak(&mut settings);
    RenderState::from_settings(&settings, &NoFiles)
}

fn render(state: &RenderState) -> PixelBuffer {
    let font = ResolvedFont::new(
        Arc::new(BlockFace::new("Block")),
        state.font.size as f32,
        state.font.flags,
    );
    let layout = compute_layout(state, Some(&font));
    SkiaRasterizer::new("test").rasterize(state, &layout)
}

fn alpha(buffer: &PixelBuffer, x: u32, y: u32) -> u8 {
    buffer.pixel(x, y).map(|px| px[3]).unwrap_or_default()
}

#[test]
fn test_rasterizer_name() {
    assert_eq!(SkiaRasterizer::new("Lower third").name(), "Lower third");
    assert_eq!(SkiaRasterizer::default().name(), "text");
}

#[test]
fn test_buffer_matches_canvas() {
    let buffer = render(&state("Hello", |_| {}));
    assert_eq!(buffer.canvas(), Canvas::new(50, 32));
    assert_eq!(buffer.data.len(), 50 * 32 * 4);
}

#[test]
fn test_empty_auto_text_is_fully_transparent() {
    let buffer = render(&state("", |s| {
        s.bk_color = 0xFF0000;
        s.bk_opacity = 100;
    }));
    assert_eq!(buffer.canvas(), Canvas::new(32, 32));
    assert!(buffer.data.iter().all(|&byte| byte == 0));
}

#[test]
fn test_empty_wrapped_extents_are_filled() {
    let buffer = render(&state("", |s| {
        s.extents = true;
        s.extents_wrap = true;
        s.extents_cx = 100;
        s.extents_cy = 50;
        s.bk_color = 0xFF0000;
        s.bk_opacity = 100;
    }));
    assert_eq!(buffer.canvas(), Canvas::new(100, 50));
    assert!(buffer.data.chunks_exact(4).all(|px| px == RED));
}

#[test]
fn test_glyphs_fill_with_text_color() {
    let buffer = render(&state("ab", |_| {}));
    assert_eq!(buffer.pixel(5, 10), Some(WHITE));
    assert_eq!(buffer.pixel(15, 10), Some(WHITE));
    // gap between the two blocks
    assert_eq!(alpha(&buffer, 10, 10), 0);
    assert_eq!(buffer.pixel(25, 25), Some(CLEAR));
}

#[test]
fn test_background_fills_only_measured_box_when_canvas_grew() {
    let buffer = render(&state("ab", |s| {
        s.bk_color = 0x0000FF;
        s.bk_opacity = 100;
    }));
    assert_eq!(buffer.pixel(5, 18), Some(BLUE));
    assert_eq!(buffer.pixel(5, 10), Some(WHITE));
    assert_eq!(buffer.pixel(25, 25), Some(CLEAR));
    assert_eq!(buffer.pixel(5, 25), Some(CLEAR));
}

#[test]
fn test_extents_fill_the_whole_canvas() {
    let buffer = render(&state("ab", |s| {
        s.extents = true;
        s.extents_cx = 100;
        s.extents_cy = 100;
        s.bk_color = 0x0000FF;
        s.bk_opacity = 100;
    }));
    assert_eq!(buffer.canvas(), Canvas::new(100, 32));
    assert_eq!(buffer.pixel(90, 30), Some(BLUE));
    assert_eq!(buffer.pixel(5, 10), Some(WHITE));
}

#[test]
fn test_outline_is_stroked_under_the_fill() {
    let buffer = render(&state("ab", |s| {
        s.outline = true;
        s.outline_size = 2;
        s.outline_color = 0xFF0000;
    }));
    // the block moved to x 2..10 and y 3..17; the pen covers one pixel around it
    assert_eq!(buffer.pixel(1, 10), Some(RED));
    assert_eq!(buffer.pixel(5, 10), Some(WHITE));
    assert_eq!(buffer.pixel(30, 30), Some(CLEAR));
}

#[test]
fn test_opacity_becomes_alpha() {
    let buffer = render(&state("ab", |s| s.opacity = 50));
    let [r, g, b, a] = buffer.pixel(5, 10).unwrap_or_default();
    assert_eq!(a, 128);
    assert!(r >= 254 && g >= 254 && b >= 254);
}

#[test]
fn test_underline_bridges_the_glyph_gap() {
    let plain = render(&state("ab", |s| s.font.size = 40));
    assert_eq!(alpha(&plain, 20, 35), 0);

    let underlined = render(&state("ab", |s| {
        s.font.size = 40;
        s.font.flags = FontFlags::UNDERLINE.bits();
    }));
    assert_eq!(alpha(&underlined, 20, 35), 255);
}

#[test]
fn test_strikeout_crosses_above_the_baseline() {
    let struck = render(&state("ab", |s| {
        s.font.size = 40;
        s.font.flags = FontFlags::STRIKEOUT.bits();
    }));
    assert_eq!(alpha(&struck, 20, 19), 255);
    assert_eq!(alpha(&struck, 20, 35), 0);
}

#[test]
fn test_synthetic_italic_slants_the_top() {
    let upright = render(&state("a", |_| {}));
    assert_eq!(alpha(&upright, 1, 4), 255);
    assert_eq!(alpha(&upright, 10, 4), 0);

    let italic = render(&state("a", |s| s.font.flags = FontFlags::ITALIC.bits()));
    assert_eq!(alpha(&italic, 1, 4), 0);
    assert_eq!(alpha(&italic, 10, 4), 255);
}

#[test]
fn test_synthetic_bold_thickens_edges() {
    let regular = render(&state("a", |_| {}));
    assert_eq!(alpha(&regular, 0, 10), 0);

    let bold = render(&state("a", |s| s.font.flags = FontFlags::BOLD.bits()));
    assert!(alpha(&bold, 0, 10) > 0);
}

#[test]
fn test_missing_font_renders_background_only() {
    let state = state("ab", |s| s.bk_opacity = 100);
    let layout = compute_layout(&state, None);
    let buffer = SkiaRasterizer::new("test").rasterize(&state, &layout);
    assert_eq!(buffer.canvas(), Canvas::new(32, 32));
    assert!(buffer.data.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn test_whitespace_only_text_draws_no_glyphs() {
    let buffer = render(&state("   ", |_| {}));
    assert!(buffer.data.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn test_rendering_is_deterministic() {
    let settings = |s: &mut TextSettings| {
        s.outline = true;
        s.font.flags = (FontFlags::BOLD | FontFlags::ITALIC).bits();
    };
    let first = render(&state("same\ntext", settings));
    let second = render(&state("same\ntext", settings));
    assert_eq!(first, second);
}

#[test]
fn test_wrapped_text_is_clipped_to_the_box() {
    let buffer = render(&state("a\nb\nc\nd", |s| {
        s.extents = true;
        s.extents_wrap = true;
        s.extents_cx = 40;
        s.extents_cy = 60;
        s.outline = true;
        s.outline_size = 10;
        s.outline_color = 0xFF0000;
    }));
    assert_eq!(buffer.canvas(), Canvas::new(40, 60));

    // the box spans x 5..15 and y 5..55; "c" has its block at x 6..14, y 47..61
    assert_eq!(buffer.pixel(10, 50), Some(WHITE));
    assert_eq!(buffer.pixel(10, 57), Some(CLEAR));
    assert_eq!(buffer.pixel(2, 50), Some(CLEAR));
    assert_eq!(buffer.pixel(5, 50), Some(RED));
}

#[test]
fn test_unusable_canvas_yields_empty_buffer() {
    let state = state("ab", |_| {});
    let font = ResolvedFont::new(Arc::new(BlockFace::new("Block")), 20.0, state.font.flags);
    let mut layout = compute_layout(&state, Some(&font));
    layout.canvas = Canvas::new(0, 0);

    let buffer = SkiaRasterizer::new("test").rasterize(&state, &layout);
    assert_eq!(buffer.canvas(), Canvas::new(0, 0));
    assert!(buffer.data.is_empty());
}

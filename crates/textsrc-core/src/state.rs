//! Normalized render state of one text source

use bitflags::bitflags;

use crate::{
    color::{rgb_to_bgr, NativeColor},
    config::TextSettings,
    traits::TextReader,
    types::Canvas,
};

bitflags! {
    /// Style bits carried in the font settings
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontFlags: u32 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKEOUT = 1 << 3;
    }
}

/// Face name, size and style a source asks for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontDescriptor {
    pub face: String,
    /// Point size; one point maps to one pixel on the canvas
    pub size: i32,
    pub flags: FontFlags,
}

impl FontDescriptor {
    pub fn bold(&self) -> bool {
        self.flags.contains(FontFlags::BOLD)
    }

    pub fn italic(&self) -> bool {
        self.flags.contains(FontFlags::ITALIC)
    }

    pub fn underline(&self) -> bool {
        self.flags.contains(FontFlags::UNDERLINE)
    }

    pub fn strikeout(&self) -> bool {
        self.flags.contains(FontFlags::STRIKEOUT)
    }
}

/// Horizontal alignment setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Unknown strings fall back to `Left`
    pub fn parse(value: &str) -> Self {
        match value {
            "center" => Align::Center,
            "right" => Align::Right,
            _ => Align::Left,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Vertical alignment setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VAlign {
    /// Unknown strings fall back to `Top`
    pub fn parse(value: &str) -> Self {
        match value {
            "center" => VAlign::Center,
            "bottom" => VAlign::Bottom,
            _ => VAlign::Top,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        }
    }
}

/// Everything one source needs to lay out and draw its text
///
/// Colors are stored in native `0xBBGGRR` order. Every update replaces all
/// fields; only `canvas` survives until the next layout pass rewrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub text: String,
    pub read_from_file: bool,
    pub file: String,

    pub font: FontDescriptor,
    pub color: u32,
    pub opacity: u32,
    pub bk_color: u32,
    pub bk_opacity: u32,
    pub align: Align,
    pub valign: VAlign,
    pub vertical: bool,

    pub use_outline: bool,
    pub outline_size: f32,
    pub outline_color: u32,
    pub outline_opacity: u32,

    pub use_extents: bool,
    pub wrap: bool,
    pub extents_cx: u32,
    pub extents_cy: u32,

    pub canvas: Canvas,
}

impl RenderState {
    /// Normalize a settings record
    ///
    /// File-backed text comes from `reader`; an unreadable file yields
    /// empty text.
    pub fn from_settings(settings: &TextSettings, reader: &dyn TextReader) -> Self {
        let mut state = Self {
            text: String::new(),
            read_from_file: false,
            file: String::new(),
            font: FontDescriptor::default(),
            color: 0,
            opacity: 0,
            bk_color: 0,
            bk_opacity: 0,
            align: Align::Left,
            valign: VAlign::Top,
            vertical: false,
            use_outline: false,
            outline_size: 0.0,
            outline_color: 0,
            outline_opacity: 0,
            use_extents: false,
            wrap: false,
            extents_cx: 0,
            extents_cy: 0,
            canvas: Canvas::default(),
        };
        state.apply(settings, reader);
        state
    }

    /// Replace every configured field from `settings`, keeping the canvas
    pub fn apply(&mut self, settings: &TextSettings, reader: &dyn TextReader) {
        self.font = FontDescriptor {
            face: settings.font.face.clone(),
            size: settings.font.size.clamp(0, i32::MAX as i64) as i32,
            flags: FontFlags::from_bits_truncate(settings.font.flags),
        };

        self.color = rgb_to_bgr(settings.color);
        self.opacity = settings.opacity;
        self.bk_color = rgb_to_bgr(settings.bk_color);
        self.bk_opacity = settings.bk_opacity;
        self.vertical = settings.vertical;

        self.read_from_file = settings.read_from_file;
        let text = if settings.read_from_file {
            self.file = settings.file.clone();
            reader.read_text(&settings.file)
        } else {
            settings.text.clone()
        };
        self.text = strip_trailing_newline(text);

        self.use_outline = settings.outline;
        self.outline_color = rgb_to_bgr(settings.outline_color);
        self.outline_opacity = settings.outline_opacity;
        self.outline_size = (settings.outline_size as f32).round();

        self.use_extents = settings.extents;
        self.wrap = settings.extents_wrap;
        self.extents_cx = settings.extents_cx;
        self.extents_cy = settings.extents_cy;

        self.align = Align::parse(&settings.align);
        self.valign = VAlign::parse(&settings.valign);
    }

    pub fn fill_color(&self) -> NativeColor {
        NativeColor::new(self.color, self.opacity)
    }

    pub fn outline_color(&self) -> NativeColor {
        NativeColor::new(self.outline_color, self.outline_opacity)
    }

    /// Background color; alpha only counts behind text or a fixed canvas
    pub fn background_color(&self) -> NativeColor {
        let color = NativeColor::new(self.bk_color, self.bk_opacity);
        if self.text.is_empty() && !self.use_extents {
            color.without_alpha()
        } else {
            color
        }
    }

    /// Outline width when outlining is on, zero otherwise
    pub fn outline_inset(&self) -> f32 {
        if self.use_outline {
            self.outline_size
        } else {
            0.0
        }
    }
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

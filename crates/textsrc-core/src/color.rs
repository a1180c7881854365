//! Color conversion between the settings and the rasterizer
//!
//! Settings carry `0xRRGGBB` plus a 0..=100 opacity. The rasterizer works
//! in native order, `0xAABBGGRR`: red in the low byte, alpha on top.

/// Swap the red and blue bytes of a 24-bit color
///
/// The permutation is its own inverse, so the same call maps native order
/// back to `0xRRGGBB`.
pub const fn rgb_to_bgr(rgb: u32) -> u32 {
    ((rgb & 0xFF) << 16) | (rgb & 0xFF00) | ((rgb & 0xFF_0000) >> 16)
}

/// Alpha byte for an opacity percentage: `round(opacity * 255 / 100) & 0xFF`
pub const fn alpha_from_opacity(opacity: u32) -> u8 {
    let scaled = (opacity as u64 * 255 + 50) / 100;
    (scaled & 0xFF) as u8
}

/// A 32-bit color in the rasterizer's native `0xAABBGGRR` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeColor(pub u32);

impl NativeColor {
    pub const TRANSPARENT: NativeColor = NativeColor(0);

    /// Combine an already permuted `0xBBGGRR` color with an opacity
    pub const fn new(bgr: u32, opacity: u32) -> Self {
        Self((bgr & 0xFF_FFFF) | ((alpha_from_opacity(opacity) as u32) << 24))
    }

    /// Same color with alpha forced to zero
    pub const fn without_alpha(self) -> Self {
        Self(self.0 & 0xFF_FFFF)
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Straight RGBA bytes
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Back to the settings' `0xRRGGBB` form, alpha dropped
    pub const fn to_rgb(self) -> u32 {
        rgb_to_bgr(self.0 & 0xFF_FFFF)
    }
}

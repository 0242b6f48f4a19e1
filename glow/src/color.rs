//! Colour primitives
//!
//! Every colour that reaches the background passes through [`Color::new`],
//! which pins each channel into `[0, CHANNEL_MAX]`. The ceiling is 220 rather
//! than 255 so saturated keyword colours never wash the gradients out.

use palette::Srgba;
use serde::Deserialize;

/// Upper bound for every channel.
pub const CHANNEL_MAX: f32 = 220.0;

/// An RGB triple with channels clamped to `[0, 220]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    /// Build a colour, clamping each channel.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Const constructor for built-in tables; callers keep channels <= 220.
    pub(crate) const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
        }
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Shift every channel by a signed delta and clamp the result.
    pub fn offset(&self, dr: f32, dg: f32, db: f32) -> Self {
        Self::new(self.r + dr, self.g + dg, self.b + db)
    }

    /// Move `t` of the way from `self` toward `to`.
    pub fn lerp(&self, to: Color, t: f32) -> Self {
        Self::new(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
        )
    }

    /// Channel-wise mean of two colours.
    pub fn average(&self, other: Color) -> Self {
        Self::new(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
        )
    }

    /// Convert to a tiny-skia colour with the given opacity.
    pub fn to_skia(self, alpha: f32) -> tiny_skia::Color {
        let rgba: Srgba<u8> =
            Srgba::new(self.r / 255.0, self.g / 255.0, self.b / 255.0, alpha.clamp(0.0, 1.0))
                .into_format();
        tiny_skia::Color::from_rgba8(rgba.red, rgba.green, rgba.blue, rgba.alpha)
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as f32, g as f32, b as f32)
    }
}

/// Pin a channel into `[0, CHANNEL_MAX]`. NaN maps to 0.
pub fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, CHANNEL_MAX)
    }
}

/// An ordered run of colours driving the gradient layers.
pub type Palette = Vec<Color>;

/// Palette shown before the first sentence arrives.
pub fn default_palette() -> Palette {
    vec![
        Color::from_u8(30, 30, 40),
        Color::from_u8(20, 40, 60),
        Color::from_u8(40, 20, 50),
        Color::from_u8(10, 50, 80),
    ]
}

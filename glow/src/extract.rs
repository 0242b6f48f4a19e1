//! Sentence → palette derivation.

use rand::{Rng, RngCore};

use crate::color::{Color, Palette};
use crate::keywords;
use crate::sentiment;

/// Palettes are padded up to this many colours.
pub const MIN_PALETTE: usize = 4;
/// Palettes are truncated to this many colours.
pub const MAX_PALETTE: usize = 5;
/// Half-width of the uniform jitter applied when padding.
pub const JITTER_SPAN: f32 = 30.0;

const ANALOGOUS_OFFSETS: [[f32; 3]; 2] = [[50.0, -30.0, 40.0], [-30.0, 50.0, -25.0]];

/// Source of per-channel jitter used when padding a palette.
pub trait JitterSource {
    /// A value in `[-JITTER_SPAN, JITTER_SPAN)`.
    fn jitter(&mut self) -> f32;
}

impl<R: RngCore> JitterSource for R {
    fn jitter(&mut self) -> f32 {
        self.gen_range(-JITTER_SPAN..JITTER_SPAN)
    }
}

/// Derive a 4–5 colour palette from a sentence and its base colour.
///
/// The base always comes first, followed by every keyword colour found in
/// table order. A sentence with no keywords gets two analogous colours
/// instead. Short palettes are padded with jittered copies of their last
/// entry.
pub fn extract_colors<J: JitterSource + ?Sized>(text: &str, base: Color, jitter: &mut J) -> Palette {
    let lowered = text.to_lowercase();
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE + 2);
    palette.push(base);
    palette.extend(keywords::matching(&lowered).map(|k| k.color));

    if palette.len() == 1 {
        for [dr, dg, db] in ANALOGOUS_OFFSETS {
            palette.push(base.offset(dr, dg, db));
        }
    }

    while palette.len() < MIN_PALETTE {
        let Some(last) = palette.last().copied() else {
            break;
        };
        palette.push(last.offset(jitter.jitter(), jitter.jitter(), jitter.jitter()));
    }

    palette.truncate(MAX_PALETTE);
    palette
}

/// Bundles palette extraction and speed scoring behind one jitter source.
pub struct ColorExtractor<J = rand::rngs::StdRng> {
    jitter: J,
}

impl ColorExtractor<rand::rngs::StdRng> {
    /// Extractor seeded from the OS.
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self::with_jitter(rand::rngs::StdRng::from_entropy())
    }
}

impl<J: JitterSource> ColorExtractor<J> {
    pub fn with_jitter(jitter: J) -> Self {
        Self { jitter }
    }

    pub fn extract_colors(&mut self, text: &str, base: Color) -> Palette {
        extract_colors(text, base, &mut self.jitter)
    }

    pub fn sentiment_speed(&self, text: &str) -> f64 {
        sentiment::sentiment_speed(text)
    }
}

/// First 50 characters of a sentence, for log lines.
pub(crate) fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(50).collect();
    if text.chars().nth(50).is_some() {
        out.push_str("...");
    }
    out
}

//! Keyword colour table
//!
//! Words in a sentence pull their associated colour into the palette. Table
//! order is significant: the extractor walks it top to bottom, so earlier
//! entries land earlier in the palette.

use crate::color::Color;

/// Semantic family a keyword belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordFamily {
    /// Fire, heat, danger.
    Heat,
    /// Water, cold, sky.
    Water,
    /// Forest, growth.
    Nature,
    /// Soil, desert, drought.
    Earth,
    /// Smoke, city, pollution.
    Urban,
    /// Dusk, toxicity.
    Twilight,
    /// Bleached, ghostly.
    Pale,
    /// Warning, decay.
    Warning,
}

/// One row of the keyword table.
#[derive(Clone, Copy, Debug)]
pub struct Keyword {
    pub word: &'static str,
    pub color: Color,
    pub family: KeywordFamily,
}

const fn kw(word: &'static str, family: KeywordFamily, r: u8, g: u8, b: u8) -> Keyword {
    Keyword {
        word,
        color: Color::from_u8(r, g, b),
        family,
    }
}

use KeywordFamily::*;

/// The keyword table, in match-priority order.
pub static KEYWORDS: &[Keyword] = &[
    kw("fire", Heat, 200, 80, 40),
    kw("flame", Heat, 220, 70, 30),
    kw("burn", Heat, 190, 70, 35),
    kw("heat", Heat, 200, 100, 50),
    kw("sun", Heat, 220, 130, 50),
    kw("lava", Heat, 210, 60, 30),
    kw("blood", Heat, 180, 30, 30),
    kw("red", Heat, 190, 50, 40),
    kw("orange", Heat, 220, 120, 40),
    kw("ocean", Water, 20, 90, 180),
    kw("water", Water, 30, 110, 200),
    kw("sea", Water, 25, 100, 190),
    kw("ice", Water, 60, 120, 210),
    kw("glacier", Water, 70, 130, 200),
    kw("blue", Water, 30, 90, 200),
    kw("cold", Water, 40, 100, 180),
    kw("sky", Water, 50, 120, 210),
    kw("frozen", Water, 65, 125, 205),
    kw("forest", Nature, 30, 120, 60),
    kw("tree", Nature, 40, 140, 70),
    kw("leaf", Nature, 50, 160, 65),
    kw("grass", Nature, 70, 160, 60),
    kw("green", Nature, 45, 140, 65),
    kw("moss", Nature, 50, 130, 70),
    kw("plant", Nature, 60, 150, 70),
    kw("desert", Earth, 180, 120, 60),
    kw("sand", Earth, 200, 150, 80),
    kw("soil", Earth, 150, 100, 60),
    kw("earth", Earth, 170, 120, 70),
    kw("mud", Earth, 130, 100, 70),
    kw("brown", Earth, 170, 110, 65),
    kw("dust", Earth, 190, 140, 80),
    kw("drought", Earth, 200, 130, 65),
    kw("smoke", Urban, 90, 90, 110),
    kw("ash", Urban, 110, 110, 120),
    kw("pollution", Urban, 100, 90, 100),
    kw("city", Urban, 110, 110, 130),
    kw("concrete", Urban, 120, 120, 135),
    kw("gray", Urban, 110, 110, 120),
    kw("smog", Urban, 130, 120, 110),
    kw("purple", Twilight, 140, 70, 180),
    kw("toxic", Twilight, 120, 90, 160),
    kw("poison", Twilight, 130, 80, 170),
    kw("dusk", Twilight, 150, 90, 190),
    kw("bleach", Pale, 140, 140, 160),
    kw("pale", Pale, 130, 130, 150),
    kw("ghost", Pale, 120, 120, 140),
    kw("yellow", Warning, 210, 200, 70),
    kw("decay", Warning, 180, 170, 80),
    kw("rot", Warning, 170, 160, 70),
];

/// Keywords occurring anywhere in `lowered`, in table order.
///
/// Matching is by substring, so "sun" also fires on "sunday".
pub fn matching(lowered: &str) -> impl Iterator<Item = &'static Keyword> + '_ {
    KEYWORDS.iter().filter(move |k| lowered.contains(k.word))
}

//! Keyword-based urgency scoring.
//!
//! Urgent words speed the background up, calm words slow it down. Each word
//! counts once no matter how often it appears, and matching is by substring.

const URGENT: &[&str] = &[
    "fire",
    "burn",
    "rage",
    "violent",
    "crash",
    "storm",
    "explosion",
    "shatter",
    "collapse",
    "dying",
    "desperate",
    "frantically",
    "panic",
    "destroy",
];

const CALM: &[&str] = &[
    "gentle", "slow", "peaceful", "quiet", "whisper", "drift", "lull", "fade", "soft", "still",
    "calm",
];

const URGENT_WEIGHT: f32 = 1.0;
const CALM_WEIGHT: f32 = 0.5;

/// Discrete movement speed the score maps onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedBand {
    Slow,
    Moderate,
    Fast,
    Fastest,
}

impl SpeedBand {
    /// Band for a raw urgency score. Thresholds are strict.
    pub fn from_score(score: f32) -> Self {
        if score > 2.0 {
            Self::Fastest
        } else if score > 1.0 {
            Self::Fast
        } else if score > 0.0 {
            Self::Moderate
        } else {
            Self::Slow
        }
    }

    /// Phase advance per tick.
    pub fn speed(&self) -> f64 {
        match self {
            Self::Slow => 0.005,
            Self::Moderate => 0.012,
            Self::Fast => 0.018,
            Self::Fastest => 0.025,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Moderate => "moderate",
            Self::Fast => "fast",
            Self::Fastest => "fastest",
        }
    }
}

/// Result of scoring a sentence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Urgency {
    pub score: f32,
    pub band: SpeedBand,
}

/// Score `text` against the urgent and calm lexicons.
pub fn analyze_urgency(text: &str) -> Urgency {
    let lowered = text.to_lowercase();
    let urgent = URGENT.iter().filter(|w| lowered.contains(*w)).count() as f32;
    let calm = CALM.iter().filter(|w| lowered.contains(*w)).count() as f32;

    let score = urgent * URGENT_WEIGHT - calm * CALM_WEIGHT;
    Urgency {
        score,
        band: SpeedBand::from_score(score),
    }
}

/// Movement speed for `text`.
pub fn sentiment_speed(text: &str) -> f64 {
    analyze_urgency(text).band.speed()
}

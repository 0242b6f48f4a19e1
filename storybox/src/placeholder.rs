//! "Waiting for story..." typing effect shown until the first line arrives.

use std::time::Duration;

pub const PLACEHOLDER_TEXT: &str = "Waiting for story...";
/// Typing speed, one character per step.
pub const SECS_PER_CHAR: f64 = 0.1;
/// Full caret blink cycle; the caret shows during the first half.
pub const CARET_PERIOD_SECS: f64 = 0.75;

/// What the placeholder shows at a given moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaceholderFrame {
    pub visible: &'static str,
    pub caret: bool,
}

#[derive(Debug, Default)]
pub struct TypingPlaceholder {
    dismissed: bool,
}

impl TypingPlaceholder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Frame `elapsed` after the effect started, or `None` once dismissed.
    pub fn frame_at(&self, elapsed: Duration) -> Option<PlaceholderFrame> {
        if self.dismissed {
            return None;
        }
        let secs = elapsed.as_secs_f64();
        let total = PLACEHOLDER_TEXT.chars().count();
        let typed = ((secs / SECS_PER_CHAR).floor() as usize).min(total);
        let end = PLACEHOLDER_TEXT
            .char_indices()
            .nth(typed)
            .map_or(PLACEHOLDER_TEXT.len(), |(i, _)| i);

        Some(PlaceholderFrame {
            visible: &PLACEHOLDER_TEXT[..end],
            caret: secs % CARET_PERIOD_SECS < CARET_PERIOD_SECS / 2.0,
        })
    }
}

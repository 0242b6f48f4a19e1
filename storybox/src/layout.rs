//! Scroll heuristics for the chip strip and the transcript.

use crate::config::TranscriptConfig;

/// Horizontal scroll that centres a chip inside the panel.
pub fn chip_scroll_left(chip_offset_left: f32, chip_width: f32, panel_width: f32) -> f32 {
    chip_offset_left - panel_width / 2.0 + chip_width / 2.0
}

/// Vertical scroll that leaves the active line a tenth of the viewport above
/// the bottom of its container. Never negative.
pub fn line_scroll_top(
    line_offset_top: f32,
    line_height: f32,
    container_height: f32,
    viewport_height: f32,
) -> f32 {
    (line_offset_top - container_height + viewport_height * 0.1 + line_height).max(0.0)
}

/// Positions derived from the configured transcript geometry.
#[derive(Clone, Debug)]
pub struct ScrollLayout {
    geometry: TranscriptConfig,
}

impl ScrollLayout {
    pub fn new(geometry: TranscriptConfig) -> Self {
        Self { geometry }
    }

    /// Left edge of chip `index` when chips are laid out at a fixed pitch.
    pub fn chip_offset_left(&self, index: usize) -> f32 {
        index as f32 * (self.geometry.chip_width + self.geometry.chip_gap)
    }

    pub fn line_offset_top(&self, index: u64) -> f32 {
        index as f32 * self.geometry.line_height
    }

    /// Panel scroll for the active chip.
    pub fn chip_scroll(&self, index: usize) -> f32 {
        chip_scroll_left(
            self.chip_offset_left(index),
            self.geometry.chip_width,
            self.geometry.panel_width,
        )
    }

    /// Container scroll for the active transcript line.
    pub fn line_scroll(&self, index: u64) -> f32 {
        line_scroll_top(
            self.line_offset_top(index),
            self.geometry.line_height,
            self.geometry.container_height,
            self.geometry.viewport_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_is_centred() {
        assert_eq!(chip_scroll_left(600.0, 120.0, 960.0), 180.0);
        // Chips near the start ask for a negative scroll; the panel clamps it.
        assert_eq!(chip_scroll_left(0.0, 120.0, 960.0), -420.0);
    }

    #[test]
    fn line_scroll_is_clamped_at_zero() {
        assert_eq!(line_scroll_top(0.0, 48.0, 600.0, 800.0), 0.0);
        // 960 - 600 + 80 + 48
        assert_eq!(line_scroll_top(960.0, 48.0, 600.0, 800.0), 488.0);
    }

    #[test]
    fn layout_uses_configured_geometry() {
        let layout = ScrollLayout::new(TranscriptConfig::default());
        assert_eq!(layout.chip_offset_left(3), 396.0);
        assert_eq!(layout.chip_scroll(3), 396.0 - 480.0 + 60.0);
        assert_eq!(layout.line_scroll(20), 960.0 - 600.0 + 80.0 + 48.0);
        assert_eq!(layout.line_scroll(1), 0.0);
    }
}

//! Watch session
//!
//! Everything driven by the feed: the background frame loop, the transcript,
//! the landscape strip and the typing placeholder. Each poll result goes
//! through [`Session::apply`]; the frame timer calls [`Session::step`].

use std::time::Instant;

use storybox_glow::{FrameLoop, JitterSource, LoopHandle, Surface};
use tracing::{debug, info, warn};

use crate::config::StoryboxConfig;
use crate::entry::StoryEntry;
use crate::landscapes::LandscapeStrip;
use crate::layout::ScrollLayout;
use crate::placeholder::{PlaceholderFrame, TypingPlaceholder};
use crate::transcript::{Transcript, MAX_INDEX};

/// What one poll result changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Update {
    /// The feed moved to a different index.
    pub new_line: bool,
    /// The background was retargeted.
    pub background: bool,
    pub chip: Option<usize>,
}

pub struct Session<S, J = rand::rngs::StdRng> {
    frames: FrameLoop<S, J>,
    transcript: Transcript,
    strip: LandscapeStrip,
    placeholder: TypingPlaceholder,
    layout: ScrollLayout,
    started: Instant,
}

impl<S: Surface, J: JitterSource> Session<S, J> {
    pub fn new(frames: FrameLoop<S, J>, config: &StoryboxConfig) -> Self {
        Self {
            frames,
            transcript: Transcript::new(),
            strip: LandscapeStrip::new(config.landscapes.iter().cloned()),
            placeholder: TypingPlaceholder::new(),
            layout: ScrollLayout::new(config.transcript.clone()),
            started: Instant::now(),
        }
    }

    /// Apply one successfully polled entry.
    ///
    /// The landscape highlight follows every poll; the transcript and the
    /// background only react when the index changes.
    pub fn apply(&mut self, entry: &StoryEntry) -> Update {
        let chip = self.strip.highlight(&entry.landscape);
        if let Some(i) = chip {
            debug!(chip = i, left = self.layout.chip_scroll(i), "chip scroll");
        }

        if entry.index > MAX_INDEX {
            warn!(index = entry.index, max = MAX_INDEX, "Feed index out of range; entry ignored");
        }
        if !self.transcript.observe(entry) {
            return Update {
                new_line: false,
                background: false,
                chip,
            };
        }

        if !self.placeholder.is_dismissed() {
            self.placeholder.dismiss();
            info!("First story line arrived (index {})", entry.index);
        }
        debug!(
            index = entry.index,
            top = self.layout.line_scroll(entry.index),
            "line scroll"
        );

        let background = match entry.base_color() {
            Some(base) => {
                self.frames.animator_mut().on_new_entry(base, &entry.text);
                true
            }
            None => {
                warn!(index = entry.index, rgb = ?entry.rgb, "No usable rgb triple; background unchanged");
                false
            }
        };

        Update {
            new_line: true,
            background,
            chip,
        }
    }

    /// Render one background frame. `false` once stopped.
    pub fn step(&mut self) -> bool {
        self.frames.step()
    }

    pub fn handle(&self) -> LoopHandle {
        self.frames.handle()
    }

    pub fn frames(&self) -> &FrameLoop<S, J> {
        &self.frames
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn strip(&self) -> &LandscapeStrip {
        &self.strip
    }

    pub fn placeholder_frame(&self) -> Option<PlaceholderFrame> {
        self.placeholder.frame_at(self.started.elapsed())
    }

    /// Text view: chip strip, then the transcript rows.
    pub fn render_text(&self) -> Vec<String> {
        let mut out = vec![self.strip.render()];
        out.extend(self.transcript.render_lines());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use storybox_glow::{BackgroundAnimator, Color, ColorExtractor, RecordingSurface};

    fn session() -> Session<RecordingSurface, StdRng> {
        let animator =
            BackgroundAnimator::with_extractor(ColorExtractor::with_jitter(StdRng::seed_from_u64(5)));
        let frames = FrameLoop::new(animator, RecordingSurface::new(320, 200));
        Session::new(frames, &StoryboxConfig::default())
    }

    fn entry(index: u64, text: &str, landscape: &str) -> StoryEntry {
        StoryEntry::new(index, text, landscape, [30, 70, 120])
    }

    #[test]
    fn first_line_dismisses_placeholder_and_retargets() {
        let mut s = session();
        assert!(s.placeholder_frame().is_some());

        let update = s.apply(&entry(0, "The ocean swells with fever.", "ocean"));
        assert_eq!(
            update,
            Update {
                new_line: true,
                background: true,
                chip: Some(0)
            }
        );
        assert!(s.placeholder_frame().is_none());
        let state = s.frames().animator().state();
        assert_eq!(state.target_palette[0], Color::new(30.0, 70.0, 120.0));
    }

    #[test]
    fn repeated_poll_only_refreshes_the_chip() {
        let mut s = session();
        s.apply(&entry(0, "The ocean swells with fever.", "ocean"));
        let target = s.frames().animator().state().target_palette.clone();

        let update = s.apply(&entry(0, "The ocean swells with fever.", "city"));
        assert!(!update.new_line);
        assert!(!update.background);
        assert_eq!(s.strip().active(), Some("city"));
        assert_eq!(s.frames().animator().state().target_palette, target);
    }

    #[test]
    fn bad_rgb_still_updates_transcript() {
        let mut s = session();
        let mut e = entry(0, "A grey morning settles over the city.", "city");
        e.rgb = Some(vec![json!(1), json!(2)]);

        let update = s.apply(&e);
        assert!(update.new_line);
        assert!(!update.background);
        assert_eq!(s.transcript().line(0), Some("A grey morning settles over the city."));
        assert_eq!(s.frames().animator().state().movement_speed, 0.005);
    }

    #[test]
    fn render_text_lists_strip_then_lines() {
        let mut s = session();
        s.apply(&entry(0, "First line of the tale.", "ocean"));
        s.apply(&entry(1, "Second line of the tale.", "forest"));
        let text = s.render_text();
        assert!(text[0].contains("[forest]"));
        assert_eq!(text[1], "  First line of the tale.");
        assert_eq!(text[2], "> Second line of the tale.");
    }

    #[test]
    fn huge_index_leaves_session_untouched() {
        let mut s = session();
        s.apply(&entry(0, "The ocean swells with fever.", "ocean"));
        let target = s.frames().animator().state().target_palette.clone();

        let update = s.apply(&entry(u64::MAX, "The city burns.", "city"));
        assert!(!update.new_line);
        assert!(!update.background);
        assert_eq!(update.chip, Some(2));
        assert_eq!(s.transcript().current_index(), Some(0));
        assert_eq!(s.transcript().row_count(), 1);
        assert_eq!(s.render_text().len(), 2);
        assert_eq!(s.frames().animator().state().target_palette, target);
    }

    #[test]
    fn stop_handle_ends_stepping() {
        let mut s = session();
        assert!(s.step());
        s.handle().stop();
        assert!(!s.step());
    }
}

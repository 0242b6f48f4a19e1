//! Render loop
//!
//! The host decides when a frame happens; [`FrameLoop::step`] renders exactly
//! one. A [`LoopHandle`] can be cloned out and used from anywhere to stop the
//! loop, after which `step` refuses to render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::animator::BackgroundAnimator;
use crate::extract::JitterSource;
use crate::surface::Surface;

/// Cancellation handle for a [`FrameLoop`].
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    stopped: Arc<AtomicBool>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Frame timing, reported once per `report_every` frames.
struct FrameClock {
    window_start: instant::Instant,
    window_frames: u64,
    report_every: u64,
}

impl FrameClock {
    fn new(report_every: u64) -> Self {
        let now = instant::Instant::now();
        Self {
            window_start: now,
            window_frames: 0,
            report_every,
        }
    }

    fn tick(&mut self) {
        let now = instant::Instant::now();
        self.window_frames += 1;

        if self.report_every > 0 && self.window_frames >= self.report_every {
            let secs = now.duration_since(self.window_start).as_secs_f32();
            if secs > 0.0 {
                debug!(fps = self.window_frames as f32 / secs, "frame rate");
            }
            self.window_start = now;
            self.window_frames = 0;
        }
    }
}

/// Owns the animator and its surface; renders one frame per `step`.
pub struct FrameLoop<S, J = rand::rngs::StdRng> {
    animator: BackgroundAnimator<J>,
    surface: S,
    handle: LoopHandle,
    frames: u64,
    clock: FrameClock,
}

impl<S: Surface, J: JitterSource> FrameLoop<S, J> {
    pub fn new(animator: BackgroundAnimator<J>, surface: S) -> Self {
        let (w, h) = surface.size();
        info!("Frame loop ready: {}x{}", w, h);
        Self {
            animator,
            surface,
            handle: LoopHandle::default(),
            frames: 0,
            clock: FrameClock::new(600),
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_stopped()
    }

    /// Render one frame. Returns `false` once the loop has been stopped.
    pub fn step(&mut self) -> bool {
        if self.handle.is_stopped() {
            return false;
        }
        self.animator.render(&mut self.surface);
        self.frames += 1;
        self.clock.tick();
        true
    }

    /// Render up to `ticks` frames, stopping early if cancelled.
    pub fn run_for(&mut self, ticks: u32) -> u32 {
        let mut rendered = 0;
        for _ in 0..ticks {
            if !self.step() {
                break;
            }
            rendered += 1;
        }
        rendered
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animator(&self) -> &BackgroundAnimator<J> {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut BackgroundAnimator<J> {
        &mut self.animator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

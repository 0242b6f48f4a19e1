//! Background animator
//!
//! Holds the one long-lived animation record. New sentences replace the
//! target palette and movement speed; every tick eases the visible palette a
//! fixed fraction of the way toward the target, advances the phases and
//! repaints the gradient layers.

use std::f32::consts::TAU;

use glam::Vec2;
use tracing::{debug, info};

use crate::color::{default_palette, Color, Palette};
use crate::extract::{preview, ColorExtractor, JitterSource};
use crate::sentiment::{analyze_urgency, SpeedBand};
use crate::surface::{GradientStop, RadialLayer, Surface};

/// Fraction of the remaining distance covered per tick.
pub const BLEND_FACTOR: f32 = 0.015;
/// Rotation advances at this fraction of the movement speed.
pub const ROTATION_RATIO: f64 = 0.3;
/// Orbit radius as a fraction of the smaller surface dimension.
pub const ORBIT_RATIO: f32 = 0.3;
/// Amplitude of the per-layer wobble, in pixels.
pub const WOBBLE: f32 = 80.0;
/// Gradient reach as a fraction of surface width.
pub const REACH_RATIO: f32 = 0.7;

const STOP_ALPHAS: [f32; 3] = [0.7, 0.5, 0.3];

/// Mutable animation record.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    pub current_palette: Palette,
    pub target_palette: Palette,
    pub movement_phase: f64,
    pub rotation_phase: f64,
    pub movement_speed: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        let palette = default_palette();
        Self {
            current_palette: palette.clone(),
            target_palette: palette,
            movement_phase: 0.0,
            rotation_phase: 0.0,
            movement_speed: SpeedBand::Slow.speed(),
        }
    }
}

impl AnimationState {
    /// Target colour paired with `current_palette[index]`.
    ///
    /// Falls back to the first target entry when the target is shorter.
    pub fn target_for(&self, index: usize) -> Option<Color> {
        self.target_palette
            .get(index)
            .or_else(|| self.target_palette.first())
            .copied()
    }

    /// Advance one tick in place: ease colours and move the phases.
    pub fn tick(&mut self) {
        for i in 0..self.current_palette.len() {
            if let Some(target) = self.target_for(i) {
                self.current_palette[i] = self.current_palette[i].lerp(target, BLEND_FACTOR);
            }
        }
        self.movement_phase += self.movement_speed;
        self.rotation_phase += self.movement_speed * ROTATION_RATIO;
    }

    /// State after `ticks` further ticks, leaving `self` untouched.
    pub fn stepped(&self, ticks: u32) -> Self {
        let mut next = self.clone();
        for _ in 0..ticks {
            next.tick();
        }
        next
    }

    /// Gradient layers for a `width` x `height` surface, in paint order.
    pub fn layers(&self, width: u32, height: u32) -> Vec<RadialLayer> {
        let n = self.current_palette.len();
        if n == 0 {
            return Vec::new();
        }

        let (w, h) = (width as f32, height as f32);
        let center = Vec2::new(w / 2.0, h / 2.0);
        let orbit = w.min(h) * ORBIT_RATIO;
        let movement = self.movement_phase as f32;
        let rotation = self.rotation_phase as f32;

        (0..n)
            .map(|i| {
                let fi = i as f32;
                let angle = rotation + fi * TAU / n as f32;
                let offset = Vec2::new(
                    angle.cos() * orbit + (movement + fi).sin() * WOBBLE,
                    angle.sin() * orbit + (movement * 0.7 + fi).cos() * WOBBLE,
                );

                let here = self.current_palette[i];
                let next = self.current_palette[(i + 1) % n];
                RadialLayer {
                    center: center + offset,
                    radius: w * REACH_RATIO,
                    stops: [
                        GradientStop::new(0.0, here, STOP_ALPHAS[0]),
                        GradientStop::new(0.5, here.average(next), STOP_ALPHAS[1]),
                        GradientStop::new(1.0, next, STOP_ALPHAS[2]),
                    ],
                }
            })
            .collect()
    }
}

/// Drives [`AnimationState`] from story entries and paints it each tick.
pub struct BackgroundAnimator<J = rand::rngs::StdRng> {
    state: AnimationState,
    extractor: ColorExtractor<J>,
}

impl BackgroundAnimator<rand::rngs::StdRng> {
    pub fn new() -> Self {
        Self::with_extractor(ColorExtractor::from_entropy())
    }
}

impl Default for BackgroundAnimator<rand::rngs::StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: JitterSource> BackgroundAnimator<J> {
    pub fn with_extractor(extractor: ColorExtractor<J>) -> Self {
        Self {
            state: AnimationState::default(),
            extractor,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Retarget the animation for a new sentence.
    ///
    /// Speed changes take effect immediately; colours blend over the
    /// following ticks.
    pub fn on_new_entry(&mut self, base: Color, text: &str) {
        let palette = self.extractor.extract_colors(text, base);
        let urgency = analyze_urgency(text);

        info!(
            colors = palette.len(),
            speed = urgency.band.label(),
            "Extracted {} colors from: \"{}\"",
            palette.len(),
            preview(text)
        );
        debug!(score = urgency.score, ?palette, "new background target");

        self.state.target_palette = palette;
        self.state.movement_speed = urgency.band.speed();
    }

    /// One render tick: ease, advance, clear, paint every layer.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.state.tick();

        let (w, h) = surface.size();
        surface.clear();
        for layer in self.state.layers(w, h) {
            surface.fill_radial(&layer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCommand};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> BackgroundAnimator<StdRng> {
        BackgroundAnimator::with_extractor(ColorExtractor::with_jitter(StdRng::seed_from_u64(3)))
    }

    #[test]
    fn starts_from_default_palette() {
        let a = seeded();
        assert_eq!(a.state().current_palette, default_palette());
        assert_eq!(a.state().movement_speed, 0.005);
    }

    #[test]
    fn new_entry_replaces_target_and_speed_only() {
        let mut a = seeded();
        let before = a.state().clone();
        a.on_new_entry(Color::new(120.0, 40.0, 20.0), "fire, burn, storm");

        let s = a.state();
        assert_eq!(s.movement_speed, 0.025);
        assert_eq!(s.target_palette[0].channels(), [120.0, 40.0, 20.0]);
        assert_eq!(s.current_palette, before.current_palette);
        assert_eq!(s.movement_phase, before.movement_phase);
        assert_eq!(s.rotation_phase, before.rotation_phase);
    }

    #[test]
    fn tick_advances_phases() {
        let mut s = AnimationState {
            movement_speed: 0.01,
            ..AnimationState::default()
        };
        s.tick();
        s.tick();
        assert!((s.movement_phase - 0.02).abs() < 1e-12);
        assert!((s.rotation_phase - 0.006).abs() < 1e-12);
    }

    #[test]
    fn tick_blends_fixed_fraction() {
        let mut s = AnimationState {
            current_palette: vec![Color::new(0.0, 0.0, 0.0)],
            target_palette: vec![Color::new(200.0, 100.0, 0.0)],
            ..AnimationState::default()
        };
        s.tick();
        let [r, g, b] = s.current_palette[0].channels();
        assert!((r - 3.0).abs() < 1e-4);
        assert!((g - 1.5).abs() < 1e-4);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn shorter_target_falls_back_to_first() {
        let s = AnimationState {
            current_palette: vec![Color::new(0.0, 0.0, 0.0); 4],
            target_palette: vec![Color::new(10.0, 10.0, 10.0), Color::new(99.0, 99.0, 99.0)],
            ..AnimationState::default()
        };
        assert_eq!(s.target_for(1), Some(Color::new(99.0, 99.0, 99.0)));
        assert_eq!(s.target_for(3), Some(Color::new(10.0, 10.0, 10.0)));
        let next = s.stepped(1);
        assert_eq!(next.current_palette[3], next.current_palette[0]);
    }

    #[test]
    fn stepped_leaves_original_untouched() {
        let s = AnimationState::default();
        let later = s.stepped(10);
        assert_eq!(s.movement_phase, 0.0);
        assert!((later.movement_phase - 0.05).abs() < 1e-9);
    }

    #[test]
    fn layers_follow_palette_order() {
        let s = AnimationState::default();
        let layers = s.layers(800, 600);
        assert_eq!(layers.len(), 4);
        for (i, layer) in layers.iter().enumerate() {
            let next = s.current_palette[(i + 1) % 4];
            assert_eq!(layer.stops[0].color, s.current_palette[i]);
            assert_eq!(layer.stops[2].color, next);
            assert_eq!(layer.stops[1].color, s.current_palette[i].average(next));
            assert_eq!(layer.radius, 800.0 * REACH_RATIO);
            assert_eq!(
                [layer.stops[0].alpha, layer.stops[1].alpha, layer.stops[2].alpha],
                STOP_ALPHAS
            );
        }
    }

    #[test]
    fn first_layer_geometry_at_rest() {
        let s = AnimationState::default();
        let layer = &s.layers(1000, 500)[0];
        // angle 0: orbit along +x, wobble is sin(0)=0 on x and cos(0)=1 on y.
        assert!((layer.center.x - (500.0 + 150.0)).abs() < 1e-3);
        assert!((layer.center.y - (250.0 + 80.0)).abs() < 1e-3);
    }

    #[test]
    fn render_clears_then_paints_each_layer() {
        let mut a = seeded();
        let mut surface = RecordingSurface::new(320, 200);
        a.render(&mut surface);
        let cmds = surface.commands();
        assert_eq!(cmds[0], SurfaceCommand::Clear);
        assert_eq!(surface.layers().count(), a.state().current_palette.len());
    }

    #[test]
    fn render_reads_size_every_tick() {
        let mut a = seeded();
        let mut surface = RecordingSurface::new(100, 100);
        a.render(&mut surface);
        surface.resize(400, 100);
        a.render(&mut surface);
        assert_eq!(surface.layers().next().map(|l| l.radius), Some(400.0 * REACH_RATIO));
    }
}

//! Drawing surfaces
//!
//! The animator only needs three things from whatever it paints on: the
//! current size, a clear, and a full-surface radial gradient fill. Frames are
//! built as a list of [`SurfaceCommand`]s so they can be inspected without a
//! rasteriser.

use glam::Vec2;

use crate::color::Color;

/// A colour stop inside a radial gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, `0.0..=1.0`.
    pub offset: f32,
    pub color: Color,
    pub alpha: f32,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color, alpha: f32) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }
}

/// One gradient layer, painted over the whole surface.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialLayer {
    pub center: Vec2,
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

/// Commands issued while painting a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCommand {
    Clear,
    Radial(RadialLayer),
}

/// Something the background can be painted onto.
pub trait Surface {
    /// Current backing size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Composite a radial gradient over the full surface.
    fn fill_radial(&mut self, layer: &RadialLayer);
}

/// Surface that keeps the commands of the most recent frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Layers painted since the last clear.
    pub fn layers(&self) -> impl Iterator<Item = &RadialLayer> {
        self.commands.iter().filter_map(|c| match c {
            SurfaceCommand::Radial(layer) => Some(layer),
            SurfaceCommand::Clear => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(SurfaceCommand::Clear);
    }

    fn fill_radial(&mut self, layer: &RadialLayer) {
        self.commands.push(SurfaceCommand::Radial(layer.clone()));
    }
}

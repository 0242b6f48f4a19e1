//! Software surface backed by a tiny-skia pixmap.

use std::path::Path;

use thiserror::Error;
use tiny_skia::{Paint, Pixmap, Point, RadialGradient, Rect, SpreadMode, Transform};
use tracing::info;

use crate::surface::{RadialLayer, Surface};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Png(String),
}

pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        info!("Pixmap surface: {}x{}", width, height);
        Ok(Self { pixmap })
    }

    /// Reallocate the backing pixmap. No-op when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == self.pixmap.width() && height == self.pixmap.height() {
            return Ok(());
        }
        self.pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap.encode_png().map_err(|e| SurfaceError::Png(e.to_string()))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        self.pixmap.save_png(path).map_err(|e| SurfaceError::Png(e.to_string()))
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_radial(&mut self, layer: &RadialLayer) {
        let stops = layer
            .stops
            .iter()
            .map(|s| tiny_skia::GradientStop::new(s.offset, s.color.to_skia(s.alpha)))
            .collect();
        let center = Point::from_xy(layer.center.x, layer.center.y);

        // Degenerate radii produce no shader; skip the layer.
        let Some(shader) = RadialGradient::new(
            center,
            center,
            layer.radius,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = false;

        let (w, h) = self.size();
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}

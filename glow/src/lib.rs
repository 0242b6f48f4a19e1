//! Storybox glow
//!
//! Turns narrated sentences into a slowly drifting background. A sentence and
//! its base colour become a palette (keyword colours, analogous fallbacks,
//! jittered padding) and a movement speed (urgent vs calm vocabulary). The
//! animator eases toward that palette tick by tick and paints it as rotating,
//! overlapping radial gradients.

pub mod animator;
pub mod color;
pub mod extract;
pub mod frame_loop;
pub mod keywords;
pub mod pixmap;
pub mod sentiment;
pub mod surface;

pub use animator::{AnimationState, BackgroundAnimator};
pub use color::{Color, Palette};
pub use extract::{extract_colors, ColorExtractor, JitterSource};
pub use frame_loop::{FrameLoop, LoopHandle};
pub use pixmap::{PixmapSurface, SurfaceError};
pub use sentiment::{analyze_urgency, sentiment_speed, SpeedBand, Urgency};
pub use surface::{GradientStop, RadialLayer, RecordingSurface, Surface, SurfaceCommand};

//! GRACIE Render - software compositor for the canvas animators
//!
//! A premultiplied RGBA raster with radial gradients and three blend modes,
//! plus the per-variant painter that turns an entity pool into a frame.

pub mod compositor;
pub mod gradient;
pub mod surface;

pub use compositor::{Compositor, HoverState};
pub use gradient::{BlendMode, GradientStop, RadialGradient};
pub use surface::Surface;

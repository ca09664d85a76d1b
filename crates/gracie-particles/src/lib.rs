//! GRACIE Particles - entity pool and frame stepper for the decorative animators
//!
//! One engine drives all three canvas layers:
//! - Ambient scroll-parallax field with hero halos and trails
//! - Fireflies that pulse and bounce off the surface edges
//! - Spotlight lobes orbiting the pointer
//!
//! Everything here is pure state; painting lives in `gracie-render`.

pub mod config;
pub mod curves;
pub mod entity;
pub mod palette;
pub mod rand;
pub mod stepper;

pub use config::{
    AnimatorConfig, AnimatorVariant, BoundaryPolicy, SpotlightConfig, SpotlightLobe, MAX_ENTITIES,
};
pub use entity::{Entity, EntityPool, LobeOrbit, Trail};
pub use palette::{ColorScheme, Palette};
pub use rand::ParticleRng;
pub use stepper::{FrameStepper, StepInput, REFERENCE_FRAME};

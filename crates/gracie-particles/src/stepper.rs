//! Per-tick kinematics: integration, parallax, boundary policy, trails, pulsation

use crate::config::{AnimatorConfig, AnimatorVariant, BoundaryPolicy};
use crate::curves::pulse_factor;
use crate::entity::{Entity, EntityPool};
use gracie_core::Vec2;

/// Duration of one reference tick; velocities are expressed per reference tick
pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;

/// External signals and timing for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// Raw scroll offset change since the previous tick
    pub scroll_delta: f32,
    /// Last known pointer position in surface pixels
    pub pointer: Vec2,
    /// Seconds since the previous tick
    pub dt: f32,
    /// Seconds since mount, shared by the whole pool
    pub elapsed: f32,
}

impl StepInput {
    /// A reference-length tick with no external movement
    pub fn reference(elapsed: f32, pointer: Vec2) -> Self {
        Self {
            scroll_delta: 0.0,
            pointer,
            dt: REFERENCE_FRAME,
            elapsed,
        }
    }
}

/// Advances an entity pool by one tick under a fixed configuration
#[derive(Debug, Clone)]
pub struct FrameStepper {
    variant: AnimatorVariant,
    boundary: BoundaryPolicy,
    parallax_enabled: bool,
    scroll_gain: f32,
    phase_origin: f32,
    phase_rate: f32,
}

impl FrameStepper {
    pub fn new(config: &AnimatorConfig) -> Self {
        Self {
            variant: config.variant,
            boundary: config.boundary_policy,
            parallax_enabled: config.parallax_enabled,
            scroll_gain: config.scroll_gain,
            phase_origin: config.spotlight.phase_origin,
            phase_rate: config.spotlight.phase_rate,
        }
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Spotlight phase at a given elapsed time
    pub fn spotlight_phase(&self, elapsed: f32) -> f32 {
        self.phase_origin + elapsed * self.phase_rate
    }

    pub fn advance(&self, pool: &mut EntityPool, input: &StepInput) {
        let width = pool.width();
        let height = pool.height();
        let scale = input.dt.max(0.0) / REFERENCE_FRAME;

        match self.variant {
            AnimatorVariant::Spotlight => {
                let t = self.spotlight_phase(input.elapsed);
                for entity in pool.entities_mut() {
                    self.step_lobe(entity, input.pointer, t, width, height);
                }
            }
            AnimatorVariant::Ambient | AnimatorVariant::Firefly => {
                let parallax_delta = if self.parallax_enabled {
                    input.scroll_delta * self.scroll_gain
                } else {
                    0.0
                };
                for entity in pool.entities_mut() {
                    self.step_point(entity, scale, parallax_delta, input.elapsed, width, height);
                }
            }
        }
    }

    fn step_point(
        &self,
        entity: &mut Entity,
        scale: f32,
        parallax_delta: f32,
        elapsed: f32,
        width: f32,
        height: f32,
    ) {
        entity.position += entity.velocity * scale;
        entity.position.y += parallax_delta * entity.parallax_factor;

        match self.boundary {
            BoundaryPolicy::Wrap => {
                entity.position.x = wrap_axis(entity.position.x, width);
                entity.position.y = wrap_axis(entity.position.y, height);
            }
            BoundaryPolicy::Bounce => {
                bounce_axis(&mut entity.position.x, &mut entity.velocity.x, width);
                bounce_axis(&mut entity.position.y, &mut entity.velocity.y, height);
            }
        }

        entity.opacity = if self.variant == AnimatorVariant::Firefly {
            entity.base_opacity * pulse_factor(elapsed, entity.pulse_speed, entity.pulse_offset)
        } else {
            entity.base_opacity
        };

        entity.trail.push(entity.position);
    }

    fn step_lobe(&self, entity: &mut Entity, target: Vec2, t: f32, width: f32, height: f32) {
        let Some(orbit) = entity.orbit.as_mut() else {
            return;
        };
        let lobe = orbit.lobe;
        let mut position = Vec2::new(
            target.x + (t * lobe.offset_frequency[0]).sin() * lobe.offset_amplitude[0],
            target.y + (t * lobe.offset_frequency[1]).cos() * lobe.offset_amplitude[1],
        );
        position.x = position.x.clamp(0.0, width);
        position.y = position.y.clamp(0.0, height);

        let swing = (t * lobe.radius_frequency).sin() * lobe.radius_amplitude;
        orbit.radius = (lobe.base_radius + swing).max(0.0);
        entity.position = position;
        entity.opacity = entity.base_opacity;
        entity.trail.push(position);
    }
}

/// Wrap a coordinate into `[0, extent)`, however far it overshot
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a coordinate into `[0, extent]` and point its velocity back inward
pub fn bounce_axis(value: &mut f32, velocity: &mut f32, extent: f32) {
    let extent = extent.max(0.0);
    if *value < 0.0 {
        *value = 0.0;
        *velocity = velocity.abs();
    } else if *value > extent {
        *value = extent;
        *velocity = -velocity.abs();
    }
}

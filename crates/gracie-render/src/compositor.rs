//! Paints an entity pool onto a surface, one variant-specific pass per frame

use crate::gradient::{BlendMode, RadialGradient};
use crate::surface::Surface;
use gracie_core::{Color, Vec2};
use gracie_particles::{AnimatorConfig, AnimatorVariant, Entity, EntityPool};

/// Whether the pointer is currently over the animator's surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

impl HoverState {
    pub fn from_bool(hovering: bool) -> Self {
        if hovering {
            HoverState::Hovering
        } else {
            HoverState::Idle
        }
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self, HoverState::Hovering)
    }
}

/// Stateless painter for all three animator variants
pub struct Compositor;

impl Compositor {
    /// How a variant's finished layer is stacked onto the layers behind it.
    ///
    /// Glowing variants brighten what they overlap; fireflies paint over so
    /// the black hover tint stays visible.
    pub fn layer_blend(variant: AnimatorVariant) -> BlendMode {
        match variant {
            AnimatorVariant::Ambient | AnimatorVariant::Spotlight => BlendMode::Screen,
            AnimatorVariant::Firefly => BlendMode::SourceOver,
        }
    }

    /// Clear the surface, then draw every entity of the pool
    pub fn render(
        surface: &mut Surface,
        pool: &EntityPool,
        config: &AnimatorConfig,
        hover: HoverState,
    ) {
        surface.clear();
        if surface.is_empty() {
            return;
        }
        match config.variant {
            AnimatorVariant::Ambient => {
                let jump = surface.width().max(surface.height()) as f32 / 2.0;
                for entity in pool.iter() {
                    draw_trail(surface, entity, config, jump);
                    draw_ambient(surface, entity, config);
                }
            }
            AnimatorVariant::Firefly => {
                let tint = if hover.is_hovering() {
                    config.hover_tint
                } else {
                    config.idle_tint
                };
                for entity in pool.iter() {
                    draw_firefly(surface, entity, config, tint);
                }
            }
            AnimatorVariant::Spotlight => {
                for entity in pool.iter() {
                    draw_lobe(surface, entity, config);
                }
            }
        }
    }
}

/// Strokes between consecutive trail points, fading toward the oldest.
/// Segments longer than `jump` straddle a wrap and are skipped.
fn draw_trail(surface: &mut Surface, entity: &Entity, config: &AnimatorConfig, jump: f32) {
    let len = entity.trail.len();
    if len < 2 {
        return;
    }
    let points: Vec<Vec2> = entity.trail.points().copied().collect();
    for (i, pair) in points.windows(2).enumerate() {
        if pair[0].distance(pair[1]) > jump {
            continue;
        }
        let ramp = (i + 1) as f32 / len as f32;
        let alpha = (ramp * entity.opacity * config.trail_alpha_gain).clamp(0.0, 1.0);
        let width = entity.size * ramp;
        surface.stroke_segment(
            pair[0],
            pair[1],
            width,
            entity.color.with_alpha(entity.color.a * alpha),
            BlendMode::SourceOver,
        );
    }
}

fn draw_ambient(surface: &mut Surface, entity: &Entity, config: &AnimatorConfig) {
    let alpha = (entity.opacity * entity.brightness).clamp(0.0, 1.0);
    let core = entity.color.with_alpha(entity.color.a * alpha);
    let glow = RadialGradient::new(entity.position, 0.0, entity.size * config.glow_multiplier)
        .with_stop(0.0, core)
        .with_stop(1.0, core.with_alpha(0.0));
    surface.fill_disc(entity.size, &glow, BlendMode::Additive);

    if entity.is_hero {
        surface.fill_circle(
            entity.position,
            entity.size * config.hero_halo_scale,
            Color::WHITE,
            BlendMode::SourceOver,
        );
    }
}

fn draw_firefly(surface: &mut Surface, entity: &Entity, config: &AnimatorConfig, tint: Color) {
    let a = entity.opacity.clamp(0.0, 1.0);
    let glow = RadialGradient::new(entity.position, 0.0, entity.size * config.glow_multiplier)
        .with_stop(0.0, tint.with_alpha(a))
        .with_stop(0.5, tint.with_alpha(a * 0.5))
        .with_stop(1.0, tint.with_alpha(0.0));
    surface.fill_disc(entity.size, &glow, BlendMode::SourceOver);
}

fn draw_lobe(surface: &mut Surface, entity: &Entity, config: &AnimatorConfig) {
    let Some(orbit) = entity.orbit else {
        return;
    };
    let spot = &config.spotlight;
    let a = entity.opacity;
    let gradient = RadialGradient::new(entity.position, spot.inner_radius, orbit.radius)
        .with_stop(0.0, spot.color.with_alpha(a))
        .with_stop(0.3, spot.color.with_alpha(a * spot.core_gain))
        .with_stop(0.6, spot.color.with_alpha(a * 0.01))
        .with_stop(1.0, spot.color.with_alpha(0.0));
    surface.fill_disc(orbit.radius, &gradient, BlendMode::Screen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gracie_particles::{ColorScheme, FrameStepper, ParticleRng, StepInput};

    fn alpha_at(surface: &Surface, p: Vec2) -> f32 {
        surface
            .pixel(p.x as u32, p.y as u32)
            .map(|px| px[3])
            .unwrap_or(0.0)
    }

    #[test]
    fn render_clears_previous_frame() {
        let config = AnimatorConfig::firefly();
        let empty = EntityPool::initialize(0, 32.0, 32.0, &config, &mut ParticleRng::new(1));
        let mut surface = Surface::new(32, 32);
        surface.fill_circle(Vec2::new(16.0, 16.0), 8.0, Color::WHITE, BlendMode::SourceOver);
        Compositor::render(&mut surface, &empty, &config, HoverState::Idle);
        assert!(surface.is_blank());
    }

    #[test]
    fn ambient_paints_each_entity() {
        let mut config = AnimatorConfig::ambient(ColorScheme::Green);
        config.hero_probability = 0.0;
        let pool = EntityPool::initialize(10, 64.0, 64.0, &config, &mut ParticleRng::new(12));
        let mut surface = Surface::new(64, 64);
        Compositor::render(&mut surface, &pool, &config, HoverState::Idle);
        for e in pool.iter() {
            assert!(alpha_at(&surface, e.position) > 0.0);
        }
    }

    #[test]
    fn overlapping_ambient_glows_add_up() {
        let mut config = AnimatorConfig::ambient(ColorScheme::Blue);
        config.hero_probability = 0.0;
        let stacked = |count: usize| {
            let mut pool =
                EntityPool::initialize(count, 40.0, 40.0, &config, &mut ParticleRng::new(5));
            for e in pool.entities_mut() {
                e.position = Vec2::new(20.5, 20.5);
                e.size = 4.0;
                e.opacity = 0.3;
                e.brightness = 1.0;
                e.color = Color::new(0.2, 0.4, 1.0, 1.0);
            }
            let mut surface = Surface::new(40, 40);
            Compositor::render(&mut surface, &pool, &config, HoverState::Idle);
            surface.pixel(20, 20).unwrap_or([0.0; 4])
        };

        let single = stacked(1);
        let pair = stacked(2);
        assert!(single[3] > 0.0);
        assert!((pair[3] - (single[3] * 2.0).min(1.0)).abs() < 1e-4);
        assert!(pair[2] > single[2]);
    }

    #[test]
    fn glowing_variants_screen_their_layers() {
        assert_eq!(Compositor::layer_blend(AnimatorVariant::Ambient), BlendMode::Screen);
        assert_eq!(Compositor::layer_blend(AnimatorVariant::Spotlight), BlendMode::Screen);
        assert_eq!(Compositor::layer_blend(AnimatorVariant::Firefly), BlendMode::SourceOver);
    }

    #[test]
    fn firefly_hover_switches_tint_to_black() {
        let config = AnimatorConfig::firefly();
        let mut pool = EntityPool::initialize(1, 40.0, 40.0, &config, &mut ParticleRng::new(2));
        {
            let e = &mut pool.entities_mut()[0];
            e.position = Vec2::new(20.5, 20.5);
            e.size = 3.0;
            e.opacity = 0.8;
        }
        let mut idle = Surface::new(40, 40);
        let mut hover = Surface::new(40, 40);
        Compositor::render(&mut idle, &pool, &config, HoverState::Idle);
        Compositor::render(&mut hover, &pool, &config, HoverState::Hovering);

        let idle_px = idle.pixel(20, 20).unwrap_or([0.0; 4]);
        let hover_px = hover.pixel(20, 20).unwrap_or([0.0; 4]);
        assert!(idle_px[0] > 0.5);
        assert_eq!(hover_px[0], 0.0);
        assert!((idle_px[3] - hover_px[3]).abs() < 1e-6);
    }

    #[test]
    fn spotlight_screen_stays_in_range() {
        let mut config = AnimatorConfig::spotlight();
        config.spotlight.intensity = 0.3;
        let mut pool = EntityPool::initialize(3, 400.0, 400.0, &config, &mut ParticleRng::new(1));
        let input = StepInput::reference(0.0, Vec2::new(200.0, 200.0));
        FrameStepper::new(&config).advance(&mut pool, &input);
        let mut surface = Surface::new(400, 400);
        Compositor::render(&mut surface, &pool, &config, HoverState::Idle);

        let centre = surface.pixel(200, 200).unwrap_or([0.0; 4]);
        assert!(centre[3] > 0.0);
        for y in (0..400).step_by(37) {
            for x in (0..400).step_by(37) {
                let px = surface.pixel(x, y).unwrap_or([0.0; 4]);
                assert!(px.iter().all(|c| (0.0..=1.0).contains(c)));
            }
        }
    }

    #[test]
    fn trail_length_one_draws_no_strokes() {
        let mut config = AnimatorConfig::ambient(ColorScheme::Blue);
        config.hero_probability = 0.0;
        config.parallax_enabled = false;
        config.trail_length = 1;
        let mut pool = EntityPool::initialize(1, 100.0, 100.0, &config, &mut ParticleRng::new(3));
        pool.entities_mut()[0].position = Vec2::new(50.0, 10.0);
        let stepper = FrameStepper::new(&config);
        for i in 0..30 {
            stepper.advance(&mut pool, &StepInput::reference(i as f32, Vec2::ZERO));
        }
        let mut surface = Surface::new(100, 100);
        Compositor::render(&mut surface, &pool, &config, HoverState::Idle);
        // the entity has moved 30px down; nothing is left behind it
        assert_eq!(alpha_at(&surface, Vec2::new(50.0, 25.0)), 0.0);
        assert!(alpha_at(&surface, Vec2::new(50.0, 40.0)) > 0.0);
    }

    #[test]
    fn long_trail_leaves_strokes_behind() {
        let mut config = AnimatorConfig::ambient(ColorScheme::Blue);
        config.hero_probability = 0.0;
        config.parallax_enabled = false;
        config.trail_length = 12;
        let mut pool = EntityPool::initialize(1, 100.0, 100.0, &config, &mut ParticleRng::new(3));
        {
            let e = &mut pool.entities_mut()[0];
            e.position = Vec2::new(50.0, 10.0);
            e.velocity = Vec2::new(0.0, 2.0);
            e.size = 2.0;
        }
        let stepper = FrameStepper::new(&config);
        for i in 0..12 {
            stepper.advance(&mut pool, &StepInput::reference(i as f32, Vec2::ZERO));
        }
        let mut surface = Surface::new(100, 100);
        Compositor::render(&mut surface, &pool, &config, HoverState::Idle);
        // head is at y = 34; the stroke covers the last dozen steps behind it
        assert!(alpha_at(&surface, Vec2::new(50.0, 24.0)) > 0.0);
    }
}

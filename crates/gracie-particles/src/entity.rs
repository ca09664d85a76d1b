//! Entity state and the fixed-size pool an animator owns between resizes

use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::config::{AnimatorConfig, AnimatorVariant, SpotlightLobe};
use crate::rand::ParticleRng;
use gracie_core::{Color, Vec2};

/// Smallest size an entity may be created with, keeping `size > 0`
pub const MIN_ENTITY_SIZE: f32 = 0.05;

/// Bounded history of recent positions, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append the newest point, evicting from the front past capacity
    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Per-lobe orbit state for spotlight entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LobeOrbit {
    pub lobe: SpotlightLobe,
    /// Current outer radius, recomputed every step
    pub radius: f32,
}

/// One drawable point of light
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    /// Pixels per reference frame
    pub velocity: Vec2,
    pub size: f32,
    pub base_opacity: f32,
    /// Rendered opacity for the current tick
    pub opacity: f32,
    pub brightness: f32,
    pub color: Color,
    pub parallax_factor: f32,
    pub is_hero: bool,
    pub trail: Trail,
    /// Radians per second
    pub pulse_speed: f32,
    pub pulse_offset: f32,
    pub orbit: Option<LobeOrbit>,
}

/// Fixed-size entity collection sized to one surface
#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    entities: Vec<Entity>,
    width: f32,
    height: f32,
}

impl EntityPool {
    /// Build exactly `count` entities with positions uniform in `[0, W) x [0, H)`.
    ///
    /// Spotlight pools cycle through the configured lobe table and start at the
    /// surface centre; an empty lobe table yields an empty pool.
    pub fn initialize(
        count: usize,
        width: f32,
        height: f32,
        config: &AnimatorConfig,
        rng: &mut ParticleRng,
    ) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let entities = match config.variant {
            AnimatorVariant::Spotlight => spawn_lobes(count, width, height, config),
            _ => (0..count)
                .map(|_| spawn_point(width, height, config, rng))
                .collect(),
        };

        tracing::debug!(
            variant = config.variant.name(),
            count = entities.len(),
            width,
            height,
            "seeded entity pool"
        );

        Self {
            entities,
            width,
            height,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}

fn sample(rng: &mut ParticleRng, range: [f32; 2]) -> f32 {
    if range[1] > range[0] {
        rng.range(range[0], range[1])
    } else {
        range[0]
    }
}

fn spawn_point(width: f32, height: f32, config: &AnimatorConfig, rng: &mut ParticleRng) -> Entity {
    let is_hero = config.variant == AnimatorVariant::Ambient && rng.chance(config.hero_probability);
    let (size_range, opacity_range, brightness_range) = if is_hero {
        (
            config.hero_size_range,
            config.hero_opacity_range,
            config.hero_brightness_range,
        )
    } else {
        (
            config.size_range,
            config.opacity_range,
            config.brightness_range,
        )
    };

    let position = Vec2::new(rng.below(width), rng.below(height));
    let velocity = Vec2::new(
        sample(rng, config.velocity_x_range),
        sample(rng, config.velocity_y_range),
    );
    let size = sample(rng, size_range).max(MIN_ENTITY_SIZE);
    let base_opacity = sample(rng, opacity_range).clamp(0.0, 1.0);
    let brightness = sample(rng, brightness_range).clamp(0.0, 1.0);

    let color = match config.variant {
        AnimatorVariant::Ambient => {
            let palette = config.scheme.palette();
            let pool = palette.pool(is_hero);
            if pool.is_empty() {
                Color::WHITE
            } else {
                pool[rng.index(pool.len())]
            }
        }
        _ => config.idle_tint,
    };

    let parallax_factor = if config.parallax_enabled {
        sample(rng, config.parallax_range).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (pulse_speed, pulse_offset) = if config.variant == AnimatorVariant::Firefly {
        (sample(rng, config.pulse_speed_range), rng.below(TAU))
    } else {
        (0.0, 0.0)
    };

    Entity {
        position,
        velocity,
        size,
        base_opacity,
        opacity: base_opacity,
        brightness,
        color,
        parallax_factor,
        is_hero,
        trail: Trail::new(config.trail_length),
        pulse_speed,
        pulse_offset,
        orbit: None,
    }
}

fn spawn_lobes(count: usize, width: f32, height: f32, config: &AnimatorConfig) -> Vec<Entity> {
    let spot = &config.spotlight;
    if spot.lobes.is_empty() {
        return Vec::new();
    }
    let centre = Vec2::new(width / 2.0, height / 2.0);

    (0..count)
        .map(|i| {
            let lobe = spot.lobes[i % spot.lobes.len()];
            let opacity = (spot.intensity * lobe.opacity_gain).clamp(0.0, 1.0);
            Entity {
                position: centre,
                velocity: Vec2::ZERO,
                size: lobe.base_radius.max(MIN_ENTITY_SIZE),
                base_opacity: opacity,
                opacity,
                brightness: 1.0,
                color: spot.color,
                parallax_factor: 0.0,
                is_hero: false,
                trail: Trail::new(config.trail_length),
                pulse_speed: 0.0,
                pulse_offset: 0.0,
                orbit: Some(LobeOrbit {
                    lobe,
                    radius: lobe.base_radius,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ColorScheme;

    #[test]
    fn initialize_yields_exact_count_inside_surface() {
        let config = AnimatorConfig::ambient(ColorScheme::Blue);
        let mut rng = ParticleRng::new(42);
        let pool = EntityPool::initialize(500, 320.0, 240.0, &config, &mut rng);

        assert_eq!(pool.len(), 500);
        for e in pool.iter() {
            assert!(e.position.x >= 0.0 && e.position.x < 320.0);
            assert!(e.position.y >= 0.0 && e.position.y < 240.0);
            assert!(e.size > 0.0);
            assert!((0.0..=1.0).contains(&e.brightness));
            assert!((0.0..=1.0).contains(&e.parallax_factor));
        }
    }

    #[test]
    fn empty_pool_for_zero_count() {
        let config = AnimatorConfig::firefly();
        let mut rng = ParticleRng::new(1);
        let pool = EntityPool::initialize(0, 100.0, 100.0, &config, &mut rng);
        assert!(pool.is_empty());
    }

    #[test]
    fn same_seed_same_pool() {
        let config = AnimatorConfig::ambient(ColorScheme::Orange);
        let a = EntityPool::initialize(64, 200.0, 100.0, &config, &mut ParticleRng::new(7));
        let b = EntityPool::initialize(64, 200.0, 100.0, &config, &mut ParticleRng::new(7));
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn ambient_heroes_use_hero_ranges() {
        let config = AnimatorConfig::ambient(ColorScheme::Blue);
        let palette = config.scheme.palette();
        let mut rng = ParticleRng::new(99);
        let pool = EntityPool::initialize(400, 500.0, 500.0, &config, &mut rng);

        let heroes: Vec<_> = pool.iter().filter(|e| e.is_hero).collect();
        assert!(!heroes.is_empty());
        assert!(heroes.len() < pool.len());
        for e in pool.iter() {
            if e.is_hero {
                assert!(e.size < 0.2 + 1e-6);
                assert!(e.base_opacity >= 0.6);
                assert!(e.brightness >= 0.7);
                assert!(palette.hero.contains(&e.color));
            } else {
                assert!(e.size >= 1.0 && e.size < 2.0);
                assert!(e.base_opacity >= 0.4);
                assert!(palette.primary.contains(&e.color));
            }
        }
    }

    #[test]
    fn firefly_attributes() {
        let config = AnimatorConfig::firefly();
        let mut rng = ParticleRng::new(3);
        let pool = EntityPool::initialize(200, 800.0, 600.0, &config, &mut rng);
        for e in pool.iter() {
            assert!(!e.is_hero);
            assert_eq!(e.parallax_factor, 0.0);
            assert!(e.velocity.x >= -0.25 && e.velocity.x < 0.25);
            assert!(e.velocity.y >= -0.25 && e.velocity.y < 0.25);
            assert!(e.size >= 1.0 && e.size < 4.0);
            assert!(e.pulse_speed >= 10.0 && e.pulse_speed < 30.0);
            assert!(e.pulse_offset >= 0.0 && e.pulse_offset < TAU);
        }
    }

    #[test]
    fn spotlight_pool_cycles_lobes() {
        let config = AnimatorConfig::spotlight();
        let mut rng = ParticleRng::new(5);
        let pool = EntityPool::initialize(3, 1000.0, 800.0, &config, &mut rng);
        assert_eq!(pool.len(), 3);
        let radii: Vec<f32> = pool
            .iter()
            .map(|e| e.orbit.map(|o| o.lobe.base_radius).unwrap_or(0.0))
            .collect();
        assert_eq!(radii, vec![300.0, 200.0, 400.0]);
        assert_eq!(pool.entities()[0].position, Vec2::new(500.0, 400.0));
        assert!((pool.entities()[0].base_opacity - 0.036).abs() < 1e-6);
    }

    #[test]
    fn trail_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(trail.newest(), Some(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn zero_capacity_trail_stays_empty() {
        let mut trail = Trail::new(0);
        trail.push(Vec2::new(1.0, 1.0));
        assert!(trail.is_empty());
    }
}

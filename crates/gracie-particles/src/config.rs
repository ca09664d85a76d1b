//! Animator configuration (parsed from TOML) and the three built-in presets

use crate::palette::ColorScheme;
use gracie_core::Color;

/// Upper bound on pool size regardless of what a config asks for
pub const MAX_ENTITIES: usize = 10_000;

/// Which of the three decorative layers an animator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorVariant {
    /// Scroll-parallax particle field with hero halos
    Ambient,
    /// Pulsing glow points that bounce around the surface
    Firefly,
    /// Overlapping radial lobes that follow the pointer
    Spotlight,
}

impl AnimatorVariant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ambient" | "particles" => Some(AnimatorVariant::Ambient),
            "firefly" | "fireflies" => Some(AnimatorVariant::Firefly),
            "spotlight" => Some(AnimatorVariant::Spotlight),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimatorVariant::Ambient => "ambient",
            AnimatorVariant::Firefly => "firefly",
            AnimatorVariant::Spotlight => "spotlight",
        }
    }
}

/// What happens when an entity reaches a surface edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Reappear on the opposite edge
    Wrap,
    /// Clamp to the edge and reverse the velocity component
    Bounce,
}

/// Motion parameters of one spotlight lobe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightLobe {
    /// Horizontal/vertical wobble amplitude in pixels
    pub offset_amplitude: [f32; 2],
    /// Horizontal (sin) and vertical (cos) wobble frequency per phase unit
    pub offset_frequency: [f32; 2],
    pub base_radius: f32,
    pub radius_amplitude: f32,
    pub radius_frequency: f32,
    /// Multiplier applied to the spotlight intensity for this lobe
    pub opacity_gain: f32,
}

impl SpotlightLobe {
    /// The three lobes of the hero spotlight: medium, small-and-fast, wide-and-slow
    pub fn defaults() -> Vec<Self> {
        vec![
            SpotlightLobe {
                offset_amplitude: [20.0, 15.0],
                offset_frequency: [0.5, 0.7],
                base_radius: 300.0,
                radius_amplitude: 50.0,
                radius_frequency: 0.3,
                opacity_gain: 3.6,
            },
            SpotlightLobe {
                offset_amplitude: [30.0, 25.0],
                offset_frequency: [0.8, 0.4],
                base_radius: 200.0,
                radius_amplitude: 30.0,
                radius_frequency: 0.5,
                opacity_gain: 1.4,
            },
            SpotlightLobe {
                offset_amplitude: [15.0, 20.0],
                offset_frequency: [1.2, 0.9],
                base_radius: 400.0,
                radius_amplitude: 10.0,
                radius_frequency: 0.2,
                opacity_gain: 2.3,
            },
        ]
    }
}

/// Spotlight-only settings
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightConfig {
    pub intensity: f32,
    pub color: Color,
    /// Radius at which each lobe's gradient starts
    pub inner_radius: f32,
    /// Alpha multiplier of the 0.3 gradient stop, relative to the lobe opacity
    pub core_gain: f32,
    /// Phase at mount time
    pub phase_origin: f32,
    /// Phase units advanced per second
    pub phase_rate: f32,
    pub lobes: Vec<SpotlightLobe>,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            intensity: 0.01,
            color: Color::WHITE,
            inner_radius: 90.0,
            core_gain: 0.6,
            phase_origin: 10.0,
            phase_rate: 0.6,
            lobes: SpotlightLobe::defaults(),
        }
    }
}

/// Configuration of one animator instance
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    pub variant: AnimatorVariant,
    pub count: usize,
    pub boundary_policy: BoundaryPolicy,
    pub scheme: ColorScheme,
    /// Stored trail points per entity; 1 keeps only the current position (no strokes)
    pub trail_length: usize,
    /// Glow falloff radius as a multiple of entity size
    pub glow_multiplier: f32,
    pub parallax_enabled: bool,
    /// Multiplier on the raw scroll delta before parallax is applied
    pub scroll_gain: f32,
    pub hero_probability: f32,
    pub size_range: [f32; 2],
    pub hero_size_range: [f32; 2],
    pub opacity_range: [f32; 2],
    pub hero_opacity_range: [f32; 2],
    pub brightness_range: [f32; 2],
    pub hero_brightness_range: [f32; 2],
    pub parallax_range: [f32; 2],
    /// Velocity ranges in pixels per reference frame (1/60 s)
    pub velocity_x_range: [f32; 2],
    pub velocity_y_range: [f32; 2],
    /// Firefly pulse speed in radians per second
    pub pulse_speed_range: [f32; 2],
    /// Hero halo radius as a multiple of entity size
    pub hero_halo_scale: f32,
    /// Alpha gain applied to trail strokes before clamping
    pub trail_alpha_gain: f32,
    /// Firefly glow color while the pointer is outside the surface
    pub idle_tint: Color,
    /// Firefly glow color while the pointer hovers the surface
    pub hover_tint: Color,
    pub spotlight: SpotlightConfig,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::ambient(ColorScheme::Blue)
    }
}

impl AnimatorConfig {
    /// Ambient scroll-parallax particles
    pub fn ambient(scheme: ColorScheme) -> Self {
        Self {
            variant: AnimatorVariant::Ambient,
            count: 100,
            boundary_policy: BoundaryPolicy::Wrap,
            scheme,
            trail_length: 8,
            glow_multiplier: 3.0,
            parallax_enabled: true,
            scroll_gain: 2.0,
            hero_probability: 0.2,
            size_range: [1.0, 2.0],
            hero_size_range: [0.0, 0.2],
            opacity_range: [0.4, 1.0],
            hero_opacity_range: [0.6, 1.0],
            brightness_range: [0.5, 1.0],
            hero_brightness_range: [0.7, 1.2],
            parallax_range: [0.4, 1.0],
            velocity_x_range: [0.0, 0.0],
            velocity_y_range: [1.0, 1.0],
            pulse_speed_range: [0.0, 0.0],
            hero_halo_scale: 2.3,
            trail_alpha_gain: 1.6,
            idle_tint: Color::WHITE,
            hover_tint: Color::BLACK,
            spotlight: SpotlightConfig::default(),
        }
    }

    /// Free-floating pulsing fireflies
    pub fn firefly() -> Self {
        Self {
            variant: AnimatorVariant::Firefly,
            count: 50,
            boundary_policy: BoundaryPolicy::Bounce,
            trail_length: 1,
            parallax_enabled: false,
            scroll_gain: 0.0,
            hero_probability: 0.0,
            size_range: [1.0, 4.0],
            opacity_range: [0.3, 0.8],
            brightness_range: [1.0, 1.0],
            parallax_range: [0.0, 0.0],
            velocity_x_range: [-0.25, 0.25],
            velocity_y_range: [-0.25, 0.25],
            pulse_speed_range: [10.0, 30.0],
            ..Self::ambient(ColorScheme::Blue)
        }
    }

    /// Pointer-following spotlight glow
    pub fn spotlight() -> Self {
        let spotlight = SpotlightConfig::default();
        Self {
            variant: AnimatorVariant::Spotlight,
            count: spotlight.lobes.len(),
            boundary_policy: BoundaryPolicy::Bounce,
            trail_length: 1,
            parallax_enabled: false,
            scroll_gain: 0.0,
            hero_probability: 0.0,
            velocity_x_range: [0.0, 0.0],
            velocity_y_range: [0.0, 0.0],
            brightness_range: [1.0, 1.0],
            parallax_range: [0.0, 0.0],
            spotlight,
            ..Self::ambient(ColorScheme::Blue)
        }
    }

    /// Preset for a variant
    pub fn preset(variant: AnimatorVariant) -> Self {
        match variant {
            AnimatorVariant::Ambient => Self::ambient(ColorScheme::Blue),
            AnimatorVariant::Firefly => Self::firefly(),
            AnimatorVariant::Spotlight => Self::spotlight(),
        }
    }

    /// Parse an AnimatorConfig from a TOML table.
    ///
    /// `variant` picks the preset; every other key overrides it.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let variant = table
            .get("variant")
            .and_then(|v| v.as_str())
            .and_then(AnimatorVariant::from_name)
            .unwrap_or(AnimatorVariant::Ambient);
        let mut config = Self::preset(variant);

        if let Some(v) = table.get("count") {
            let n = v.as_integer().unwrap_or(config.count as i64).max(0) as usize;
            config.count = n.min(MAX_ENTITIES);
        }
        if let Some(v) = table.get("boundary").and_then(|v| v.as_str()) {
            config.boundary_policy = match v {
                "wrap" => BoundaryPolicy::Wrap,
                "bounce" => BoundaryPolicy::Bounce,
                _ => config.boundary_policy,
            };
        }
        if let Some(v) = table.get("scheme").and_then(|v| v.as_str()) {
            config.scheme = ColorScheme::from_name(v).unwrap_or(config.scheme);
        }
        if let Some(v) = table.get("trail_length") {
            config.trail_length = v.as_integer().unwrap_or(1).clamp(0, 256) as usize;
        }
        if let Some(v) = table.get("glow_multiplier") {
            config.glow_multiplier = toml_f32(v, config.glow_multiplier).max(1.0);
        }
        if let Some(v) = table.get("parallax") {
            config.parallax_enabled = v.as_bool().unwrap_or(config.parallax_enabled);
        }
        if let Some(v) = table.get("scroll_gain") {
            config.scroll_gain = toml_f32(v, config.scroll_gain);
        }
        if let Some(v) = table.get("hero_probability") {
            config.hero_probability = toml_f32(v, config.hero_probability).clamp(0.0, 1.0);
        }

        let ranges: [(&str, &mut [f32; 2]); 10] = [
            ("size_range", &mut config.size_range),
            ("hero_size_range", &mut config.hero_size_range),
            ("opacity_range", &mut config.opacity_range),
            ("hero_opacity_range", &mut config.hero_opacity_range),
            ("brightness_range", &mut config.brightness_range),
            ("hero_brightness_range", &mut config.hero_brightness_range),
            ("parallax_range", &mut config.parallax_range),
            ("velocity_x_range", &mut config.velocity_x_range),
            ("velocity_y_range", &mut config.velocity_y_range),
            ("pulse_speed_range", &mut config.pulse_speed_range),
        ];
        for (key, slot) in ranges {
            if let Some(v) = table.get(key) {
                *slot = toml_range(v, *slot);
            }
        }

        if let Some(v) = table.get("hero_halo_scale") {
            config.hero_halo_scale = toml_f32(v, config.hero_halo_scale);
        }
        if let Some(v) = table.get("trail_alpha_gain") {
            config.trail_alpha_gain = toml_f32(v, config.trail_alpha_gain);
        }
        if let Some(v) = table.get("idle_tint") {
            config.idle_tint = toml_color(v, config.idle_tint);
        }
        if let Some(v) = table.get("hover_tint") {
            config.hover_tint = toml_color(v, config.hover_tint);
        }

        if let Some(spot) = table.get("spotlight").and_then(|v| v.as_table()) {
            let s = &mut config.spotlight;
            if let Some(v) = spot.get("intensity") {
                s.intensity = toml_f32(v, s.intensity).max(0.0);
            }
            if let Some(v) = spot.get("color") {
                s.color = toml_color(v, Color::FALLBACK_SPOTLIGHT);
            }
            if let Some(v) = spot.get("inner_radius") {
                s.inner_radius = toml_f32(v, s.inner_radius).max(0.0);
            }
            if let Some(v) = spot.get("core_gain") {
                s.core_gain = toml_f32(v, s.core_gain).max(0.0);
            }
            if let Some(v) = spot.get("phase_rate") {
                s.phase_rate = toml_f32(v, s.phase_rate);
            }
            if let Some(lobes) = spot.get("lobes").and_then(|v| v.as_array()) {
                let parsed: Vec<SpotlightLobe> = lobes
                    .iter()
                    .filter_map(|l| l.as_table())
                    .map(parse_lobe)
                    .collect();
                if !parsed.is_empty() {
                    s.lobes = parsed;
                }
            }
            if variant == AnimatorVariant::Spotlight && table.get("count").is_none() {
                config.count = config.spotlight.lobes.len();
            }
        }

        config
    }
}

fn parse_lobe(table: &toml::value::Table) -> SpotlightLobe {
    let d = SpotlightLobe::defaults()[0];
    SpotlightLobe {
        offset_amplitude: table
            .get("offset_amplitude")
            .map(|v| toml_range(v, d.offset_amplitude))
            .unwrap_or(d.offset_amplitude),
        offset_frequency: table
            .get("offset_frequency")
            .map(|v| toml_range(v, d.offset_frequency))
            .unwrap_or(d.offset_frequency),
        base_radius: table
            .get("base_radius")
            .map(|v| toml_f32(v, d.base_radius))
            .unwrap_or(d.base_radius),
        radius_amplitude: table
            .get("radius_amplitude")
            .map(|v| toml_f32(v, d.radius_amplitude))
            .unwrap_or(d.radius_amplitude),
        radius_frequency: table
            .get("radius_frequency")
            .map(|v| toml_f32(v, d.radius_frequency))
            .unwrap_or(d.radius_frequency),
        opacity_gain: table
            .get("opacity_gain")
            .map(|v| toml_f32(v, d.opacity_gain))
            .unwrap_or(d.opacity_gain),
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// `[min, max]`, swapped if given backwards
fn toml_range(v: &toml::Value, default: [f32; 2]) -> [f32; 2] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            let a = toml_f32(&arr[0], default[0]);
            let b = toml_f32(&arr[1], default[1]);
            return if a <= b { [a, b] } else { [b, a] };
        }
    }
    default
}

/// Either `"#rrggbb"` or `[r, g, b, a]` with channels in [0, 1]
fn toml_color(v: &toml::Value, default: Color) -> Color {
    if let Some(s) = v.as_str() {
        return Color::parse_hex(s).unwrap_or(default);
    }
    if let Some(arr) = v.as_array() {
        if arr.len() >= 4 {
            return Color::new(
                toml_f32(&arr[0], default.r).clamp(0.0, 1.0),
                toml_f32(&arr[1], default.g).clamp(0.0, 1.0),
                toml_f32(&arr[2], default.b).clamp(0.0, 1.0),
                toml_f32(&arr[3], default.a).clamp(0.0, 1.0),
            );
        }
    }
    default
}

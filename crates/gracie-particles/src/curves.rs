//! Interpolation and oscillation helpers shared by the stepper and compositor

use gracie_core::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two straight-alpha colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        lerp_f32(a.r, b.r, t),
        lerp_f32(a.g, b.g, t),
        lerp_f32(a.b, b.b, t),
        lerp_f32(a.a, b.a, t),
    )
}

/// Firefly pulsation multiplier in [0.6, 1.0]
pub fn pulse_factor(elapsed: f32, speed: f32, offset: f32) -> f32 {
    0.8 + 0.2 * (elapsed * speed + offset).sin()
}

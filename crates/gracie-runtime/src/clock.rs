//! Monotonic animation clock with stall clamping

/// Longest frame the clock will report; anything slower is treated as a stall
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Shared clock for every animator on a page
#[derive(Debug, Default)]
pub struct AnimationClock {
    /// Seconds since the clock started
    pub total_time: f32,
    /// Seconds covered by the last advance
    pub delta_time: f32,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by an explicit delta. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            self.delta_time = 0.0;
            return;
        }
        self.delta_time = dt.min(MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
    }

    /// Restart from zero, as on a fresh mount
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_delta_ignored() {
        let mut clock = AnimationClock::new();
        clock.advance(0.5 / 60.0);
        let before = clock.total_time;
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.total_time, before);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn stall_clamped() {
        let mut clock = AnimationClock::new();
        clock.advance(3.0);
        assert_eq!(clock.delta_time, MAX_FRAME_DELTA);
        assert_eq!(clock.total_time, MAX_FRAME_DELTA);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = AnimationClock::new();
        clock.advance(0.1);
        clock.advance(0.1);
        clock.reset();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }
}

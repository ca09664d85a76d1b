//! Scroll and pointer bridges: sample one external signal per tick

use gracie_core::Vec2;
use gracie_render::HoverState;

/// Turns absolute scroll offsets into per-tick deltas
#[derive(Debug, Clone, Default)]
pub struct ScrollBridge {
    last_offset: Option<f32>,
}

impl ScrollBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous sample; the first sample after mount is 0
    pub fn sample(&mut self, offset: f32) -> f32 {
        if !offset.is_finite() {
            return 0.0;
        }
        let delta = self.last_offset.map(|last| offset - last).unwrap_or(0.0);
        self.last_offset = Some(offset);
        delta
    }

    pub fn reset(&mut self) {
        self.last_offset = None;
    }
}

/// Remembers the last pointer position, centred until the first move
#[derive(Debug, Clone, Default)]
pub struct PointerBridge {
    position: Vec2,
    moved: bool,
}

impl PointerBridge {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(width / 2.0, height / 2.0),
            moved: false,
        }
    }

    pub fn on_move(&mut self, position: Vec2) {
        self.position = position;
        self.moved = true;
    }

    /// Keep the default centred on the new viewport unless the pointer has moved
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if !self.moved {
            self.position = Vec2::new(width / 2.0, height / 2.0);
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

/// Host-provided signals for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSignals {
    /// Absolute page scroll offset in pixels
    pub scroll_offset: f32,
    /// Pointer position if it moved since the last frame
    pub pointer: Option<Vec2>,
    pub hover: HoverState,
    /// Viewport height, used to derive section progress
    pub viewport_height: f32,
}

impl FrameSignals {
    pub fn at_scroll(scroll_offset: f32) -> Self {
        Self {
            scroll_offset,
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn with_hover(mut self, hover: HoverState) -> Self {
        self.hover = hover;
        self
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_scroll_sample_is_zero() {
        let mut bridge = ScrollBridge::new();
        assert_eq!(bridge.sample(400.0), 0.0);
        assert_eq!(bridge.sample(430.0), 30.0);
        assert_eq!(bridge.sample(420.0), -10.0);
        bridge.reset();
        assert_eq!(bridge.sample(0.0), 0.0);
    }

    #[test]
    fn pointer_defaults_to_centre_and_follows_resize() {
        let mut pointer = PointerBridge::new(800.0, 600.0);
        assert_eq!(pointer.position(), Vec2::new(400.0, 300.0));
        pointer.on_resize(1000.0, 500.0);
        assert_eq!(pointer.position(), Vec2::new(500.0, 250.0));
        pointer.on_move(Vec2::new(10.0, 20.0));
        pointer.on_resize(200.0, 200.0);
        assert_eq!(pointer.position(), Vec2::new(10.0, 20.0));
    }
}

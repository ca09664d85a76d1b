//! Animation system trait and the host that fans frames out to several layers

use gracie_render::{BlendMode, Surface};

use crate::bridge::FrameSignals;
use crate::clock::AnimationClock;
use crate::lifecycle::Viewport;
use crate::scheduler::{RepaintScheduler, SubscriptionId};

/// A layer that can be mounted on a page and ticked by the repaint scheduler
///
/// Layers are ticked in registration order, which is also their paint order
/// when composited (first is furthest back).
pub trait AnimationSystem {
    /// Allocate per-mount state and subscribe to repaints
    fn mount(&mut self, viewport: Viewport, scheduler: &mut dyn RepaintScheduler);

    /// Called whenever the viewport changes size
    fn resize(&mut self, viewport: Viewport);

    /// Advance one frame; returns whether anything was painted
    fn tick(&mut self, dt: f32, signals: &FrameSignals) -> bool;

    /// Release per-mount state and the repaint subscription
    fn unmount(&mut self, scheduler: &mut dyn RepaintScheduler);

    /// The layer's current frame, if mounted
    fn surface(&self) -> Option<&Surface>;

    /// Repaint subscription held while mounted
    fn subscription(&self) -> Option<SubscriptionId>;

    /// How this layer stacks onto the layers behind it
    fn blend_mode(&self) -> BlendMode {
        BlendMode::SourceOver
    }

    /// Human-readable name for this layer
    fn name(&self) -> &str;
}

/// Owns a stack of layers sharing one clock
#[derive(Default)]
pub struct AnimationHost {
    systems: Vec<Box<dyn AnimationSystem>>,
    clock: AnimationClock,
    viewport: Viewport,
}

impl AnimationHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, system: Box<dyn AnimationSystem>) {
        self.systems.push(system);
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn systems(&self) -> impl Iterator<Item = &dyn AnimationSystem> {
        self.systems.iter().map(|s| s.as_ref())
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.total_time
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mount_all(&mut self, viewport: Viewport, scheduler: &mut dyn RepaintScheduler) {
        self.viewport = viewport;
        self.clock.reset();
        for system in &mut self.systems {
            system.mount(viewport, scheduler);
        }
    }

    pub fn resize_all(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for system in &mut self.systems {
            system.resize(viewport);
        }
    }

    /// Advance the shared clock and tick every layer still subscribed with
    /// `scheduler`. Returns how many painted.
    pub fn frame(
        &mut self,
        dt: f32,
        signals: &FrameSignals,
        scheduler: &dyn RepaintScheduler,
    ) -> usize {
        self.clock.advance(dt);
        let dt = self.clock.delta_time;
        self.systems
            .iter_mut()
            .filter(|s| s.subscription().is_some_and(|id| scheduler.is_registered(id)))
            .map(|s| s.tick(dt, signals))
            .filter(|&painted| painted)
            .count()
    }

    pub fn unmount_all(&mut self, scheduler: &mut dyn RepaintScheduler) {
        for system in &mut self.systems {
            system.unmount(scheduler);
        }
    }

    /// Flatten every mounted layer, back to front, into one surface
    pub fn composite(&self) -> Surface {
        let mut out = Surface::new(self.viewport.width, self.viewport.height);
        for system in &self.systems {
            if let Some(surface) = system.surface() {
                out.composite_from(surface, system.blend_mode());
            }
        }
        out
    }
}

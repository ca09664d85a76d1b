//! Animator lifecycle: mount allocates, resize reseeds, unmount discards

use gracie_particles::{AnimatorConfig, EntityPool, FrameStepper, ParticleRng, StepInput};
use gracie_render::{BlendMode, Compositor, HoverState, Surface};

use crate::bridge::{FrameSignals, PointerBridge, ScrollBridge};
use crate::scheduler::{RepaintScheduler, SubscriptionId};
use crate::sections::SectionProgress;
use crate::system::AnimationSystem;

/// Device-pixel size of the area an animator covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Active,
}

/// Everything that exists only between mount and unmount
struct Mounted {
    surface: Surface,
    pool: EntityPool,
    subscription: SubscriptionId,
    scroll: ScrollBridge,
    pointer: PointerBridge,
    hover: HoverState,
    elapsed: f32,
    scroll_progress: f32,
    frames_painted: u64,
}

/// One decorative canvas layer
pub struct Animator {
    name: String,
    config: AnimatorConfig,
    stepper: FrameStepper,
    rng: ParticleRng,
    section: Option<usize>,
    mounted: Option<Mounted>,
}

impl Animator {
    pub fn new(name: impl Into<String>, config: AnimatorConfig) -> Self {
        Self {
            name: name.into(),
            stepper: FrameStepper::new(&config),
            config,
            rng: ParticleRng::from_time(),
            section: None,
            mounted: None,
        }
    }

    /// Use a fixed seed so pools are reproducible
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = ParticleRng::new(seed);
        self
    }

    /// Page section whose scroll progress this animator tracks
    pub fn with_section(mut self, section: usize) -> Self {
        self.section = Some(section);
        self
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        if self.mounted.is_some() {
            LifecycleState::Active
        } else {
            LifecycleState::Unmounted
        }
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    pub fn pool(&self) -> Option<&EntityPool> {
        self.mounted.as_ref().map(|m| &m.pool)
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.mounted.as_ref().map(|m| m.subscription)
    }

    pub fn elapsed(&self) -> f32 {
        self.mounted.as_ref().map(|m| m.elapsed).unwrap_or(0.0)
    }

    pub fn scroll_progress(&self) -> f32 {
        self.mounted.as_ref().map(|m| m.scroll_progress).unwrap_or(0.0)
    }

    pub fn frames_painted(&self) -> u64 {
        self.mounted.as_ref().map(|m| m.frames_painted).unwrap_or(0)
    }

    fn seed_pool(&mut self, viewport: Viewport) -> EntityPool {
        let count = if viewport.is_empty() { 0 } else { self.config.count };
        EntityPool::initialize(
            count,
            viewport.width as f32,
            viewport.height as f32,
            &self.config,
            &mut self.rng,
        )
    }

    /// Allocate the surface and pool and subscribe to repaints.
    /// A zero-sized viewport leaves the animator unmounted.
    pub fn mount(&mut self, viewport: Viewport, scheduler: &mut dyn RepaintScheduler) {
        if self.mounted.is_some() {
            tracing::debug!(name = self.name.as_str(), "already mounted");
            return;
        }
        if viewport.is_empty() {
            tracing::debug!(name = self.name.as_str(), "zero-sized viewport, skipping mount");
            return;
        }

        let pool = self.seed_pool(viewport);
        let subscription = scheduler.register(&self.name);
        tracing::info!(
            name = self.name.as_str(),
            variant = self.config.variant.name(),
            entities = pool.len(),
            width = viewport.width,
            height = viewport.height,
            "animator mounted"
        );

        self.mounted = Some(Mounted {
            surface: Surface::new(viewport.width, viewport.height),
            pool,
            subscription,
            scroll: ScrollBridge::new(),
            pointer: PointerBridge::new(viewport.width as f32, viewport.height as f32),
            hover: HoverState::Idle,
            elapsed: 0.0,
            scroll_progress: 0.0,
            frames_painted: 0,
        });
    }

    /// Reallocate the surface and reseed the whole pool for the new size
    pub fn resize(&mut self, viewport: Viewport) {
        if self.mounted.is_none() {
            return;
        }
        let pool = self.seed_pool(viewport);
        if let Some(m) = self.mounted.as_mut() {
            m.surface.resize(viewport.width, viewport.height);
            m.pool = pool;
            m.pointer.on_resize(viewport.width as f32, viewport.height as f32);
            tracing::debug!(
                name = self.name.as_str(),
                width = viewport.width,
                height = viewport.height,
                "animator resized"
            );
        }
    }

    /// Sample signals, step the pool and repaint. Returns false when unmounted.
    pub fn tick(&mut self, dt: f32, signals: &FrameSignals) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        m.elapsed += dt;
        if let Some(p) = signals.pointer {
            m.pointer.on_move(p);
        }
        m.hover = signals.hover;
        let scroll_delta = m.scroll.sample(signals.scroll_offset);
        if let Some(section) = self.section {
            let progress =
                SectionProgress::from_scroll(signals.scroll_offset, signals.viewport_height);
            m.scroll_progress = progress.get(section);
        }

        let input = StepInput {
            scroll_delta,
            pointer: m.pointer.position(),
            dt,
            elapsed: m.elapsed,
        };
        self.stepper.advance(&mut m.pool, &input);
        Compositor::render(&mut m.surface, &m.pool, &self.config, m.hover);
        m.frames_painted += 1;
        true
    }

    /// Cancel the repaint subscription and drop all per-mount state
    pub fn unmount(&mut self, scheduler: &mut dyn RepaintScheduler) {
        if let Some(m) = self.mounted.take() {
            scheduler.unregister(m.subscription);
            tracing::info!(
                name = self.name.as_str(),
                frames = m.frames_painted,
                "animator unmounted"
            );
        }
    }
}

impl AnimationSystem for Animator {
    fn mount(&mut self, viewport: Viewport, scheduler: &mut dyn RepaintScheduler) {
        Animator::mount(self, viewport, scheduler);
    }

    fn resize(&mut self, viewport: Viewport) {
        Animator::resize(self, viewport);
    }

    fn tick(&mut self, dt: f32, signals: &FrameSignals) -> bool {
        Animator::tick(self, dt, signals)
    }

    fn unmount(&mut self, scheduler: &mut dyn RepaintScheduler) {
        Animator::unmount(self, scheduler);
    }

    fn surface(&self) -> Option<&Surface> {
        Animator::surface(self)
    }

    fn subscription(&self) -> Option<SubscriptionId> {
        Animator::subscription(self)
    }

    fn blend_mode(&self) -> BlendMode {
        Compositor::layer_blend(self.config.variant)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::HeadlessScheduler;
    use gracie_core::Vec2;
    use gracie_particles::{ColorScheme, REFERENCE_FRAME};

    #[test]
    fn zero_sized_mount_is_silent_noop() {
        let mut sched = HeadlessScheduler::default();
        let mut animator = Animator::new("fireflies", AnimatorConfig::firefly()).with_seed(1);
        animator.mount(Viewport::new(0, 600), &mut sched);
        assert_eq!(animator.state(), LifecycleState::Unmounted);
        assert_eq!(sched.subscriber_count(), 0);
        assert!(!animator.tick(REFERENCE_FRAME, &FrameSignals::default()));
    }

    #[test]
    fn mount_tick_unmount() {
        let mut sched = HeadlessScheduler::default();
        let mut animator = Animator::new("fireflies", AnimatorConfig::firefly()).with_seed(1);
        animator.mount(Viewport::new(120, 80), &mut sched);
        assert_eq!(animator.state(), LifecycleState::Active);
        let id = animator.subscription().expect("mounted animator has a subscription");
        assert!(sched.is_registered(id));
        assert_eq!(animator.pool().map(|p| p.len()), Some(50));

        assert!(animator.tick(REFERENCE_FRAME, &FrameSignals::default()));
        assert!(animator.surface().map(|s| !s.is_blank()).unwrap_or(false));

        animator.unmount(&mut sched);
        assert_eq!(animator.state(), LifecycleState::Unmounted);
        assert!(!sched.is_registered(id));
        assert!(animator.surface().is_none());
        assert!(!animator.tick(REFERENCE_FRAME, &FrameSignals::default()));
        assert_eq!(animator.frames_painted(), 0);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut sched = HeadlessScheduler::default();
        let config = AnimatorConfig::ambient(ColorScheme::Purple);
        let mut animator = Animator::new("ambient", config.clone()).with_seed(9);
        animator.mount(Viewport::new(300, 200), &mut sched);
        animator.resize(Viewport::new(300, 200));
        animator.resize(Viewport::new(300, 200));

        assert_eq!(animator.state(), LifecycleState::Active);
        assert_eq!(sched.subscriber_count(), 1);
        let pool = animator.pool().expect("pool exists while mounted");
        assert_eq!(pool.len(), config.count);
        for e in pool.iter() {
            assert!(e.position.x >= 0.0 && e.position.x < 300.0);
            assert!(e.position.y >= 0.0 && e.position.y < 200.0);
            assert!(e.is_hero || (e.size >= 1.0 && e.size < 2.0));
        }
        let surface = animator.surface().expect("surface exists while mounted");
        assert_eq!((surface.width(), surface.height()), (300, 200));
    }

    #[test]
    fn resize_reseeds_into_new_bounds() {
        let mut sched = HeadlessScheduler::default();
        let mut animator = Animator::new("ambient", AnimatorConfig::default()).with_seed(4);
        animator.mount(Viewport::new(1000, 1000), &mut sched);
        animator.resize(Viewport::new(50, 40));
        let pool = animator.pool().expect("pool exists while mounted");
        assert_eq!(pool.len(), 100);
        assert!(pool.iter().all(|e| e.position.x < 50.0 && e.position.y < 40.0));
        assert!(pool.iter().all(|e| e.trail.is_empty()));

        animator.resize(Viewport::new(0, 0));
        assert_eq!(animator.state(), LifecycleState::Active);
        assert!(animator.pool().map(|p| p.is_empty()).unwrap_or(false));
        assert!(animator.tick(REFERENCE_FRAME, &FrameSignals::default()));
    }

    #[test]
    fn firefly_hover_changes_color_not_kinematics() {
        let mut sched = HeadlessScheduler::default();
        let mut idle = Animator::new("idle", AnimatorConfig::firefly()).with_seed(21);
        let mut hover = Animator::new("hover", AnimatorConfig::firefly()).with_seed(21);
        idle.mount(Viewport::new(200, 150), &mut sched);
        hover.mount(Viewport::new(200, 150), &mut sched);

        for i in 0..30 {
            let signals = FrameSignals::default();
            let hovered = signals.with_hover(HoverState::from_bool(i % 2 == 0));
            idle.tick(REFERENCE_FRAME, &signals);
            hover.tick(REFERENCE_FRAME, &hovered);
        }

        let a = idle.pool().expect("mounted");
        let b = hover.pool().expect("mounted");
        for (ea, eb) in a.iter().zip(b.iter()) {
            assert_eq!(ea.position, eb.position);
            assert_eq!(ea.velocity, eb.velocity);
            assert_eq!(ea.opacity, eb.opacity);
        }

        // last frame (i = 29) was idle for both; one more hovered frame diverges the pixels
        hover.tick(0.0, &FrameSignals::default().with_hover(HoverState::Hovering));
        idle.tick(0.0, &FrameSignals::default());
        assert_ne!(idle.surface(), hover.surface());
    }

    #[test]
    fn scroll_delta_drives_parallax() {
        let mut sched = HeadlessScheduler::default();
        let mut animator = Animator::new("ambient", AnimatorConfig::default()).with_seed(5);
        animator.mount(Viewport::new(400, 4000), &mut sched);

        animator.tick(0.0, &FrameSignals::at_scroll(100.0));
        let before: Vec<Vec2> = animator
            .pool()
            .map(|p| p.iter().map(|e| e.position).collect())
            .unwrap_or_default();
        animator.tick(0.0, &FrameSignals::at_scroll(110.0));
        let pool = animator.pool().expect("mounted");
        for (e, b) in pool.iter().zip(before) {
            let expected = (b.y + 20.0 * e.parallax_factor).rem_euclid(4000.0);
            assert!((e.position.y - expected).abs() < 1e-2);
        }
    }

    #[test]
    fn section_progress_tracks_scroll() {
        let mut sched = HeadlessScheduler::default();
        let mut animator = Animator::new("gaslit", AnimatorConfig::default())
            .with_seed(2)
            .with_section(2);
        animator.mount(Viewport::new(100, 100), &mut sched);
        animator.tick(
            REFERENCE_FRAME,
            &FrameSignals::at_scroll(2500.0).with_viewport_height(1000.0),
        );
        assert!((animator.scroll_progress() - 0.5).abs() < 1e-6);
    }
}

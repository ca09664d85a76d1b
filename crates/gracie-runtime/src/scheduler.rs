//! Repaint scheduling: the display-refresh subscription an animator holds while mounted

use std::collections::BTreeMap;

use crate::bridge::FrameSignals;
use crate::system::AnimationHost;

/// Handle returned by `RepaintScheduler::register`
pub type SubscriptionId = u64;

/// Source of per-frame callbacks
pub trait RepaintScheduler {
    /// Start delivering frames to the named subscriber
    fn register(&mut self, name: &str) -> SubscriptionId;

    /// Stop delivering frames; unknown ids are ignored
    fn unregister(&mut self, id: SubscriptionId);

    fn is_registered(&self, id: SubscriptionId) -> bool;
}

/// Fixed-timestep scheduler for headless rendering and tests
pub struct HeadlessScheduler {
    next_id: SubscriptionId,
    subscribers: BTreeMap<SubscriptionId, String>,
    fixed_timestep: f32,
    visible: bool,
    frames_skipped: u64,
}

impl Default for HeadlessScheduler {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl HeadlessScheduler {
    pub fn new(fps: f32) -> Self {
        Self {
            next_id: 1,
            subscribers: BTreeMap::new(),
            fixed_timestep: 1.0 / fps.max(1.0),
            visible: true,
            frames_skipped: 0,
        }
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Hidden hosts deliver no frames, like a backgrounded browser tab
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Drive `frames` fixed steps through the host.
    ///
    /// `signals` is called with the frame index. Returns the number of frames
    /// that reached the host; frames while hidden or with no subscribers are skipped.
    pub fn run<F>(&mut self, host: &mut AnimationHost, frames: usize, mut signals: F) -> usize
    where
        F: FnMut(usize) -> FrameSignals,
    {
        let mut delivered = 0;
        for i in 0..frames {
            if !self.visible || self.subscribers.is_empty() {
                self.frames_skipped += 1;
                continue;
            }
            host.frame(self.fixed_timestep, &signals(i), &*self);
            delivered += 1;
        }
        delivered
    }
}

impl RepaintScheduler for HeadlessScheduler {
    fn register(&mut self, name: &str) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.insert(id, name.to_string());
        tracing::debug!(id, name, "repaint subscription registered");
        id
    }

    fn unregister(&mut self, id: SubscriptionId) {
        if let Some(name) = self.subscribers.remove(&id) {
            tracing::debug!(id, name = name.as_str(), "repaint subscription removed");
        }
    }

    fn is_registered(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_unregister() {
        let mut sched = HeadlessScheduler::default();
        let a = sched.register("a");
        let b = sched.register("b");
        assert_ne!(a, b);
        assert!(sched.is_registered(a));
        sched.unregister(a);
        sched.unregister(a);
        assert!(!sched.is_registered(a));
        assert!(sched.is_registered(b));
        assert_eq!(sched.subscriber_count(), 1);
    }

    #[test]
    fn hidden_scheduler_skips_frames() {
        let mut sched = HeadlessScheduler::default();
        let mut host = AnimationHost::new();
        sched.register("x");
        sched.set_visible(false);
        assert_eq!(sched.run(&mut host, 10, |_| FrameSignals::default()), 0);
        assert_eq!(sched.frames_skipped(), 10);
        sched.set_visible(true);
        assert_eq!(sched.run(&mut host, 4, |_| FrameSignals::default()), 4);
    }
}

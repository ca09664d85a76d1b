//! GRACIE Runtime - lifecycle and frame loop for the decorative animators
//!
//! Provides the building blocks between a host page and the particle engine:
//! - `AnimationClock` - monotonic clock with stall clamping
//! - `ScrollBridge` / `PointerBridge` - per-tick external signals
//! - `Animator` - mount / resize / tick / unmount lifecycle
//! - `RepaintScheduler` - frame subscription seam, with a headless driver
//! - `AnimationSystem` / `AnimationHost` - several layers sharing one clock
//! - Section transforms and the title reveal sequencer for the landing page

mod bridge;
mod clock;
mod lifecycle;
mod reveal;
mod scheduler;
mod sections;
mod system;

pub use bridge::{FrameSignals, PointerBridge, ScrollBridge};
pub use clock::{AnimationClock, MAX_FRAME_DELTA};
pub use lifecycle::{Animator, LifecycleState, Viewport};
pub use reveal::{TitleLetter, TitleReveal, TITLE_LETTERS, TITLE_WORDS};
pub use scheduler::{HeadlessScheduler, RepaintScheduler, SubscriptionId};
pub use sections::{
    analysis_anchor, landing_layers, section_layers, section_transforms, LayerSpec,
    SectionProgress, SectionTransform, ANALYSIS_SECTION, SECTION_COUNT,
};
pub use system::{AnimationHost, AnimationSystem};

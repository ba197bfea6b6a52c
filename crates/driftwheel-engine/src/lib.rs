//! Driftwheel Engine
//!
//! Core engines for a decorative, event-driven page layer:
//! - randomly places floating elements while avoiding host-declared
//!   exclusion zones and repetitive positions
//! - drives a prize-wheel spin with a pre-selected winner, a rotation
//!   that lands it under a fixed marker, and audio ticks synchronized to
//!   the easing of the visual transition
//!
//! Everything platform-facing (DOM, transforms, audio, canvas) is the
//! host's job: the engines consume a [`SceneProvider`] and a random
//! source and emit [`EngineEvent`] directives over a channel. The crate
//! exposes a minimal, documented API:
//! - [`PlacementEngine`] and [`SpinEngine`]: the pure cores
//! - [`RevealCycle`] and [`SpinController`]: cooperative runtimes
//!
//! Scheduling is tokio-based and time-virtualizable; tests run on a
//! paused clock with seeded RNGs.

pub mod easing;
pub mod geom;

mod controller;
mod events;
mod placement;
mod reveal;
mod scheduler;
mod spin;

pub use controller::SpinController;
pub use events::{EngineEvent, EventReceiver, EventSender, FloatStyle, channel};
pub use placement::{Placement, PlacementEngine, PlacementRecord, Viewport};
pub use reveal::{InteractionFlags, RevealCycle, SceneProvider};
pub use scheduler::{Liveness, run_after, run_after_if};
pub use spin::{SpinEngine, SpinPlan};

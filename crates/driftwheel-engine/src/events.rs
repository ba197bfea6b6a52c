//! Events delivered to the host.
//!
//! The engines never touch a DOM, a canvas, or an audio device; they emit
//! directives over an unbounded channel and the host applies them as
//! transforms, fades, and audio cues.

use tokio::sync::mpsc;

use crate::placement::Placement;

/// Per-element float animation parameters, assigned once at setup.
///
/// `delay_s` is negative or zero: the host starts the loop that far into
/// its cycle so elements drift out of phase with each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatStyle {
    /// Length of one float loop, in seconds.
    pub duration_s: f64,
    /// Start offset into the loop, in seconds (non-positive).
    pub delay_s: f64,
}

/// A directive for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// Position an element and fade it in.
    Reveal {
        /// Element index.
        element: usize,
        /// Where to put it.
        placement: Placement,
        /// Its float animation parameters.
        float: FloatStyle,
    },
    /// Fade an element out.
    Hide {
        /// Element index.
        element: usize,
    },
    /// Animate the wheel to a new cumulative rotation over `duration_ms`.
    RotateTo {
        /// Target cumulative rotation, in degrees.
        degrees: f64,
        /// Transition length, in milliseconds.
        duration_ms: u64,
    },
    /// Play one audio tick.
    Tick {
        /// Position of the tick within the spin's schedule.
        index: usize,
    },
    /// The spin is over; surface the winner.
    SpinFinished {
        /// Index of the winning segment.
        winner_index: usize,
    },
}

/// Sending half of the host event channel.
pub type EventSender = mpsc::UnboundedSender<EngineEvent>;
/// Receiving half of the host event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

/// Create the host event channel.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

//! Reveal cycle: floats elements in one at a time, forever.
//!
//! Each step queries the host for the live viewport and exclusion zones,
//! asks the placement engine for a spot, and reveals the next element
//! while the previous one is still visible. An element is hidden a fixed
//! linger after its successor appears, unless the host has flagged it as
//! being interacted with, in which case the hide re-checks periodically
//! until the interaction ends.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use config::RevealSettings;
use rand::{Rng, seq::SliceRandom};
use tokio::{
    task::JoinHandle,
    time::{self, Duration},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    events::{EngineEvent, EventSender, FloatStyle},
    geom::Rect,
    placement::{PlacementEngine, Viewport},
};

/// Live view of the page chrome, queried immediately before each
/// placement so moved or resized UI is reflected. Hidden or absent UI
/// elements simply contribute no exclusion zone.
pub trait SceneProvider: Send + Sync {
    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;
    /// Rectangles to avoid, already expanded by the safety margin.
    fn exclusion_zones(&self) -> Vec<Rect>;
}

/// Per-element interaction flags shared between the host and the cycle's
/// scheduled hide tasks. While a flag is set the element's hide is
/// deferred; the flag is owned state, not a captured closure variable, so
/// any task can consult it at fire time.
#[derive(Clone, Debug)]
pub struct InteractionFlags(Arc<Vec<AtomicBool>>);

impl InteractionFlags {
    fn new(count: usize) -> Self {
        Self(Arc::new((0..count).map(|_| AtomicBool::new(false)).collect()))
    }

    /// Mark an element as being hovered or dragged.
    pub fn set(&self, element: usize, interacting: bool) {
        if let Some(flag) = self.0.get(element) {
            flag.store(interacting, Ordering::SeqCst);
        }
    }

    /// Whether an element is currently being interacted with.
    pub fn is_interacting(&self, element: usize) -> bool {
        self.0
            .get(element)
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}

/// The reveal cycle runtime.
///
/// Precondition: at least one element.
pub struct RevealCycle {
    placement: PlacementEngine,
    settings: RevealSettings,
    provider: Arc<dyn SceneProvider>,
    events: EventSender,
    element_count: usize,
    flags: InteractionFlags,
    stop: CancellationToken,
}

impl RevealCycle {
    /// Build a cycle over `element_count` floating elements.
    pub fn new(
        element_count: usize,
        placement: PlacementEngine,
        settings: RevealSettings,
        provider: Arc<dyn SceneProvider>,
        events: EventSender,
    ) -> Self {
        debug_assert!(element_count > 0);
        Self {
            placement,
            settings,
            provider,
            events,
            element_count,
            flags: InteractionFlags::new(element_count),
            stop: CancellationToken::new(),
        }
    }

    /// Interaction flags to hand to the host's input wiring.
    pub fn interaction_flags(&self) -> InteractionFlags {
        self.flags.clone()
    }

    /// Token that stops the reveal loop. Hide tasks already scheduled
    /// still fire; only new reveals stop.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Start the cycle on the current runtime.
    ///
    /// Elements are revealed in a shuffled order which then repeats;
    /// float styles are assigned once per element up front. The loop ends
    /// when the stop token fires or the host drops its receiver.
    pub fn spawn<R>(mut self, mut rng: R) -> JoinHandle<()>
    where
        R: Rng + Send + 'static,
    {
        let mut order: Vec<usize> = (0..self.element_count).collect();
        order.shuffle(&mut rng);
        let floats: Vec<FloatStyle> = (0..self.element_count)
            .map(|_| FloatStyle {
                duration_s: sample(
                    &mut rng,
                    self.settings.float_duration_min_s,
                    self.settings.float_duration_max_s,
                ),
                delay_s: -sample(&mut rng, 0.0, self.settings.float_delay_span_s),
            })
            .collect();
        debug!(elements = self.element_count, ?order, "reveal cycle starting");

        tokio::spawn(async move {
            time::sleep(Duration::from_millis(self.settings.initial_delay_ms)).await;

            let mut cursor = 0usize;
            loop {
                if self.stop.is_cancelled() {
                    trace!("reveal cycle stopped");
                    return;
                }
                let element = order[cursor % order.len()];
                cursor += 1;

                let viewport = self.provider.viewport();
                let zones = self.provider.exclusion_zones();
                let placement = self.placement.find_placement(&mut rng, &zones, viewport);
                if self
                    .events
                    .send(EngineEvent::Reveal {
                        element,
                        placement,
                        float: floats[element],
                    })
                    .is_err()
                {
                    trace!("host receiver dropped, reveal cycle ending");
                    return;
                }

                // The next element appears while this one is still
                // visible; the hide below starts counting from that
                // moment.
                let next_delay = if self.settings.next_delay_min_ms < self.settings.next_delay_max_ms
                {
                    rng.gen_range(
                        self.settings.next_delay_min_ms..self.settings.next_delay_max_ms,
                    )
                } else {
                    self.settings.next_delay_min_ms
                };
                tokio::select! {
                    _ = self.stop.cancelled() => {
                        trace!("reveal cycle stopped");
                        return;
                    }
                    _ = time::sleep(Duration::from_millis(next_delay)) => {}
                }

                spawn_hide(
                    element,
                    self.settings,
                    self.flags.clone(),
                    self.events.clone(),
                );
            }
        })
    }
}

/// Uniform sample from `[min, max)`, tolerating a degenerate range.
fn sample<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max { rng.gen_range(min..max) } else { min }
}

/// Hide `element` after the linger, deferring while it is interacted
/// with. Checked at fire time, never cancelled.
fn spawn_hide(
    element: usize,
    settings: RevealSettings,
    flags: InteractionFlags,
    events: EventSender,
) {
    tokio::spawn(async move {
        time::sleep(Duration::from_millis(settings.linger_ms)).await;
        while flags.is_interacting(element) {
            trace!(element, "hide deferred, element interacting");
            time::sleep(Duration::from_millis(settings.interact_recheck_ms)).await;
        }
        let _ = events.send(EngineEvent::Hide { element });
    });
}

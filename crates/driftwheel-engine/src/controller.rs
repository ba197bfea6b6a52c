//! Spin lifecycle: `Idle -> Spinning -> Idle`.
//!
//! Winner selection and the rotation commit happen synchronously inside
//! the trigger call, before any tick is scheduled, so no tick or
//! completion callback can ever observe a half-applied spin. Re-entry
//! while spinning is ignored; there is no cancellation path.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use tokio::time::Duration;
use tracing::{debug, trace};

use crate::{
    events::{EngineEvent, EventSender},
    scheduler::{Liveness, run_after, run_after_if},
    spin::{SpinEngine, SpinPlan},
};

/// Drives the spin engine through its lifecycle and emits host events.
///
/// Must be used from within a tokio runtime; triggering schedules tick
/// and completion tasks on it.
#[derive(Clone)]
pub struct SpinController {
    engine: Arc<Mutex<SpinEngine>>,
    spinning: Liveness,
    events: EventSender,
}

impl SpinController {
    /// Wrap a spin engine and bind it to the host event channel.
    pub fn new(engine: SpinEngine, events: EventSender) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            spinning: Liveness::default(),
            events,
        }
    }

    /// Whether a spin is currently in progress.
    pub fn is_spinning(&self) -> bool {
        self.spinning.is_live()
    }

    /// Cumulative rotation applied so far, in degrees.
    pub fn rotation(&self) -> f64 {
        self.engine.lock().rotation()
    }

    /// Trigger a spin with a uniformly random winner.
    ///
    /// Returns `None` (and does nothing) while a spin is already in
    /// progress.
    pub fn trigger<R: Rng>(&self, rng: &mut R) -> Option<SpinPlan> {
        if !self.spinning.try_acquire() {
            trace!("spin trigger ignored, already spinning");
            return None;
        }
        let plan = self.engine.lock().compute_spin(rng);
        self.run(plan)
    }

    /// Trigger a spin with a pre-selected winner.
    ///
    /// Same lifecycle as [`SpinController::trigger`]; used by hosts that
    /// choose the outcome upfront.
    pub fn trigger_with_winner(&self, winner_index: usize) -> Option<SpinPlan> {
        if !self.spinning.try_acquire() {
            trace!("spin trigger ignored, already spinning");
            return None;
        }
        let plan = self.engine.lock().plan_for(winner_index);
        self.run(plan)
    }

    fn run(&self, plan: SpinPlan) -> Option<SpinPlan> {
        debug!(
            winner_index = plan.winner_index,
            new_rotation = plan.new_rotation,
            ticks = plan.ticks.len(),
            "spin started"
        );
        let _ = self.events.send(EngineEvent::RotateTo {
            degrees: plan.new_rotation,
            duration_ms: plan.duration_ms,
        });

        for (index, &at_ms) in plan.ticks.iter().enumerate() {
            let events = self.events.clone();
            run_after_if(
                Duration::from_secs_f64(at_ms / 1000.0),
                &self.spinning,
                move || {
                    let _ = events.send(EngineEvent::Tick { index });
                },
            );
        }

        // The return to Idle is scheduled unconditionally: it must not
        // depend on any collaborator (or even the host still listening).
        let events = self.events.clone();
        let spinning = self.spinning.clone();
        let winner_index = plan.winner_index;
        run_after(Duration::from_millis(plan.duration_ms), move || {
            spinning.release();
            let _ = events.send(EngineEvent::SpinFinished { winner_index });
        });

        Some(plan)
    }
}

//! Collision-avoidant random placement.
//!
//! Finds a spot for the next floating element that neither overlaps any
//! host-supplied exclusion zone nor sits too close to recent placements.
//! The search is greedy and randomized with a fixed attempt budget; when
//! it is exhausted a deterministic corner rotation guarantees termination
//! and visual variety even under saturation.

use std::collections::VecDeque;

use config::PlacementSettings;
use rand::Rng;
use tracing::{debug, trace};

use crate::geom::{Point, Rect};

/// Viewport dimensions as reported by the host.
///
/// Queried live per placement call; ranges and estimated element sizes are
/// derived from it each time, never cached, so mid-session resizes are
/// picked up automatically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// A previously accepted (or fallback) placement, kept as short-term
/// memory for the separation check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRecord {
    /// Center of the placed element's estimated footprint.
    pub center: Point,
    /// Estimated width at placement time.
    pub width: f64,
    /// Estimated height at placement time.
    pub height: f64,
}

/// Result of a placement search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Left position in viewport percent.
    pub left_pct: i32,
    /// Top position in viewport percent.
    pub top_pct: i32,
    /// Random tilt the host applies as a rotation, in degrees.
    pub tilt_deg: i32,
    /// False when the search was exhausted and a fallback corner was used.
    pub accepted: bool,
}

/// The placement engine. Owns the bounded placement history and the call
/// counter that drives the fallback corner rotation.
pub struct PlacementEngine {
    settings: PlacementSettings,
    history: VecDeque<PlacementRecord>,
    calls: u64,
}

impl PlacementEngine {
    /// Create an engine with the given tuning.
    pub fn new(settings: PlacementSettings) -> Self {
        Self {
            settings,
            history: VecDeque::new(),
            calls: 0,
        }
    }

    /// Recent placements, oldest first. At most `history_cap` entries.
    pub fn history(&self) -> &VecDeque<PlacementRecord> {
        &self.history
    }

    /// Total placement calls so far (accepted and fallback).
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Find a position for the next element.
    ///
    /// `zones` are exclusion rectangles already expanded by the host's
    /// safety margin. Zero zones means the first candidate is accepted
    /// (subject to the separation check); an empty history passes the
    /// separation check vacuously.
    pub fn find_placement<R: Rng>(
        &mut self,
        rng: &mut R,
        zones: &[Rect],
        viewport: Viewport,
    ) -> Placement {
        let call = self.calls;
        self.calls += 1;

        let narrow = viewport.width < self.settings.narrow_below_px;
        let mode = if narrow {
            &self.settings.narrow
        } else {
            &self.settings.wide
        };
        let est_width = {
            let w = mode.est_width_frac * viewport.width;
            match mode.est_width_max_px {
                Some(cap) => w.min(cap),
                None => w,
            }
        };
        let est_height = mode.est_height_px;

        for attempt in 0..self.settings.attempt_budget {
            let left_pct = rng.gen_range(mode.left_pct.0..=mode.left_pct.1);
            let top_pct = rng.gen_range(mode.top_pct.0..=mode.top_pct.1);
            let candidate = Rect::from_origin_size(
                f64::from(left_pct) / 100.0 * viewport.width,
                f64::from(top_pct) / 100.0 * viewport.height,
                est_width,
                est_height,
            );

            if zones.iter().any(|zone| candidate.intersects(zone)) {
                trace!(attempt, left_pct, top_pct, "candidate overlaps a zone");
                continue;
            }

            let center = candidate.center();
            if self
                .history
                .iter()
                .any(|rec| center.distance(rec.center) < mode.min_separation_px)
            {
                trace!(attempt, left_pct, top_pct, "candidate too close to recent placement");
                continue;
            }

            self.remember(PlacementRecord {
                center,
                width: est_width,
                height: est_height,
            });
            debug!(attempt, left_pct, top_pct, narrow, "placement found");
            return Placement {
                left_pct,
                top_pct,
                tilt_deg: self.roll_tilt(rng),
                accepted: true,
            };
        }

        // Search exhausted: rotate through the corner presets, indexed by
        // the call counter so consecutive fallbacks land in different
        // corners. Still recorded in history with placeholder dimensions.
        let corners = &self.settings.fallback_corners;
        let (left_pct, top_pct) = corners[(call % corners.len() as u64) as usize];
        let size = self.settings.fallback_size_px;
        let rect = Rect::from_origin_size(
            f64::from(left_pct) / 100.0 * viewport.width,
            f64::from(top_pct) / 100.0 * viewport.height,
            size,
            size,
        );
        self.remember(PlacementRecord {
            center: rect.center(),
            width: size,
            height: size,
        });
        debug!(left_pct, top_pct, "placement search exhausted, using fallback corner");
        Placement {
            left_pct,
            top_pct,
            tilt_deg: self.roll_tilt(rng),
            accepted: false,
        }
    }

    fn remember(&mut self, record: PlacementRecord) {
        self.history.push_back(record);
        while self.history.len() > self.settings.history_cap {
            self.history.pop_front();
        }
    }

    fn roll_tilt<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.gen_range(self.settings.tilt_min_deg..self.settings.tilt_max_deg)
    }
}

//! Unified configuration types for driftwheel.
//!
//! All engine tuning lives here: placement search ranges and thresholds,
//! spin timing, and the reveal-cycle cadence. Every field has a serde
//! default matching the shipped behavior, so an empty config file (or no
//! file at all) yields a fully working setup. Values are loaded from RON
//! via [`load_from_path`].

use serde::{Deserialize, Serialize};

mod defaults;
mod error;
mod loader;

pub use error::{Error, Result};
pub use loader::{from_str, load_from_path};

use defaults::*;

/// Per-viewport-mode placement tuning.
///
/// A mode bundles the percentage ranges candidates are drawn from, the
/// estimated element footprint used for collision tests, and the minimum
/// center separation from recent placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeSettings {
    /// Inclusive range for the left coordinate, in viewport percent.
    pub left_pct: (i32, i32),
    /// Inclusive range for the top coordinate, in viewport percent.
    pub top_pct: (i32, i32),
    /// Minimum distance between an accepted candidate's center and any
    /// recent placement's center, in pixels.
    pub min_separation_px: f64,
    /// Estimated element width as a fraction of the viewport width.
    pub est_width_frac: f64,
    /// Optional cap on the estimated width, in pixels.
    #[serde(default)]
    pub est_width_max_px: Option<f64>,
    /// Estimated element height, in pixels.
    pub est_height_px: f64,
}

impl ModeSettings {
    fn wide() -> Self {
        Self {
            left_pct: WIDE_LEFT_PCT,
            top_pct: WIDE_TOP_PCT,
            min_separation_px: WIDE_MIN_SEPARATION_PX,
            est_width_frac: WIDE_EST_WIDTH_FRAC,
            est_width_max_px: Some(WIDE_EST_WIDTH_MAX_PX),
            est_height_px: WIDE_EST_HEIGHT_PX,
        }
    }

    fn narrow() -> Self {
        Self {
            left_pct: NARROW_LEFT_PCT,
            top_pct: NARROW_TOP_PCT,
            min_separation_px: NARROW_MIN_SEPARATION_PX,
            est_width_frac: NARROW_EST_WIDTH_FRAC,
            est_width_max_px: None,
            est_height_px: NARROW_EST_HEIGHT_PX,
        }
    }
}

/// Placement engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementSettings {
    /// Viewports narrower than this many pixels use the narrow mode.
    pub narrow_below_px: f64,
    /// Safety margin added around UI element bounds when hosts build
    /// exclusion zones.
    pub exclusion_margin_px: f64,
    /// Random candidates tried before giving up on the search.
    pub attempt_budget: u32,
    /// Recent placements remembered for the separation check.
    pub history_cap: usize,
    /// Lower bound (inclusive) of the random tilt, in degrees.
    pub tilt_min_deg: i32,
    /// Upper bound (exclusive) of the random tilt, in degrees.
    pub tilt_max_deg: i32,
    /// Corner presets cycled through when the search is exhausted, as
    /// (left, top) viewport percentages.
    pub fallback_corners: Vec<(i32, i32)>,
    /// Placeholder square side recorded in history for fallback
    /// placements, in pixels.
    pub fallback_size_px: f64,
    /// Tuning for wide viewports.
    pub wide: ModeSettings,
    /// Tuning for narrow viewports.
    pub narrow: ModeSettings,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            narrow_below_px: default_narrow_below_px(),
            exclusion_margin_px: default_exclusion_margin_px(),
            attempt_budget: default_attempt_budget(),
            history_cap: default_history_cap(),
            tilt_min_deg: default_tilt_min_deg(),
            tilt_max_deg: default_tilt_max_deg(),
            fallback_corners: default_fallback_corners(),
            fallback_size_px: default_fallback_size_px(),
            wide: ModeSettings::wide(),
            narrow: ModeSettings::narrow(),
        }
    }
}

/// Spin engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpinSettings {
    /// Angle of the fixed on-screen marker the winner aligns with.
    pub marker_angle_deg: f64,
    /// Cosmetic full rotations added on top of the alignment rotation.
    pub extra_spins: u32,
    /// Length of the visual transition, in milliseconds. Tick timing is
    /// derived from this.
    pub duration_ms: u64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            marker_angle_deg: default_marker_angle_deg(),
            extra_spins: default_extra_spins(),
            duration_ms: default_spin_duration_ms(),
        }
    }
}

/// Reveal cycle cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealSettings {
    /// Delay before the first reveal, in milliseconds.
    pub initial_delay_ms: u64,
    /// Lower bound of the delay before the next element is revealed.
    pub next_delay_min_ms: u64,
    /// Upper bound (exclusive) of the delay before the next element.
    pub next_delay_max_ms: u64,
    /// How long a revealed element lingers after its successor appears.
    pub linger_ms: u64,
    /// Re-check period while an element is being interacted with.
    pub interact_recheck_ms: u64,
    /// Lower bound of the per-element float animation duration, seconds.
    pub float_duration_min_s: f64,
    /// Upper bound of the per-element float animation duration, seconds.
    pub float_duration_max_s: f64,
    /// Span of the random negative animation start offset, seconds.
    pub float_delay_span_s: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_reveal_initial_delay_ms(),
            next_delay_min_ms: default_reveal_next_delay_min_ms(),
            next_delay_max_ms: default_reveal_next_delay_max_ms(),
            linger_ms: default_reveal_linger_ms(),
            interact_recheck_ms: default_reveal_recheck_ms(),
            float_duration_min_s: default_float_duration_min_s(),
            float_duration_max_s: default_float_duration_max_s(),
            float_delay_span_s: default_float_delay_span_s(),
        }
    }
}

/// Top-level configuration consumed by the engines and the demo host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Placement engine tuning.
    pub placement: PlacementSettings,
    /// Spin engine tuning.
    pub spin: SpinSettings,
    /// Reveal cycle cadence.
    pub reveal: RevealSettings,
}

impl Config {
    /// Check field combinations the engines cannot run with.
    ///
    /// Called by the loader after parsing; hosts constructing a `Config`
    /// in code should call it themselves before handing it to an engine.
    pub fn validate(&self) -> Result<()> {
        let p = &self.placement;
        if p.attempt_budget == 0 {
            return Err(Error::Invalid("placement.attempt_budget must be > 0".into()));
        }
        if p.history_cap == 0 {
            return Err(Error::Invalid("placement.history_cap must be > 0".into()));
        }
        if p.fallback_corners.is_empty() {
            return Err(Error::Invalid(
                "placement.fallback_corners must not be empty".into(),
            ));
        }
        if p.tilt_min_deg >= p.tilt_max_deg {
            return Err(Error::Invalid(
                "placement.tilt_min_deg must be below tilt_max_deg".into(),
            ));
        }
        for (name, mode) in [("wide", &p.wide), ("narrow", &p.narrow)] {
            if mode.left_pct.0 > mode.left_pct.1 || mode.top_pct.0 > mode.top_pct.1 {
                return Err(Error::Invalid(format!(
                    "placement.{name}: percentage ranges must be min <= max"
                )));
            }
        }
        if self.spin.extra_spins == 0 {
            return Err(Error::Invalid("spin.extra_spins must be > 0".into()));
        }
        if self.spin.duration_ms == 0 {
            return Err(Error::Invalid("spin.duration_ms must be > 0".into()));
        }
        let r = &self.reveal;
        if r.next_delay_min_ms > r.next_delay_max_ms {
            return Err(Error::Invalid(
                "reveal.next_delay_min_ms must be <= next_delay_max_ms".into(),
            ));
        }
        if r.float_duration_min_s > r.float_duration_max_s {
            return Err(Error::Invalid(
                "reveal.float_duration_min_s must be <= float_duration_max_s".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_shipped_tuning() {
        let cfg = Config::default();
        assert_eq!(cfg.placement.attempt_budget, 100);
        assert_eq!(cfg.placement.history_cap, 4);
        assert_eq!(cfg.placement.fallback_corners.len(), 4);
        assert_eq!(cfg.placement.wide.left_pct, (2, 68));
        assert_eq!(cfg.placement.narrow.top_pct, (5, 60));
        assert_eq!(cfg.spin.marker_angle_deg, 270.0);
        assert_eq!(cfg.spin.extra_spins, 5);
        assert_eq!(cfg.spin.duration_ms, 4000);
        assert_eq!(cfg.reveal.linger_ms, 4000);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = from_str("(spin: (extra_spins: 8))").unwrap();
        assert_eq!(cfg.spin.extra_spins, 8);
        assert_eq!(cfg.spin.duration_ms, 4000);
        assert_eq!(cfg.placement.attempt_budget, 100);
    }

    #[test]
    fn zero_attempt_budget_rejected() {
        let err = from_str("(placement: (attempt_budget: 0))").unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut cfg = Config::default();
        cfg.placement.wide.left_pct = (68, 2);
        assert!(cfg.validate().is_err());
    }
}

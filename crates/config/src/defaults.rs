//! Defaults and constants for engine configuration.
//!
//! Every value here mirrors a tunable the engines consume; none of them are
//! hard invariants. Hosts override them via a RON config file.

// Viewport classification
pub(crate) const NARROW_BELOW_PX: f64 = 768.0;

// Placement search
pub(crate) const EXCLUSION_MARGIN_PX: f64 = 10.0;
pub(crate) const ATTEMPT_BUDGET: u32 = 100;
pub(crate) const HISTORY_CAP: usize = 4;
pub(crate) const TILT_MIN_DEG: i32 = -20;
pub(crate) const TILT_MAX_DEG: i32 = 20;
pub(crate) const FALLBACK_SIZE_PX: f64 = 200.0;

// Wide-viewport placement mode
pub(crate) const WIDE_LEFT_PCT: (i32, i32) = (2, 68);
pub(crate) const WIDE_TOP_PCT: (i32, i32) = (10, 70);
pub(crate) const WIDE_MIN_SEPARATION_PX: f64 = 250.0;
pub(crate) const WIDE_EST_WIDTH_FRAC: f64 = 0.30;
pub(crate) const WIDE_EST_WIDTH_MAX_PX: f64 = 450.0;
pub(crate) const WIDE_EST_HEIGHT_PX: f64 = 200.0;

// Narrow-viewport placement mode
pub(crate) const NARROW_LEFT_PCT: (i32, i32) = (5, 15);
pub(crate) const NARROW_TOP_PCT: (i32, i32) = (5, 60);
pub(crate) const NARROW_MIN_SEPARATION_PX: f64 = 100.0;
pub(crate) const NARROW_EST_WIDTH_FRAC: f64 = 0.80;
pub(crate) const NARROW_EST_HEIGHT_PX: f64 = 150.0;

// Spin
pub(crate) const MARKER_ANGLE_DEG: f64 = 270.0;
pub(crate) const EXTRA_SPINS: u32 = 5;
pub(crate) const SPIN_DURATION_MS: u64 = 4000;

// Reveal cycle
pub(crate) const REVEAL_INITIAL_DELAY_MS: u64 = 1000;
pub(crate) const REVEAL_NEXT_DELAY_MIN_MS: u64 = 2000;
pub(crate) const REVEAL_NEXT_DELAY_MAX_MS: u64 = 3500;
pub(crate) const REVEAL_LINGER_MS: u64 = 4000;
pub(crate) const REVEAL_RECHECK_MS: u64 = 1000;
pub(crate) const FLOAT_DURATION_MIN_S: f64 = 3.0;
pub(crate) const FLOAT_DURATION_MAX_S: f64 = 5.0;
pub(crate) const FLOAT_DELAY_SPAN_S: f64 = 2.0;

// Serde default functions

pub(crate) const fn default_narrow_below_px() -> f64 {
    NARROW_BELOW_PX
}
pub(crate) const fn default_exclusion_margin_px() -> f64 {
    EXCLUSION_MARGIN_PX
}
pub(crate) const fn default_attempt_budget() -> u32 {
    ATTEMPT_BUDGET
}
pub(crate) const fn default_history_cap() -> usize {
    HISTORY_CAP
}
pub(crate) const fn default_tilt_min_deg() -> i32 {
    TILT_MIN_DEG
}
pub(crate) const fn default_tilt_max_deg() -> i32 {
    TILT_MAX_DEG
}
pub(crate) const fn default_fallback_size_px() -> f64 {
    FALLBACK_SIZE_PX
}

pub(crate) fn default_fallback_corners() -> Vec<(i32, i32)> {
    vec![(2, 15), (68, 15), (2, 70), (68, 70)]
}

pub(crate) const fn default_marker_angle_deg() -> f64 {
    MARKER_ANGLE_DEG
}
pub(crate) const fn default_extra_spins() -> u32 {
    EXTRA_SPINS
}
pub(crate) const fn default_spin_duration_ms() -> u64 {
    SPIN_DURATION_MS
}

pub(crate) const fn default_reveal_initial_delay_ms() -> u64 {
    REVEAL_INITIAL_DELAY_MS
}
pub(crate) const fn default_reveal_next_delay_min_ms() -> u64 {
    REVEAL_NEXT_DELAY_MIN_MS
}
pub(crate) const fn default_reveal_next_delay_max_ms() -> u64 {
    REVEAL_NEXT_DELAY_MAX_MS
}
pub(crate) const fn default_reveal_linger_ms() -> u64 {
    REVEAL_LINGER_MS
}
pub(crate) const fn default_reveal_recheck_ms() -> u64 {
    REVEAL_RECHECK_MS
}
pub(crate) const fn default_float_duration_min_s() -> f64 {
    FLOAT_DURATION_MIN_S
}
pub(crate) const fn default_float_duration_max_s() -> f64 {
    FLOAT_DURATION_MAX_S
}
pub(crate) const fn default_float_delay_span_s() -> f64 {
    FLOAT_DELAY_SPAN_S
}

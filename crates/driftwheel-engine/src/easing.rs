// Easing helpers shared by the spin engine and tick scheduling.
//
// The visual transition applied by hosts is a cubic ease-out; the inverse
// maps a progress fraction back to the time fraction at which the curve
// reaches it, which is how tick timestamps are derived analytically
// instead of polling the live transform.

/// Cubic ease-out: fast start, decelerating finish. Input clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Inverse of [`ease_out_cubic`]: the time fraction at which the eased
/// progress reaches `y`. Input clamped to [0, 1].
#[inline]
pub fn ease_out_cubic_inv(y: f64) -> f64 {
    let y = y.clamp(0.0, 1.0);
    1.0 - (1.0 - y).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn endpoints() {
        assert!((ease_out_cubic(0.0)).abs() < EPS);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < EPS);
        assert!((ease_out_cubic_inv(0.0)).abs() < EPS);
        assert!((ease_out_cubic_inv(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn inverse_round_trips() {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let back = ease_out_cubic_inv(ease_out_cubic(t));
            assert!((back - t).abs() < 1e-9, "t={t} back={back}");
        }
    }

    #[test]
    fn monotonic_and_decelerating() {
        let mut last = 0.0;
        let mut last_step = f64::INFINITY;
        for i in 1..=100 {
            let t = f64::from(i) / 100.0;
            let y = ease_out_cubic(t);
            let step = y - last;
            assert!(y >= last);
            assert!(step <= last_step + 1e-12);
            last = y;
            last_step = step;
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic_inv(1.5), 1.0);
    }
}

//! Feedback Calibration Rule
//!
//! After service the chef reports actual usage per item. The stored
//! confidence modifier for that (restaurant, menu item) pair is pulled
//! toward the observed error ratio with an exponentially-weighted
//! moving average, so future baselines trend toward reality.

use super::round_dp;

/// EWMA smoothing factor. Fixed across the system for predictability.
pub const SMOOTHING_ALPHA: f64 = 0.2;

/// Clamp band for the modifier. A single banquet night must never
/// destabilize future predictions; the modifier never leaves this band.
pub const MODIFIER_MIN: f64 = 0.3;
pub const MODIFIER_MAX: f64 = 3.0;

/// Compute the updated modifier from one feedback event.
///
/// `new = previous x (1 - alpha) + ratio x alpha`, with
/// `ratio = actual / predicted`. Returns None when `predicted <= 0`:
/// no signal can be extracted, and the caller treats it as a no-op
/// rather than an error (data-quality issue, not a request fault).
pub fn updated_modifier(previous: f64, predicted: i64, actual: i64) -> Option<f64> {
    if predicted <= 0 {
        return None;
    }

    let ratio = actual as f64 / predicted as f64;
    let blended = previous * (1.0 - SMOOTHING_ALPHA) + ratio * SMOOTHING_ALPHA;
    Some(round_dp(blended.clamp(MODIFIER_MIN, MODIFIER_MAX), 4))
}

/// Average accuracy over a feedback batch: `1 - sum|delta| / sum(predicted)`,
/// expressed as a percentage with 1 dp. Zero when nothing was predicted.
pub fn average_accuracy(total_abs_delta: i64, total_predicted: i64) -> f64 {
    if total_predicted <= 0 {
        return 0.0;
    }
    round_dp(
        (1.0 - total_abs_delta as f64 / total_predicted as f64) * 100.0,
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ewma_blends_toward_observed_ratio() {
        // baseline 30, modifier 0.90 -> predicted 27; chef used 33
        // r = 33/27 ~= 1.2222; new = 0.9*0.8 + 1.2222*0.2 ~= 0.9644
        let updated = updated_modifier(0.90, 27, 33).unwrap();
        assert!((updated - 0.9644).abs() < 1e-4);
    }

    #[test]
    fn outlier_never_leaves_clamp_band() {
        // 100x over-usage on a banquet night
        let updated = updated_modifier(1.0, 10, 1000).unwrap();
        assert_eq!(updated, MODIFIER_MAX);

        // and a dead service the other way
        let updated = updated_modifier(0.31, 100, 0).unwrap();
        assert!(updated >= MODIFIER_MIN);
    }

    #[test]
    fn zero_prediction_is_a_no_op() {
        assert!(updated_modifier(1.0, 0, 20).is_none());
        assert!(updated_modifier(1.0, -5, 20).is_none());
    }

    #[test]
    fn perfect_feedback_converges_to_one() {
        let mut modifier = 1.6;
        for _ in 0..50 {
            modifier = updated_modifier(modifier, 40, 40).unwrap();
        }
        assert!((modifier - 1.0).abs() < 0.01);
    }

    #[test]
    fn accuracy_percentage() {
        assert_eq!(average_accuracy(6, 27), 77.8);
        assert_eq!(average_accuracy(0, 50), 100.0);
        assert_eq!(average_accuracy(10, 0), 0.0);
    }
}

//! Difficulty ramp
//!
//! Speed grows linearly without bound. The spawn interval eases toward a
//! linearly shrinking target that is floored at `min_spawn_interval`.

use crate::tuning::Tuning;

/// Fall speed after `elapsed` seconds of run time
#[inline]
pub fn speed_at(tuning: &Tuning, elapsed: f32) -> f32 {
    tuning.base_speed + tuning.speed_ramp * elapsed
}

/// Spawn interval the ramp is heading toward after `elapsed` seconds
#[inline]
pub fn target_spawn_interval(tuning: &Tuning, elapsed: f32) -> f32 {
    (tuning.base_spawn_interval - tuning.spawn_ramp * elapsed).max(tuning.min_spawn_interval)
}

/// One exponential smoothing step from `current` toward `target`
#[inline]
pub fn smooth_interval(tuning: &Tuning, current: f32, target: f32) -> f32 {
    let keep = tuning.spawn_smoothing;
    current * keep + target * (1.0 - keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_ramp() {
        let tuning = Tuning::default();
        assert_eq!(speed_at(&tuning, 0.0), 140.0);
        assert!((speed_at(&tuning, 10.0) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_target_interval_floor() {
        let tuning = Tuning::default();
        assert!((target_spawn_interval(&tuning, 0.0) - 0.9).abs() < 1e-6);
        assert!((target_spawn_interval(&tuning, 20.0) - 0.7).abs() < 1e-5);
        // 0.9 - 0.01 * 55 = 0.35, so everything past that sits on the floor
        assert_eq!(target_spawn_interval(&tuning, 100.0), 0.35);
        assert_eq!(target_spawn_interval(&tuning, 10_000.0), 0.35);
    }

    #[test]
    fn test_smoothing_weights() {
        let tuning = Tuning::default();
        let next = smooth_interval(&tuning, 1.0, 0.0);
        assert!((next - 0.98).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_speed_non_decreasing(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(speed_at(&tuning, lo) <= speed_at(&tuning, hi));
        }

        #[test]
        fn prop_target_interval_non_increasing(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let early = target_spawn_interval(&tuning, lo);
            let late = target_spawn_interval(&tuning, hi);
            prop_assert!(late <= early);
            prop_assert!(late >= tuning.min_spawn_interval);
        }

        #[test]
        fn prop_smoothing_stays_between(current in 0.35f32..0.9, target in 0.35f32..0.9) {
            let tuning = Tuning::default();
            let next = smooth_interval(&tuning, current, target);
            prop_assert!(next >= current.min(target) - 1e-6);
            prop_assert!(next <= current.max(target) + 1e-6);
        }
    }
}

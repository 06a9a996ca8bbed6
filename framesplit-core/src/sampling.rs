//! Frame timestamp selection.
//!
//! Every video is sampled exactly three times. The sample points depend only
//! on the clip duration, using fixed buckets tuned for short clips, and are
//! capped so they never point past the end of the clip.

use crate::config::FRAMES_PER_VIDEO;

/// Distance kept from the end of the clip when capping a timestamp.
pub const TIMESTAMP_EPSILON: f64 = 0.001;

/// Raw sample points for a duration, before capping.
fn raw_timestamps(duration: f64) -> [f64; FRAMES_PER_VIDEO] {
    if duration < 2.0 {
        [0.3, 0.5, 1.0]
    } else if duration < 3.0 {
        [0.3, 1.0, 1.8]
    } else if duration < 4.0 {
        [0.5, 1.5, 2.8]
    } else if duration < 5.0 {
        [1.0, 2.0, 3.8]
    } else if duration < 6.0 {
        [1.0, 2.5, 4.8]
    } else {
        [0.0, 2.5, 5.0]
    }
}

/// Caps `timestamp` to `duration - TIMESTAMP_EPSILON`; a non-positive duration
/// degrades every timestamp to 0.0.
#[must_use]
pub fn cap_timestamp(timestamp: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    timestamp.min((duration - TIMESTAMP_EPSILON).max(0.0))
}

/// Chooses the three sample timestamps (seconds) for a clip of `duration` seconds.
///
/// The result keeps its order: ordinal 1, 2 and 3 map to the first, second and
/// third value. Coinciding values are not deduplicated, so very short clips get
/// three extraction attempts at the same instant.
///
/// # Examples
///
/// ```
/// use framesplit_core::sampling::choose_timestamps;
///
/// assert_eq!(choose_timestamps(1.5), [0.3, 0.5, 1.0]);
/// assert_eq!(choose_timestamps(0.0), [0.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn choose_timestamps(duration: f64) -> [f64; FRAMES_PER_VIDEO] {
    raw_timestamps(duration).map(|t| cap_timestamp(t, duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn bucket_values_for_long_enough_clips() {
        assert_close(choose_timestamps(1.5), [0.3, 0.5, 1.0]);
        assert_close(choose_timestamps(2.5), [0.3, 1.0, 1.8]);
        assert_close(choose_timestamps(3.5), [0.5, 1.5, 2.8]);
        assert_close(choose_timestamps(4.5), [1.0, 2.0, 3.8]);
        assert_close(choose_timestamps(5.5), [1.0, 2.5, 4.8]);
        assert_close(choose_timestamps(60.0), [0.0, 2.5, 5.0]);
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        assert_close(choose_timestamps(2.0), [0.3, 1.0, 1.8]);
        assert_close(choose_timestamps(3.0), [0.5, 1.5, 2.8]);
        assert_close(choose_timestamps(4.0), [1.0, 2.0, 3.8]);
        assert_close(choose_timestamps(5.0), [1.0, 2.5, 4.8]);
        assert_close(choose_timestamps(6.0), [0.0, 2.5, 5.0]);
    }

    #[test]
    fn caps_to_clip_length() {
        // 0.8s clip in the <2.0 bucket: 1.0 is past the end.
        assert_close(choose_timestamps(0.8), [0.3, 0.5, 0.799]);
        // 0.2s clip: everything collapses to the last usable instant.
        assert_close(choose_timestamps(0.2), [0.199, 0.199, 0.199]);
    }

    #[test]
    fn non_positive_duration_degrades_to_zero() {
        assert_eq!(choose_timestamps(0.0), [0.0, 0.0, 0.0]);
        assert_eq!(choose_timestamps(-3.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn never_exceeds_duration_or_goes_negative() {
        let mut d = -1.0;
        while d < 12.0 {
            let ts = choose_timestamps(d);
            assert_eq!(ts.len(), 3);
            for t in ts {
                assert!(t >= 0.0);
                if d > 0.0 {
                    assert!(t <= (d - TIMESTAMP_EPSILON).max(0.0) + EPS, "t={t} d={d}");
                } else {
                    assert_eq!(t, 0.0);
                }
            }
            d += 0.0625;
        }
    }

    #[test]
    fn tiny_clip_caps_at_zero() {
        // Shorter than epsilon: the cap bottoms out at 0.0.
        assert_eq!(choose_timestamps(0.0005), [0.0, 0.0, 0.0]);
    }
}

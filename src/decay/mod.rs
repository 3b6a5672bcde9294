use chrono::{DateTime, Utc};

/// Compute the present-day level of a boost that decays linearly from full
/// strength at `started_at` to zero at `expires_at`.
///
/// Returns `None` for a malformed window (non-positive duration, or `now`
/// before the window start); the caller skips the property without mutating
/// it. Levels are integer-truncated, so a boost can hit zero before its
/// expiry timestamp - accepted behavior, not a bug.
pub fn decayed_level(
    level: i32,
    started_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<i32> {
    let total_duration_ms = (expires_at - started_at).num_milliseconds();
    let elapsed_ms = (now - started_at).num_milliseconds();

    if total_duration_ms <= 0 || elapsed_ms < 0 {
        return None;
    }

    let percent_elapsed = elapsed_ms as f64 / total_duration_ms as f64;
    Some((level as f64 * (1.0 - percent_elapsed)).floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_level_unchanged_at_window_start() {
        assert_eq!(decayed_level(10, day(0), day(10), day(0)), Some(10));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 30% elapsed: floor(10 * 0.7) = 7
        assert_eq!(decayed_level(10, day(0), day(10), day(3)), Some(7));
        // 90% elapsed: floor(10 * 0.1) = 1
        assert_eq!(decayed_level(10, day(0), day(10), day(9)), Some(1));
    }

    #[test]
    fn test_low_level_reaches_zero_before_expiry() {
        // floor(1 * 0.5) = 0 with half the window still remaining
        assert_eq!(decayed_level(1, day(0), day(10), day(5)), Some(0));
    }

    #[test]
    fn test_decay_is_monotonic() {
        let mut previous = i32::MAX;
        for d in 0..20 {
            let level = decayed_level(20, day(0), day(20), day(d)).unwrap();
            assert!(level <= previous, "level rose from {} to {} at day {}", previous, level, d);
            previous = level;
        }
    }

    #[test]
    fn test_missed_ticks_self_correct() {
        // Whether or not the scheduler ran on days 2..=6, the day-7 level is
        // derived purely from absolute timestamps: floor(20 * (1 - 7/20)) = 13.
        assert_eq!(decayed_level(20, day(0), day(20), day(7)), Some(13));
    }

    #[test]
    fn test_malformed_zero_duration_window() {
        assert_eq!(decayed_level(10, day(5), day(5), day(6)), None);
    }

    #[test]
    fn test_malformed_inverted_window() {
        assert_eq!(decayed_level(10, day(10), day(0), day(5)), None);
    }

    #[test]
    fn test_malformed_negative_elapsed() {
        // Clock skew: now precedes the recorded start.
        assert_eq!(decayed_level(10, day(5), day(15), day(4)), None);
    }
}

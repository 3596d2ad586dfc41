use chrono::{Duration, NaiveDateTime};

/// Seconds left on a lock, 0 when there is none or it has passed.
pub fn remaining_lock_secs(lock_until: Option<NaiveDateTime>, now: NaiveDateTime) -> i64 {
    match lock_until {
        Some(until) if until > now => until.signed_duration_since(now).num_seconds(),
        _ => 0,
    }
}

/// Counter/lock state after one more failed attempt. Reaching the
/// threshold engages the lock and restarts the counter, so the window
/// is fresh once the lock passes.
pub fn after_failure(
    failed_attempts: i32,
    max_attempts: i32,
    lockout_minutes: i64,
    now: NaiveDateTime,
) -> (i32, Option<NaiveDateTime>) {
    let attempts = failed_attempts + 1;
    if attempts >= max_attempts {
        (0, Some(now + Duration::minutes(lockout_minutes)))
    } else {
        (attempts, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, 2).and_hms(h, m, s)
    }

    #[test]
    fn counts_up_below_threshold() {
        assert_eq!(after_failure(0, 3, 5, at(9, 0, 0)), (1, None));
        assert_eq!(after_failure(1, 3, 5, at(9, 0, 0)), (2, None));
    }

    #[test]
    fn third_failure_locks_for_five_minutes() {
        let (attempts, lock) = after_failure(2, 3, 5, at(9, 0, 0));
        assert_eq!(attempts, 0);
        assert_eq!(lock, Some(at(9, 5, 0)));
    }

    #[test]
    fn no_lock_means_no_wait() {
        assert_eq!(remaining_lock_secs(None, at(9, 0, 0)), 0);
    }

    #[test]
    fn expired_lock_means_no_wait() {
        assert_eq!(remaining_lock_secs(Some(at(8, 59, 59)), at(9, 0, 0)), 0);
    }

    #[test]
    fn active_lock_reports_remaining_seconds() {
        assert_eq!(remaining_lock_secs(Some(at(9, 5, 0)), at(9, 2, 30)), 150);
    }
}

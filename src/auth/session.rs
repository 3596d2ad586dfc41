use chrono::NaiveDateTime;

/// A session is dead once its last observed activity is older than the
/// inactivity window.
pub fn is_expired(last_active: NaiveDateTime, timeout_secs: i64, now: NaiveDateTime) -> bool {
    now.signed_duration_since(last_active).num_seconds() > timeout_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, 2).and_hms(h, m, s)
    }

    #[test]
    fn fresh_session_is_alive() {
        assert!(!is_expired(at(9, 0, 0), 900, at(9, 10, 0)));
    }

    #[test]
    fn boundary_is_still_alive() {
        assert!(!is_expired(at(9, 0, 0), 900, at(9, 15, 0)));
    }

    #[test]
    fn one_second_past_the_window_is_expired() {
        assert!(is_expired(at(9, 0, 0), 900, at(9, 15, 1)));
    }

    #[test]
    fn clock_skew_backwards_is_alive() {
        assert!(!is_expired(at(9, 10, 0), 900, at(9, 0, 0)));
    }
}

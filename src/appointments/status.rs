use chrono::NaiveDateTime;

use crate::models::appointments::{
    APPOINT_STATUS_CANCELLED, APPOINT_STATUS_COMPLETED, APPOINT_STATUS_NO_SHOW,
    APPOINT_STATUS_SCHEDULED,
};

/// Appointment status is never stored; it is read off the flags and the
/// clock. A slot that passed without being completed or cancelled is a
/// no-show.
pub fn derived_status(
    completed: bool,
    cancelled: bool,
    start_time: NaiveDateTime,
    now: NaiveDateTime,
) -> &'static str {
    if cancelled {
        APPOINT_STATUS_CANCELLED
    } else if completed {
        APPOINT_STATUS_COMPLETED
    } else if start_time > now {
        APPOINT_STATUS_SCHEDULED
    } else {
        APPOINT_STATUS_NO_SHOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, d).and_hms(h, 0, 0)
    }

    #[test]
    fn future_slot_is_scheduled() {
        assert_eq!(derived_status(false, false, at(3, 9), at(2, 9)), "scheduled");
    }

    #[test]
    fn past_slot_without_visit_is_no_show() {
        assert_eq!(derived_status(false, false, at(1, 9), at(2, 9)), "no-show");
    }

    #[test]
    fn completion_flag_wins_over_the_clock() {
        assert_eq!(derived_status(true, false, at(1, 9), at(2, 9)), "completed");
    }

    #[test]
    fn cancellation_wins_over_everything() {
        assert_eq!(derived_status(true, true, at(3, 9), at(2, 9)), "cancelled");
    }
}

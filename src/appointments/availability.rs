use chrono::{Datelike, NaiveDateTime};

use crate::models::clinics::ClinicHourData;

/// Weekly schedule rows use 0 = Monday .. 6 = Sunday.
pub fn weekday_index(at: NaiveDateTime) -> i32 {
    at.date().weekday().num_days_from_monday() as i32
}

/// True when the requested moment falls inside the clinic's configured
/// open window for that weekday. Days without a window (or without a
/// row at all) are closed.
pub fn is_open_at(hours: &[ClinicHourData], at: NaiveDateTime) -> bool {
    let weekday = weekday_index(at);
    hours.iter().any(|h| {
        h.weekday == weekday
            && match (h.open_time, h.close_time) {
                (Some(open), Some(close)) => at.time() >= open && at.time() < close,
                _ => false,
            }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn weekday_hours(weekday: i32) -> ClinicHourData {
        ClinicHourData {
            clinic_id: 1,
            weekday,
            open_time: Some(NaiveTime::from_hms(9, 0, 0)),
            close_time: Some(NaiveTime::from_hms(17, 0, 0)),
        }
    }

    // 2026-03-02 is a Monday.
    fn monday_at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, 2).and_hms(h, m, 0)
    }

    #[test]
    fn monday_is_index_zero() {
        assert_eq!(weekday_index(monday_at(9, 0)), 0);
    }

    #[test]
    fn inside_the_window() {
        let hours = vec![weekday_hours(0)];
        assert!(is_open_at(&hours, monday_at(9, 0)));
        assert!(is_open_at(&hours, monday_at(16, 59)));
    }

    #[test]
    fn closing_time_itself_is_outside() {
        let hours = vec![weekday_hours(0)];
        assert!(!is_open_at(&hours, monday_at(17, 0)));
    }

    #[test]
    fn other_weekdays_are_closed() {
        let hours = vec![weekday_hours(1)];
        assert!(!is_open_at(&hours, monday_at(10, 0)));
    }

    #[test]
    fn day_without_window_is_closed() {
        let hours = vec![ClinicHourData {
            clinic_id: 1,
            weekday: 0,
            open_time: None,
            close_time: None,
        }];
        assert!(!is_open_at(&hours, monday_at(10, 0)));
    }
}

#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub fn assert_gender_str(gender: &str) -> anyhow::Result<()> {
    if gender != "male" && gender != "female" && gender != "other" {
        bail!("Bad gender value")
    }
    Ok(())
}

pub fn parse_time_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDateTime> {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
    const TIME_FMT_SPECIAL: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

    let s = s.as_ref();
    if let Some('Z') = s.chars().last() {
        NaiveDateTime::parse_from_str(s, TIME_FMT_SPECIAL).context("Bad time format")
    } else {
        DateTime::parse_from_str(s, TIME_FMT)
            .context("Bad time format")
            .map(|t| t.naive_utc())
    }
}

pub fn parse_time_pair_str_opt<S1: AsRef<str>, S2: AsRef<str>>(
    start_time: Option<S1>,
    end_time: Option<S2>,
) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let time_min = parse_time_str("1901-01-01T00:00:00.0000Z")?;
    let time_max = parse_time_str("2901-01-01T00:00:00.0000Z")?;
    let start_time = start_time.map_or(Ok(time_min), |t| {
        parse_time_str(t).context("Bad start time format")
    })?;
    let end_time = end_time.map_or(Ok(time_max), |t| {
        parse_time_str(t).context("Bad end time format")
    })?;
    Ok((start_time, end_time))
}

pub fn get_time_pair_from_date_opt<S: AsRef<str>>(
    date: Option<S>,
) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    if let Some(date) = date {
        let date = parse_date_str(&date)?;
        Ok(day_bounds(date))
    } else {
        parse_time_pair_str_opt::<String, String>(None, None)
    }
}

pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (
        date.and_hms(0, 0, 0),
        date.and_hms(23, 59, 59),
    )
}

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref(), "%Y-%m-%d").context("Bad date format")
}

// Clinic open hours come in as "HH:MM".
pub fn parse_clock_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.as_ref(), "%H:%M").context("Bad clock format")
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn format_time_str_opt(time: &Option<NaiveDateTime>) -> String {
    match time {
        Some(time) => format_time_str(time),
        None => "".to_string(),
    }
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

pub fn get_str_pattern_opt<S: AsRef<str>>(s: Option<S>) -> String {
    match s {
        Some(s) => get_str_pattern(s),
        None => "%".to_string(),
    }
}

pub fn generate_login_token(id: &str, salt: &str) -> String {
    let seed = format!("{}:{}:{}", id, salt, Utc::now().timestamp_nanos());
    format!("{:x}", Blake2b::digest(seed.as_bytes()))
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Blake2b::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_and_offset_times() {
        let z = parse_time_str("2026-03-02T09:30:00.0000Z").unwrap();
        let offset = parse_time_str("2026-03-02T09:30:00.0000+00:00").unwrap();
        assert_eq!(z, offset);
    }

    #[test]
    fn rejects_garbage_time() {
        assert!(parse_time_str("yesterday").is_err());
    }

    #[test]
    fn open_interval_when_no_bounds_given() {
        let (start, end) = parse_time_pair_str_opt::<&str, &str>(None, None).unwrap();
        assert!(start < end);
    }

    #[test]
    fn date_expands_to_whole_day() {
        let (start, end) = get_time_pair_from_date_opt(Some("2026-03-02")).unwrap();
        assert_eq!(start, parse_date_str("2026-03-02").unwrap().and_hms(0, 0, 0));
        assert_eq!(end, parse_date_str("2026-03-02").unwrap().and_hms(23, 59, 59));
    }

    #[test]
    fn clock_parsing() {
        assert_eq!(parse_clock_str("08:30").unwrap(), NaiveTime::from_hms(8, 30, 0));
        assert!(parse_clock_str("8h30").is_err());
    }

    #[test]
    fn pattern_helpers() {
        assert_eq!(get_str_pattern("ann"), "%ann%");
        assert_eq!(get_str_pattern_opt::<String>(None), "%");
    }

    #[test]
    fn tokens_differ_per_user() {
        let a = generate_login_token("amy", "session");
        let b = generate_login_token("ben", "session");
        assert_ne!(a, b);
        assert_eq!(a.len(), 128);
    }

    #[test]
    fn gender_values() {
        assert!(assert_gender_str("female").is_ok());
        assert!(assert_gender_str("F").is_err());
    }

    #[test]
    fn password_hash_is_stable() {
        assert_eq!(hash_password("secret"), hash_password("secret"));
        assert_ne!(hash_password("secret"), hash_password("Secret"));
    }
}

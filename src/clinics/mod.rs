mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::{assert, get_db_conn, last_insert_id},
    models::{
        clinics::{ClinicData, ClinicHourData, NewClinic, UpdateClinic},
        users::ROLE_SUPER_ADMIN,
    },
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_clinic)
        .service(modify_clinic)
        .service(view_clinic)
        .service(search_clinic)
        .service(set_hours);
}

crate::post_funcs! {
    (add_clinic, "/add_clinic", AddClinicRequest, SimpleResponse),
    (modify_clinic, "/modify_clinic", ModifyClinicRequest, SimpleResponse),
    (view_clinic, "/view_clinic", ViewClinicRequest, ViewClinicResponse),
    (search_clinic, "/search_clinic", SearchClinicRequest, SearchClinicResponse),
    (set_hours, "/set_hours", SetHoursRequest, SimpleResponse),
}

// Turns the submitted weekly schedule into rows, rejecting malformed
// entries before anything touches the table.
fn build_week(clinic_id: u64, entries: &[HourEntry]) -> anyhow::Result<Vec<ClinicHourData>> {
    let mut seen = [false; 7];
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.weekday < 0 || entry.weekday > 6 {
            bail!("Weekday must be 0-6");
        }
        if seen[entry.weekday as usize] {
            bail!("Duplicate weekday");
        }
        seen[entry.weekday as usize] = true;

        let (open_time, close_time) = match (&entry.open, &entry.close) {
            (Some(open), Some(close)) => {
                let open = crate::utils::parse_clock_str(open)?;
                let close = crate::utils::parse_clock_str(close)?;
                if open >= close {
                    bail!("Open time must be before close time");
                }
                (Some(open), Some(close))
            }
            (None, None) => (None, None),
            _ => bail!("Open and close times must come together"),
        };
        rows.push(ClinicHourData {
            clinic_id,
            weekday: entry.weekday,
            open_time,
            close_time,
        });
    }
    Ok(rows)
}

async fn add_clinic_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddClinicRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::clinics;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;

    if info.clinic_name.trim().is_empty() {
        bail!("Clinic name is required");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            let data = NewClinic {
                clinic_name: info.clinic_name.trim().to_string(),
                address: info.address,
                telephone: info.telephone,
            };
            diesel::insert_into(clinics::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            let clinic_id: u64 = diesel::select(last_insert_id)
                .get_result(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "clinic_created",
                "clinic",
                &clinic_id.to_string(),
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn modify_clinic_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyClinicRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::clinics;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;
    assert::assert_clinic(&pool, info.clinic_id).await?;

    let clinic_id = info.clinic_id;
    let data = UpdateClinic {
        clinic_name: info.clinic_name,
        address: info.address,
        telephone: info.telephone,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            diesel::update(clinics::table.filter(clinics::clinic_id.eq(clinic_id)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "clinic_updated",
                "clinic",
                &clinic_id.to_string(),
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn view_clinic_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewClinicRequest>,
) -> anyhow::Result<ViewClinicResponse> {
    use crate::schema::{clinic_hours, clinics};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let clinic_id = info.clinic_id;
    let conn = get_db_conn(&pool)?;
    let (clinic, hours) = web::block(move || {
        let clinic = clinics::table
            .filter(clinics::clinic_id.eq(clinic_id))
            .get_result::<ClinicData>(&conn)
            .optional()
            .context("DB error")?;
        let clinic = match clinic {
            Some(clinic) => clinic,
            None => bail!("No such clinic"),
        };
        let hours = clinic_hours::table
            .filter(clinic_hours::clinic_id.eq(clinic_id))
            .order(clinic_hours::weekday.asc())
            .load::<ClinicHourData>(&conn)
            .context("DB error")?;
        Ok((clinic, hours))
    })
    .await?;

    Ok(ViewClinicResponse {
        success: true,
        err: "".to_string(),
        clinic_id: clinic.clinic_id,
        clinic_name: clinic.clinic_name,
        address: clinic.address,
        telephone: clinic.telephone,
        hours: hours
            .into_iter()
            .map(|row| HourItem {
                weekday: row.weekday,
                open: row
                    .open_time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                close: row
                    .close_time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
            })
            .collect(),
    })
}

async fn search_clinic_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchClinicRequest>,
) -> anyhow::Result<SearchClinicResponse> {
    use crate::schema::clinics;

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let name_pattern = crate::utils::get_str_pattern_opt(info.clinic_name);
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        clinics::table
            .filter(clinics::clinic_name.like(name_pattern))
            .order(clinics::clinic_name.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<ClinicData>(&conn)
    })
    .await
    .context("DB error")?;

    let clinics = rows
        .into_iter()
        .map(|data| SearchClinicItem {
            clinic_id: data.clinic_id,
            clinic_name: data.clinic_name,
            address: data.address,
            telephone: data.telephone,
        })
        .collect();

    Ok(SearchClinicResponse {
        success: true,
        err: "".to_string(),
        clinics,
    })
}

async fn set_hours_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SetHoursRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::clinic_hours;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;
    assert::assert_clinic(&pool, info.clinic_id).await?;

    let clinic_id = info.clinic_id;
    let rows = build_week(clinic_id, &info.hours)?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            diesel::delete(clinic_hours::table.filter(clinic_hours::clinic_id.eq(clinic_id)))
                .execute(&conn)
                .context("DB error")?;
            diesel::insert_into(clinic_hours::table)
                .values(&rows)
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "clinic_hours_updated",
                "clinic",
                &clinic_id.to_string(),
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weekday: i32, open: Option<&str>, close: Option<&str>) -> HourEntry {
        HourEntry {
            weekday,
            open: open.map(|s| s.to_string()),
            close: close.map(|s| s.to_string()),
        }
    }

    #[test]
    fn accepts_a_plain_week() {
        let rows = build_week(
            7,
            &[
                entry(0, Some("09:00"), Some("17:00")),
                entry(5, Some("09:00"), Some("12:30")),
                entry(6, None, None),
            ],
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[2].open_time.is_none());
    }

    #[test]
    fn rejects_inverted_window() {
        let res = build_week(7, &[entry(0, Some("17:00"), Some("09:00"))]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_half_open_entry() {
        let res = build_week(7, &[entry(0, Some("09:00"), None)]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_duplicate_weekday() {
        let res = build_week(
            7,
            &[
                entry(2, Some("09:00"), Some("17:00")),
                entry(2, Some("10:00"), Some("16:00")),
            ],
        );
        assert!(res.is_err());
    }

    #[test]
    fn rejects_out_of_range_weekday() {
        assert!(build_week(7, &[entry(7, None, None)]).is_err());
    }
}

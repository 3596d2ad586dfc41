mod requests;
mod responses;

use crate::{
    appointments::status::derived_status,
    auth::utils::get_session_user,
    database::{assert, get_db_conn},
    models::{
        appointments::Appointment, audit_logs::AuditLog, clinics::ClinicData,
        patients::PatientData, users::ROLE_SUPER_ADMIN,
    },
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(overview).service(physician_stats);
}

crate::post_funcs! {
    (overview, "/overview", OverviewRequest, OverviewResponse),
    (physician_stats, "/physician_stats", PhysicianStatsRequest, PhysicianStatsResponse),
}

async fn overview_impl(
    pool: web::Data<DbPool>,
    info: web::Json<OverviewRequest>,
) -> anyhow::Result<OverviewResponse> {
    use crate::schema::{appointments, audit_logs, clinics, patients};

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    let is_super_admin = user.role == ROLE_SUPER_ADMIN;

    let now = Utc::now().naive_utc();
    let (day_start, day_end) = crate::utils::day_bounds(now.date());

    let conn = get_db_conn(&pool)?;
    let (stats, upcoming, recent) = web::block(move || -> anyhow::Result<_> {
        let total_patients = patients::table
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;

        let today = appointments::table
            .filter(appointments::start_time.between(day_start, day_end))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let today_completed = appointments::table
            .filter(appointments::start_time.between(day_start, day_end))
            .filter(appointments::completed.eq(true))
            .filter(appointments::cancelled.eq(false))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let today_cancelled = appointments::table
            .filter(appointments::start_time.between(day_start, day_end))
            .filter(appointments::cancelled.eq(true))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let today_no_show = appointments::table
            .filter(appointments::start_time.between(day_start, day_end))
            .filter(appointments::completed.eq(false))
            .filter(appointments::cancelled.eq(false))
            .filter(appointments::start_time.le(now))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;

        let stats = vec![
            StatItem {
                label: "Registered patients".to_string(),
                value: total_patients,
            },
            StatItem {
                label: "Appointments today".to_string(),
                value: today,
            },
            StatItem {
                label: "Completed today".to_string(),
                value: today_completed,
            },
            StatItem {
                label: "Cancelled today".to_string(),
                value: today_cancelled,
            },
            StatItem {
                label: "No-shows today".to_string(),
                value: today_no_show,
            },
        ];

        let upcoming = appointments::table
            .inner_join(patients::table.on(appointments::pid.eq(patients::pid)))
            .inner_join(clinics::table.on(appointments::clinic_id.eq(clinics::clinic_id)))
            .filter(appointments::completed.eq(false))
            .filter(appointments::cancelled.eq(false))
            .filter(appointments::start_time.gt(now))
            .order(appointments::start_time.asc())
            .limit(6)
            .get_results::<(Appointment, PatientData, ClinicData)>(&conn)
            .context("DB error")?;

        // The activity feed mirrors the audit trail, which only the
        // super-admin may read.
        let recent = if is_super_admin {
            audit_logs::table
                .order(audit_logs::time.desc())
                .limit(10)
                .get_results::<AuditLog>(&conn)
                .context("DB error")?
        } else {
            Vec::new()
        };

        Ok((stats, upcoming, recent))
    })
    .await?;

    Ok(OverviewResponse {
        success: true,
        err: "".to_string(),
        stats,
        upcoming: upcoming.into_iter().map(|row| to_item(row, now)).collect(),
        recent_activity: recent
            .into_iter()
            .map(|data| ActivityItem {
                username: data.username,
                action: data.action,
                entity: data.entity,
                time: crate::utils::format_time_str(&data.time),
            })
            .collect(),
    })
}

async fn physician_stats_impl(
    pool: web::Data<DbPool>,
    info: web::Json<PhysicianStatsRequest>,
) -> anyhow::Result<PhysicianStatsResponse> {
    use crate::schema::{appointments, clinics, patients};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;
    assert::assert_physician(&pool, info.doctor.clone()).await?;

    let doctor = info.doctor;
    let now = Utc::now().naive_utc();

    let conn = get_db_conn(&pool)?;
    let (stats, recent, doctor) = web::block(move || -> anyhow::Result<_> {
        let total = appointments::table
            .filter(appointments::doctor.eq(&doctor))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let completed = appointments::table
            .filter(appointments::doctor.eq(&doctor))
            .filter(appointments::completed.eq(true))
            .filter(appointments::cancelled.eq(false))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let cancelled = appointments::table
            .filter(appointments::doctor.eq(&doctor))
            .filter(appointments::cancelled.eq(true))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;
        let upcoming = appointments::table
            .filter(appointments::doctor.eq(&doctor))
            .filter(appointments::completed.eq(false))
            .filter(appointments::cancelled.eq(false))
            .filter(appointments::start_time.gt(now))
            .count()
            .get_result::<i64>(&conn)
            .context("DB error")?;

        let stats = vec![
            StatItem {
                label: "Total appointments".to_string(),
                value: total,
            },
            StatItem {
                label: "Completed".to_string(),
                value: completed,
            },
            StatItem {
                label: "Cancelled".to_string(),
                value: cancelled,
            },
            StatItem {
                label: "Upcoming".to_string(),
                value: upcoming,
            },
        ];

        let recent = appointments::table
            .inner_join(patients::table.on(appointments::pid.eq(patients::pid)))
            .inner_join(clinics::table.on(appointments::clinic_id.eq(clinics::clinic_id)))
            .filter(appointments::doctor.eq(&doctor))
            .order(appointments::start_time.desc())
            .limit(8)
            .get_results::<(Appointment, PatientData, ClinicData)>(&conn)
            .context("DB error")?;

        Ok((stats, recent, doctor))
    })
    .await?;

    Ok(PhysicianStatsResponse {
        success: true,
        err: "".to_string(),
        doctor,
        stats,
        recent: recent.into_iter().map(|row| to_item(row, now)).collect(),
    })
}

fn to_item(
    (appo, patient, clinic): (Appointment, PatientData, ClinicData),
    now: chrono::NaiveDateTime,
) -> UpcomingItem {
    UpcomingItem {
        aid: appo.aid,
        patient_name: patient.name,
        doctor: appo.doctor,
        clinic_name: clinic.clinic_name,
        start_time: crate::utils::format_time_str(&appo.start_time),
        status: derived_status(appo.completed, appo.cancelled, appo.start_time, now).to_string(),
    }
}

pub mod availability;
pub mod status;

mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::{assert, get_db_conn, last_insert_id},
    models::{
        appointments::{
            Appointment, NewAppointment, APPOINT_STATUS_CANCELLED, APPOINT_STATUS_COMPLETED,
            APPOINT_STATUS_NO_SHOW, APPOINT_STATUS_SCHEDULED,
        },
        clinics::{ClinicData, ClinicHourData},
        patients::PatientData,
        users::ROLE_PHYSICIAN,
    },
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(schedule)
        .service(cancel_appoint)
        .service(complete_appoint)
        .service(search_appoint)
        .service(pending_reminders)
        .service(mark_reminded);
}

crate::post_funcs! {
    (schedule, "/schedule", ScheduleRequest, SimpleResponse),
    (cancel_appoint, "/cancel", CancelAppointRequest, SimpleResponse),
    (complete_appoint, "/complete", CompleteAppointRequest, SimpleResponse),
    (search_appoint, "/search", SearchAppointRequest, SearchAppointResponse),
    (pending_reminders, "/pending_reminders", PendingRemindersRequest, PendingRemindersResponse),
    (mark_reminded, "/mark_reminded", MarkRemindedRequest, SimpleResponse),
}

async fn schedule_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ScheduleRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{appointments, clinic_hours};

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;

    assert::assert_patient(&pool, info.pid).await?;
    assert::assert_physician(&pool, info.doctor.clone()).await?;
    assert::assert_clinic(&pool, info.clinic_id).await?;

    let start_time = crate::utils::parse_time_str(&info.start_time)?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let now = Utc::now().naive_utc();
            if start_time <= now {
                bail!("Cannot schedule in the past");
            }

            let hours = clinic_hours::table
                .filter(clinic_hours::clinic_id.eq(info.clinic_id))
                .load::<ClinicHourData>(&conn)
                .context("DB error")?;
            if !availability::is_open_at(&hours, start_time) {
                bail!("Clinic closed at that time");
            }

            let conflicts = appointments::table
                .filter(appointments::doctor.eq(&info.doctor))
                .filter(appointments::clinic_id.eq(info.clinic_id))
                .filter(appointments::start_time.eq(start_time))
                .filter(appointments::cancelled.eq(false))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if conflicts > 0 {
                bail!("Time slot already taken");
            }

            let data = NewAppointment {
                pid: info.pid,
                doctor: info.doctor.clone(),
                clinic_id: info.clinic_id,
                start_time,
                completed: false,
                cancelled: false,
                reminder_sent: false,
                notes: info.notes,
                created_at: now,
            };
            diesel::insert_into(appointments::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            let aid: u64 = diesel::select(last_insert_id)
                .get_result(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "appointment_scheduled",
                "appointment",
                &aid.to_string(),
                serde_json::json!({
                    "pid": info.pid,
                    "doctor": info.doctor,
                    "clinic_id": info.clinic_id,
                    "start_time": crate::utils::format_time_str(&start_time),
                })
                .to_string(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn cancel_appoint_impl(
    pool: web::Data<DbPool>,
    info: web::Json<CancelAppointRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;

    let aid = info.aid;
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let appo = appointments::table
                .filter(appointments::aid.eq(aid))
                .get_result::<Appointment>(&conn)
                .optional()
                .context("DB error")?;
            let appo = match appo {
                Some(appo) => appo,
                None => bail!("No such appointment"),
            };
            if appo.cancelled {
                bail!("Appointment already cancelled");
            }
            if appo.completed {
                bail!("Appointment already completed");
            }

            diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
                .set(appointments::cancelled.eq(true))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "appointment_cancelled",
                "appointment",
                &aid.to_string(),
                String::new(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn complete_appoint_impl(
    pool: web::Data<DbPool>,
    info: web::Json<CompleteAppointRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_PHYSICIAN])?;

    let aid = info.aid;
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let appo = appointments::table
                .filter(appointments::aid.eq(aid))
                .get_result::<Appointment>(&conn)
                .optional()
                .context("DB error")?;
            let appo = match appo {
                Some(appo) => appo,
                None => bail!("No such appointment"),
            };
            if appo.cancelled {
                bail!("Appointment already cancelled");
            }
            if appo.completed {
                bail!("Appointment already completed");
            }

            diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
                .set(appointments::completed.eq(true))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "appointment_completed",
                "appointment",
                &aid.to_string(),
                String::new(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn search_appoint_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchAppointRequest>,
) -> anyhow::Result<SearchAppointResponse> {
    use crate::schema::{appointments, clinics, patients};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let (start_time, end_time) = if info.date.is_some() {
        crate::utils::get_time_pair_from_date_opt(info.date)?
    } else {
        crate::utils::parse_time_pair_str_opt(info.start_time, info.end_time)?
    };

    if let Some(status) = &info.status {
        match status.as_str() {
            APPOINT_STATUS_SCHEDULED | APPOINT_STATUS_COMPLETED | APPOINT_STATUS_CANCELLED
            | APPOINT_STATUS_NO_SHOW => {}
            _ => bail!("Bad status value"),
        }
    }

    let pid = info.pid;
    let doctor = info.doctor;
    let clinic_id = info.clinic_id;
    let status = info.status;
    let (first_index, limit) = info.page.clamp();
    let now = Utc::now().naive_utc();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        let mut query = appointments::table
            .inner_join(patients::table.on(appointments::pid.eq(patients::pid)))
            .inner_join(clinics::table.on(appointments::clinic_id.eq(clinics::clinic_id)))
            .filter(appointments::start_time.between(start_time, end_time))
            .into_boxed();

        if let Some(pid) = pid {
            query = query.filter(appointments::pid.eq(pid));
        }
        if let Some(doctor) = doctor {
            query = query.filter(appointments::doctor.eq(doctor));
        }
        if let Some(clinic_id) = clinic_id {
            query = query.filter(appointments::clinic_id.eq(clinic_id));
        }
        // Every derived status is a condition over the stored flags
        // and the clock.
        match status.as_deref() {
            Some(APPOINT_STATUS_SCHEDULED) => {
                query = query
                    .filter(appointments::completed.eq(false))
                    .filter(appointments::cancelled.eq(false))
                    .filter(appointments::start_time.gt(now));
            }
            Some(APPOINT_STATUS_NO_SHOW) => {
                query = query
                    .filter(appointments::completed.eq(false))
                    .filter(appointments::cancelled.eq(false))
                    .filter(appointments::start_time.le(now));
            }
            Some(APPOINT_STATUS_COMPLETED) => {
                query = query
                    .filter(appointments::completed.eq(true))
                    .filter(appointments::cancelled.eq(false));
            }
            Some(APPOINT_STATUS_CANCELLED) => {
                query = query.filter(appointments::cancelled.eq(true));
            }
            _ => {}
        }

        query
            .order(appointments::start_time.desc())
            .offset(first_index)
            .limit(limit)
            .get_results::<(Appointment, PatientData, ClinicData)>(&conn)
    })
    .await
    .context("DB error")?;

    let appointments = rows
        .into_iter()
        .map(|(appo, patient, clinic)| SearchAppointItem {
            aid: appo.aid,
            pid: appo.pid,
            patient_name: patient.name,
            doctor: appo.doctor,
            clinic_id: appo.clinic_id,
            clinic_name: clinic.clinic_name,
            start_time: crate::utils::format_time_str(&appo.start_time),
            status: status::derived_status(appo.completed, appo.cancelled, appo.start_time, now)
                .to_string(),
            reminder_sent: appo.reminder_sent,
            notes: appo.notes,
        })
        .collect();

    Ok(SearchAppointResponse {
        success: true,
        err: "".to_string(),
        appointments,
    })
}

async fn pending_reminders_impl(
    pool: web::Data<DbPool>,
    info: web::Json<PendingRemindersRequest>,
) -> anyhow::Result<PendingRemindersResponse> {
    use crate::schema::{appointments, clinics, patients};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let hours_ahead = info.hours_ahead.unwrap_or(24).max(1).min(168);
    let now = Utc::now().naive_utc();
    let until = now + Duration::hours(hours_ahead);
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        appointments::table
            .inner_join(patients::table.on(appointments::pid.eq(patients::pid)))
            .inner_join(clinics::table.on(appointments::clinic_id.eq(clinics::clinic_id)))
            .filter(appointments::completed.eq(false))
            .filter(appointments::cancelled.eq(false))
            .filter(appointments::reminder_sent.eq(false))
            .filter(appointments::start_time.between(now, until))
            .order(appointments::start_time.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<(Appointment, PatientData, ClinicData)>(&conn)
    })
    .await
    .context("DB error")?;

    let reminders = rows
        .into_iter()
        .map(|(appo, patient, clinic)| ReminderItem {
            aid: appo.aid,
            patient_name: patient.name,
            telephone: patient.telephone,
            doctor: appo.doctor,
            clinic_name: clinic.clinic_name,
            start_time: crate::utils::format_time_str(&appo.start_time),
        })
        .collect();

    Ok(PendingRemindersResponse {
        success: true,
        err: "".to_string(),
        reminders,
    })
}

async fn mark_reminded_impl(
    pool: web::Data<DbPool>,
    info: web::Json<MarkRemindedRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;
    assert::assert_appointment(&pool, info.aid).await?;

    let aid = info.aid;
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
            .set(appointments::reminder_sent.eq(true))
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

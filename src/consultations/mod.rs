mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::{assert, get_db_conn, last_insert_id},
    models::{
        appointments::Appointment,
        consultations::{Consultation, NewConsultation},
        patients::PatientData,
        users::ROLE_PHYSICIAN,
    },
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_consultation).service(search_consultation);
}

crate::post_funcs! {
    (add_consultation, "/add_consultation", AddConsultationRequest, SimpleResponse),
    (search_consultation, "/search_consultation", SearchConsultationRequest, SearchConsultationResponse),
}

async fn add_consultation_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddConsultationRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{appointments, consultations, patients};

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_PHYSICIAN])?;
    assert::assert_patient(&pool, info.pid).await?;

    if info.symptoms.trim().is_empty() {
        bail!("Symptoms are required");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let now = Utc::now().naive_utc();

            // Recording the visit is what completes a scheduled slot.
            if let Some(aid) = info.aid {
                let appo = appointments::table
                    .filter(appointments::aid.eq(aid))
                    .get_result::<Appointment>(&conn)
                    .optional()
                    .context("DB error")?;
                let appo = match appo {
                    Some(appo) => appo,
                    None => bail!("No such appointment"),
                };
                if appo.pid != info.pid {
                    bail!("Appointment is for a different patient");
                }
                if appo.cancelled {
                    bail!("Appointment already cancelled");
                }
                if !appo.completed {
                    diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
                        .set(appointments::completed.eq(true))
                        .execute(&conn)
                        .context("DB error")?;
                }
            }

            let data = NewConsultation {
                pid: info.pid,
                aid: info.aid,
                doctor: user.username.clone(),
                symptoms: info.symptoms,
                diagnosis: info.diagnosis,
                prescription: info.prescription,
                time: now,
            };
            diesel::insert_into(consultations::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            let vid: u64 = diesel::select(last_insert_id)
                .get_result(&conn)
                .context("DB error")?;

            diesel::update(patients::table.filter(patients::pid.eq(info.pid)))
                .set(patients::last_visit.eq(now))
                .execute(&conn)
                .context("DB error")?;

            crate::audit::record(
                &conn,
                &user.username,
                "consultation_recorded",
                "consultation",
                &vid.to_string(),
                serde_json::json!({ "pid": info.pid }).to_string(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn search_consultation_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchConsultationRequest>,
) -> anyhow::Result<SearchConsultationResponse> {
    use crate::schema::{consultations, patients};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let (start_time, end_time) =
        crate::utils::parse_time_pair_str_opt(info.start_time, info.end_time)?;
    let pid = info.pid;
    let doctor = info.doctor;
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        let mut query = consultations::table
            .inner_join(patients::table.on(consultations::pid.eq(patients::pid)))
            .filter(consultations::time.between(start_time, end_time))
            .into_boxed();

        if let Some(pid) = pid {
            query = query.filter(consultations::pid.eq(pid));
        }
        if let Some(doctor) = doctor {
            query = query.filter(consultations::doctor.eq(doctor));
        }

        query
            .order(consultations::time.desc())
            .offset(first_index)
            .limit(limit)
            .get_results::<(Consultation, PatientData)>(&conn)
    })
    .await
    .context("DB error")?;

    let consultations = rows
        .into_iter()
        .map(|(visit, patient)| SearchConsultationItem {
            vid: visit.vid,
            pid: visit.pid,
            patient_name: patient.name,
            aid: visit.aid,
            doctor: visit.doctor,
            symptoms: visit.symptoms,
            diagnosis: visit.diagnosis,
            prescription: visit.prescription,
            time: crate::utils::format_time_str(&visit.time),
        })
        .collect();

    Ok(SearchConsultationResponse {
        success: true,
        err: "".to_string(),
        consultations,
    })
}

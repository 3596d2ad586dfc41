mod requests;
mod responses;

use crate::{
    auth::utils::get_session_user,
    database::{assert, get_db_conn, last_insert_id},
    models::{
        appointments::Appointment,
        clinics::ClinicData,
        consultations::Consultation,
        patients::{NewPatient, PatientData, UpdatePatient},
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
    cfg.service(add_patient)
        .service(modify_patient)
        .service(view_patient)
        .service(search_patient);
}

crate::post_funcs! {
    (add_patient, "/add_patient", AddPatientRequest, SimpleResponse),
    (modify_patient, "/modify_patient", ModifyPatientRequest, SimpleResponse),
    (view_patient, "/view_patient", ViewPatientRequest, ViewPatientResponse),
    (search_patient, "/search_patient", SearchPatientRequest, SearchPatientResponse),
}

async fn add_patient_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddPatientRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::patients;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;

    if info.name.trim().is_empty() {
        bail!("Patient name is required");
    }
    crate::utils::assert_gender_str(&info.gender)?;
    let birthday = if info.birthday.is_empty() {
        None
    } else {
        Some(crate::utils::parse_date_str(&info.birthday).context("Bad birthday format")?)
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            let data = NewPatient {
                name: info.name.trim().to_string(),
                gender: info.gender,
                birthday,
                telephone: info.telephone,
                address: info.address,
                created_at: Utc::now().naive_utc(),
            };
            diesel::insert_into(patients::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            let pid: u64 = diesel::select(last_insert_id)
                .get_result(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "patient_created",
                "patient",
                &pid.to_string(),
                String::new(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn modify_patient_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyPatientRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::patients;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    assert::assert_patient(&pool, info.pid).await?;

    if let Some(gender) = &info.gender {
        crate::utils::assert_gender_str(gender)?;
    }
    let mut data = UpdatePatient {
        name: info.name,
        gender: info.gender,
        telephone: info.telephone,
        address: info.address,
        ..Default::default()
    };
    if let Some(birthday) = info.birthday {
        let birthday = crate::utils::parse_date_str(&birthday).context("Bad birthday format")?;
        data.birthday = Some(birthday);
    }

    let pid = info.pid;
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            diesel::update(patients::table.filter(patients::pid.eq(pid)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "patient_updated",
                "patient",
                &pid.to_string(),
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn view_patient_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewPatientRequest>,
) -> anyhow::Result<ViewPatientResponse> {
    use crate::schema::{appointments, clinics, consultations, patients};

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let pid = info.pid;
    let conn = get_db_conn(&pool)?;
    let (patient, visits, upcoming) = web::block(move || {
        let patient = patients::table
            .filter(patients::pid.eq(pid))
            .get_result::<PatientData>(&conn)
            .optional()
            .context("DB error")?;
        let patient = match patient {
            Some(patient) => patient,
            None => bail!("No such patient"),
        };

        let visits = consultations::table
            .filter(consultations::pid.eq(pid))
            .order(consultations::time.desc())
            .limit(5)
            .get_results::<Consultation>(&conn)
            .context("DB error")?;

        let now = Utc::now().naive_utc();
        let upcoming = appointments::table
            .filter(appointments::pid.eq(pid))
            .filter(appointments::cancelled.eq(false))
            .filter(appointments::completed.eq(false))
            .filter(appointments::start_time.ge(now))
            .inner_join(clinics::table.on(appointments::clinic_id.eq(clinics::clinic_id)))
            .order(appointments::start_time.asc())
            .limit(5)
            .get_results::<(Appointment, ClinicData)>(&conn)
            .context("DB error")?;

        Ok((patient, visits, upcoming))
    })
    .await?;

    let now = Utc::now().naive_utc();
    Ok(ViewPatientResponse {
        success: true,
        err: "".to_string(),
        pid: patient.pid,
        name: patient.name,
        gender: patient.gender,
        birthday: patient.birthday.map(|d| d.to_string()).unwrap_or_default(),
        telephone: patient.telephone,
        address: patient.address,
        last_visit: crate::utils::format_time_str_opt(&patient.last_visit),
        consultations: visits
            .into_iter()
            .map(|data| PatientConsultationItem {
                vid: data.vid,
                doctor: data.doctor,
                diagnosis: data.diagnosis,
                time: crate::utils::format_time_str(&data.time),
            })
            .collect(),
        upcoming: upcoming
            .into_iter()
            .map(|(appo, clinic)| PatientAppointmentItem {
                aid: appo.aid,
                doctor: appo.doctor,
                clinic_name: clinic.clinic_name,
                start_time: crate::utils::format_time_str(&appo.start_time),
                status: crate::appointments::status::derived_status(
                    appo.completed,
                    appo.cancelled,
                    appo.start_time,
                    now,
                )
                .to_string(),
            })
            .collect(),
    })
}

async fn search_patient_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchPatientRequest>,
) -> anyhow::Result<SearchPatientResponse> {
    use crate::schema::patients;

    let info = info.into_inner();
    get_session_user(info.login_token.clone(), &pool).await?;

    let name_pattern = crate::utils::get_str_pattern_opt(info.name);
    let telephone_pattern = crate::utils::get_str_pattern_opt(info.telephone);
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        patients::table
            .filter(patients::name.like(name_pattern))
            .filter(patients::telephone.like(telephone_pattern))
            .order(patients::name.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<PatientData>(&conn)
    })
    .await
    .context("DB error")?;

    let patients = rows
        .into_iter()
        .map(|data| SearchPatientItem {
            pid: data.pid,
            name: data.name,
            gender: data.gender,
            birthday: data.birthday.map(|d| d.to_string()).unwrap_or_default(),
            telephone: data.telephone,
            last_visit: crate::utils::format_time_str_opt(&data.last_visit),
        })
        .collect();

    Ok(SearchPatientResponse {
        success: true,
        err: "".to_string(),
        patients,
    })
}

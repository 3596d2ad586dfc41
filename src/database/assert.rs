use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, models::users::ROLE_PHYSICIAN, DbPool};

pub async fn assert_patient(pool: &web::Data<DbPool>, pid: u64) -> anyhow::Result<()> {
    use crate::schema::patients;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        patients::table
            .filter(patients::pid.eq(pid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such patient");
    }

    Ok(())
}

pub async fn assert_clinic(pool: &web::Data<DbPool>, clinic_id: u64) -> anyhow::Result<()> {
    use crate::schema::clinics;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        clinics::table
            .filter(clinics::clinic_id.eq(clinic_id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such clinic");
    }

    Ok(())
}

pub async fn assert_physician(pool: &web::Data<DbPool>, username: String) -> anyhow::Result<()> {
    use crate::schema::users;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        users::table
            .filter(users::username.eq(username))
            .filter(users::role.eq(ROLE_PHYSICIAN))
            .filter(users::is_active.eq(true))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such physician");
    }

    Ok(())
}

pub async fn assert_appointment(pool: &web::Data<DbPool>, aid: u64) -> anyhow::Result<()> {
    use crate::schema::appointments;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        appointments::table
            .filter(appointments::aid.eq(aid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such appointment");
    }

    Ok(())
}

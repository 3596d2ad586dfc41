use actix_web::web;
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use crate::{
    auth::session,
    database::get_db_conn,
    models::{sessions::SessionData, users::UserData},
    DbPool,
};

#[derive(Clone)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

/// Resolves a login token, enforcing the inactivity window and
/// refreshing it. Every authenticated operation goes through here.
pub async fn get_session_user(
    token: String,
    pool: &web::Data<DbPool>,
) -> anyhow::Result<SessionUser> {
    use crate::schema::{sessions, users};

    let conn = get_db_conn(pool)?;
    let user = web::block(move || {
        let data = sessions::table
            .filter(sessions::token.eq(&token))
            .get_result::<SessionData>(&conn)
            .optional()
            .context("DB error")?;
        let data = match data {
            Some(data) => data,
            None => bail!("Not logged in"),
        };

        let now = Utc::now().naive_utc();
        let policy = crate::settings::load_policy(&conn)?;
        if session::is_expired(data.last_active, policy.session_timeout_minutes * 60, now) {
            diesel::delete(sessions::table.filter(sessions::token.eq(&token)))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &data.username,
                "session_expired",
                "session",
                "",
                String::new(),
            )?;
            log::info!("session of {} expired after inactivity", data.username);
            bail!("Session expired, please log in again");
        }

        diesel::update(sessions::table.filter(sessions::token.eq(&token)))
            .set(sessions::last_active.eq(now))
            .execute(&conn)
            .context("DB error")?;

        let user = users::table
            .filter(users::username.eq(&data.username))
            .get_result::<UserData>(&conn)
            .context("DB error")?;
        if !user.is_active {
            bail!("Account disabled");
        }

        Ok(SessionUser {
            username: user.username,
            role: user.role,
        })
    })
    .await?;

    Ok(user)
}

pub fn require_role(user: &SessionUser, roles: &[&str]) -> anyhow::Result<()> {
    if roles.iter().any(|role| *role == user.role) {
        Ok(())
    } else {
        bail!("Permission denied")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{ROLE_PHYSICIAN, ROLE_SUPER_ADMIN};

    #[test]
    fn role_gate() {
        let user = SessionUser {
            username: "lin".to_string(),
            role: ROLE_PHYSICIAN.to_string(),
        };
        assert!(require_role(&user, &[ROLE_PHYSICIAN, ROLE_SUPER_ADMIN]).is_ok());
        assert!(require_role(&user, &[ROLE_SUPER_ADMIN]).is_err());
    }
}

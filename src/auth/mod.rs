pub mod utils;

mod lockout;
mod requests;
mod responses;
mod session;

use crate::{
    database::get_db_conn,
    models::{login_locks::LoginLockData, sessions::SessionData, users::UserData},
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::get_session_user};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout).service(modify_password);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (modify_password, "/modify_password", ModifyPasswordRequest, SimpleResponse),
}

enum LoginOutcome {
    Success { token: String, role: String },
    Locked { retry_after_secs: i64 },
    Rejected { reason: &'static str, retry_after_secs: i64 },
}

async fn login_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    use crate::schema::{login_locks, sessions, users};

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;

    // Guard failures (wrong password, lock engagement) must commit
    // their bookkeeping, so they are outcomes, not transaction errors.
    let outcome = web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            let now = Utc::now().naive_utc();
            let policy = crate::settings::load_policy(&conn)?;

            let lock = login_locks::table
                .filter(login_locks::username.eq(&info.username))
                .get_result::<LoginLockData>(&conn)
                .optional()
                .context("DB error")?;

            let remaining =
                lockout::remaining_lock_secs(lock.as_ref().and_then(|l| l.lock_until), now);
            if remaining > 0 {
                crate::audit::record(
                    &conn,
                    &info.username,
                    "login_blocked",
                    "user",
                    &info.username,
                    String::new(),
                )?;
                return Ok(LoginOutcome::Locked {
                    retry_after_secs: remaining,
                });
            }

            let user = users::table
                .filter(users::username.eq(&info.username))
                .get_result::<UserData>(&conn)
                .optional()
                .context("DB error")?;
            let user = match user {
                Some(user) => user,
                None => {
                    crate::audit::record(
                        &conn,
                        &info.username,
                        "login_failed",
                        "user",
                        &info.username,
                        String::new(),
                    )?;
                    return Ok(LoginOutcome::Rejected {
                        reason: "Wrong username or password",
                        retry_after_secs: 0,
                    });
                }
            };

            if !user.is_active {
                crate::audit::record(
                    &conn,
                    &info.username,
                    "login_failed",
                    "user",
                    &info.username,
                    serde_json::json!({ "disabled": true }).to_string(),
                )?;
                return Ok(LoginOutcome::Rejected {
                    reason: "Account disabled",
                    retry_after_secs: 0,
                });
            }

            if user.password != crate::utils::hash_password(&info.password) {
                let attempts = lock.map_or(0, |l| l.failed_attempts);
                let (failed_attempts, lock_until) = lockout::after_failure(
                    attempts,
                    policy.max_login_attempts,
                    policy.lockout_minutes,
                    now,
                );
                diesel::replace_into(login_locks::table)
                    .values(LoginLockData {
                        username: info.username.clone(),
                        failed_attempts,
                        lock_until,
                    })
                    .execute(&conn)
                    .context("DB error")?;
                crate::audit::record(
                    &conn,
                    &info.username,
                    "login_failed",
                    "user",
                    &info.username,
                    serde_json::json!({ "attempts": failed_attempts }).to_string(),
                )?;

                if let Some(until) = lock_until {
                    log::warn!("login lockout engaged for {}", info.username);
                    crate::audit::record(
                        &conn,
                        &info.username,
                        "lockout",
                        "user",
                        &info.username,
                        serde_json::json!({ "until": crate::utils::format_time_str(&until) })
                            .to_string(),
                    )?;
                    return Ok(LoginOutcome::Rejected {
                        reason: "Too many failed attempts, account locked",
                        retry_after_secs: lockout::remaining_lock_secs(Some(until), now),
                    });
                }
                return Ok(LoginOutcome::Rejected {
                    reason: "Wrong username or password",
                    retry_after_secs: 0,
                });
            }

            diesel::delete(login_locks::table.filter(login_locks::username.eq(&info.username)))
                .execute(&conn)
                .context("DB error")?;

            let token = crate::utils::generate_login_token(&user.username, &user.role);
            diesel::insert_into(sessions::table)
                .values(SessionData {
                    token: token.clone(),
                    username: user.username.clone(),
                    login_time: now,
                    last_active: now,
                })
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "login",
                "user",
                &user.username,
                String::new(),
            )?;

            Ok(LoginOutcome::Success {
                token,
                role: user.role,
            })
        })
    })
    .await?;

    let response = match outcome {
        LoginOutcome::Success { token, role } => LoginResponse {
            success: true,
            err: "".to_string(),
            login_token: token,
            role,
            retry_after_secs: 0,
        },
        LoginOutcome::Locked { retry_after_secs } => LoginResponse {
            err: "Account locked, try again later".to_string(),
            retry_after_secs,
            ..Default::default()
        },
        LoginOutcome::Rejected {
            reason,
            retry_after_secs,
        } => LoginResponse {
            err: reason.to_string(),
            retry_after_secs,
            ..Default::default()
        },
    };
    Ok(response)
}

async fn logout_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::sessions;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    web::block(move || -> anyhow::Result<_> {
        let data = sessions::table
            .filter(sessions::token.eq(&info.login_token))
            .get_result::<SessionData>(&conn)
            .optional()
            .context("DB error")?;
        if let Some(data) = data {
            diesel::delete(sessions::table.filter(sessions::token.eq(&info.login_token)))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &data.username,
                "logout",
                "user",
                &data.username,
                String::new(),
            )?;
        }
        Ok(())
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn modify_password_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyPasswordRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let hashed_old = crate::utils::hash_password(&info.password_old);
            let res = users::table
                .filter(users::username.eq(&user.username))
                .filter(users::password.eq(&hashed_old))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res != 1 {
                bail!("Wrong password");
            }

            let hashed_new = crate::utils::hash_password(&info.password_new);
            diesel::update(users::table.filter(users::username.eq(&user.username)))
                .set(users::password.eq(&hashed_new))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "password_changed",
                "user",
                &user.username,
                String::new(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

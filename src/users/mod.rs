mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::get_db_conn,
    models::users::{is_known_role, UpdateUser, UserData, ROLE_SUPER_ADMIN},
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_user)
        .service(modify_user)
        .service(reset_password)
        .service(set_active)
        .service(search_user)
        .service(view_user);
}

crate::post_funcs! {
    (add_user, "/add_user", AddUserRequest, SimpleResponse),
    (modify_user, "/modify_user", ModifyUserRequest, SimpleResponse),
    (reset_password, "/reset_password", ResetPasswordRequest, SimpleResponse),
    (set_active, "/set_active", SetActiveRequest, SimpleResponse),
    (search_user, "/search_user", SearchUserRequest, SearchUserResponse),
    (view_user, "/view_user", ViewUserRequest, ViewUserResponse),
}

async fn add_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddUserRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    if info.username.trim().is_empty() {
        bail!("Username is required");
    }
    if info.password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }
    if !is_known_role(&info.role) {
        bail!("Unknown role");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let res = users::table
                .filter(users::username.eq(&info.username))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res > 0 {
                bail!("Username already taken");
            }

            let data = UserData {
                username: info.username.trim().to_string(),
                password: crate::utils::hash_password(&info.password),
                name: info.name,
                role: info.role.clone(),
                telephone: info.telephone,
                is_active: true,
                created_at: Utc::now().naive_utc(),
            };
            diesel::insert_into(users::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            crate::audit::record(
                &conn,
                &admin.username,
                "user_created",
                "user",
                info.username.trim(),
                serde_json::json!({ "role": info.role }).to_string(),
            )?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn modify_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyUserRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    if let Some(role) = &info.role {
        if !is_known_role(role) {
            bail!("Unknown role");
        }
    }

    let username = info.username;
    let data = UpdateUser {
        name: info.name,
        role: info.role,
        telephone: info.telephone,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            let res = users::table
                .filter(users::username.eq(&username))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res == 0 {
                bail!("No such user");
            }

            diesel::update(users::table.filter(users::username.eq(&username)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &admin.username,
                "user_updated",
                "user",
                &username,
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn reset_password_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ResetPasswordRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    if info.password_new.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let res = users::table
                .filter(users::username.eq(&info.username))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res == 0 {
                bail!("No such user");
            }

            let hashed = crate::utils::hash_password(&info.password_new);
            diesel::update(users::table.filter(users::username.eq(&info.username)))
                .set(users::password.eq(hashed))
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &admin.username,
                "password_reset",
                "user",
                &info.username,
                String::new(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn set_active_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SetActiveRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{sessions, users};

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let res = users::table
                .filter(users::username.eq(&info.username))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res == 0 {
                bail!("No such user");
            }

            diesel::update(users::table.filter(users::username.eq(&info.username)))
                .set(users::is_active.eq(info.active))
                .execute(&conn)
                .context("DB error")?;
            if !info.active {
                // A disabled account keeps no live sessions.
                diesel::delete(sessions::table.filter(sessions::username.eq(&info.username)))
                    .execute(&conn)
                    .context("DB error")?;
            }
            crate::audit::record(
                &conn,
                &admin.username,
                "user_set_active",
                "user",
                &info.username,
                serde_json::json!({ "active": info.active }).to_string(),
            )?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn search_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchUserRequest>,
) -> anyhow::Result<SearchUserResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    if let Some(role) = &info.role {
        if !is_known_role(role) {
            bail!("Unknown role");
        }
    }

    let name_pattern = crate::utils::get_str_pattern_opt(info.name);
    let role_all = info.role.is_none();
    let role = info.role.unwrap_or_default();
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        users::table
            .filter(users::name.like(name_pattern))
            .filter(users::role.eq(role).or(role_all))
            .order(users::username.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<UserData>(&conn)
    })
    .await
    .context("DB error")?;

    let users = rows
        .into_iter()
        .map(|data| SearchUserItem {
            username: data.username,
            name: data.name,
            role: data.role,
            telephone: data.telephone,
            is_active: data.is_active,
        })
        .collect();

    Ok(SearchUserResponse {
        success: true,
        err: "".to_string(),
        users,
    })
}

async fn view_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewUserRequest>,
) -> anyhow::Result<ViewUserResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let admin = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&admin, &[ROLE_SUPER_ADMIN])?;

    let conn = get_db_conn(&pool)?;
    let data = web::block(move || {
        let data = users::table
            .filter(users::username.eq(&info.username))
            .get_result::<UserData>(&conn)
            .optional()
            .context("DB error")?;
        match data {
            Some(data) => Ok(data),
            None => bail!("No such user"),
        }
    })
    .await?;

    Ok(ViewUserResponse {
        success: true,
        err: "".to_string(),
        username: data.username,
        name: data.name,
        role: data.role,
        telephone: data.telephone,
        is_active: data.is_active,
        created_at: crate::utils::format_time_str(&data.created_at),
    })
}

mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::get_db_conn,
    models::{config::ConfigData, users::ROLE_SUPER_ADMIN},
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub const KEY_MAX_LOGIN_ATTEMPTS: &str = "auth.max_login_attempts";
pub const KEY_LOCKOUT_MINUTES: &str = "auth.lockout_minutes";
pub const KEY_SESSION_TIMEOUT_MINUTES: &str = "auth.session_timeout_minutes";

pub struct Policy {
    pub max_login_attempts: i32,
    pub lockout_minutes: i64,
    pub session_timeout_minutes: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            lockout_minutes: 5,
            session_timeout_minutes: 15,
        }
    }
}

// Absent or malformed entries fall back to the defaults.
fn apply_entry(policy: &mut Policy, key: &str, value: &str) {
    match key {
        KEY_MAX_LOGIN_ATTEMPTS => {
            if let Ok(v) = value.parse::<i32>() {
                if v > 0 {
                    policy.max_login_attempts = v;
                }
            }
        }
        KEY_LOCKOUT_MINUTES => {
            if let Ok(v) = value.parse::<i64>() {
                if v > 0 {
                    policy.lockout_minutes = v;
                }
            }
        }
        KEY_SESSION_TIMEOUT_MINUTES => {
            if let Ok(v) = value.parse::<i64>() {
                if v > 0 {
                    policy.session_timeout_minutes = v;
                }
            }
        }
        _ => {}
    }
}

pub fn load_policy(conn: &diesel::MysqlConnection) -> anyhow::Result<Policy> {
    use crate::schema::config;

    let rows = config::table
        .filter(config::config_key.eq_any(vec![
            KEY_MAX_LOGIN_ATTEMPTS,
            KEY_LOCKOUT_MINUTES,
            KEY_SESSION_TIMEOUT_MINUTES,
        ]))
        .load::<ConfigData>(conn)
        .context("DB error")?;

    let mut policy = Policy::default();
    for row in &rows {
        apply_entry(&mut policy, &row.config_key, &row.config_value);
    }
    Ok(policy)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(view_settings).service(update_setting);
}

crate::post_funcs! {
    (view_settings, "/view_settings", ViewSettingsRequest, ViewSettingsResponse),
    (update_setting, "/update_setting", UpdateSettingRequest, SimpleResponse),
}

async fn view_settings_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewSettingsRequest>,
) -> anyhow::Result<ViewSettingsResponse> {
    use crate::schema::config;

    let info = info.into_inner();
    let user = get_session_user(info.login_token, &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        config::table
            .order(config::config_key.asc())
            .load::<ConfigData>(&conn)
    })
    .await
    .context("DB error")?;

    let settings = rows
        .into_iter()
        .map(|data| SettingItem {
            key: data.config_key,
            value: data.config_value,
        })
        .collect();

    Ok(ViewSettingsResponse {
        success: true,
        err: "".to_string(),
        settings,
    })
}

async fn update_setting_impl(
    pool: web::Data<DbPool>,
    info: web::Json<UpdateSettingRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::config;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;

    let known = [
        KEY_MAX_LOGIN_ATTEMPTS,
        KEY_LOCKOUT_MINUTES,
        KEY_SESSION_TIMEOUT_MINUTES,
    ];
    if !known.contains(&info.key.as_str()) {
        bail!("Unknown setting");
    }
    match info.value.parse::<i64>() {
        Ok(v) if v > 0 => {}
        _ => bail!("Setting value must be a positive integer"),
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            diesel::replace_into(config::table)
                .values(ConfigData {
                    config_key: info.key.clone(),
                    config_value: info.value.clone(),
                })
                .execute(&conn)
                .context("DB error")?;
            crate::audit::record(
                &conn,
                &user.username,
                "config_updated",
                "config",
                &info.key,
                serde_json::json!({ "value": info.value }).to_string(),
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

    #[test]
    fn defaults_match_the_documented_policy() {
        let policy = Policy::default();
        assert_eq!(policy.max_login_attempts, 3);
        assert_eq!(policy.lockout_minutes, 5);
        assert_eq!(policy.session_timeout_minutes, 15);
    }

    #[test]
    fn entries_override_defaults() {
        let mut policy = Policy::default();
        apply_entry(&mut policy, KEY_MAX_LOGIN_ATTEMPTS, "5");
        apply_entry(&mut policy, KEY_SESSION_TIMEOUT_MINUTES, "30");
        assert_eq!(policy.max_login_attempts, 5);
        assert_eq!(policy.session_timeout_minutes, 30);
        assert_eq!(policy.lockout_minutes, 5);
    }

    #[test]
    fn malformed_entries_keep_defaults() {
        let mut policy = Policy::default();
        apply_entry(&mut policy, KEY_LOCKOUT_MINUTES, "soon");
        apply_entry(&mut policy, KEY_MAX_LOGIN_ATTEMPTS, "-1");
        apply_entry(&mut policy, "auth.unknown", "9");
        assert_eq!(policy.lockout_minutes, 5);
        assert_eq!(policy.max_login_attempts, 3);
    }
}

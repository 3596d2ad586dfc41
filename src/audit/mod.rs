mod requests;
mod responses;

use crate::{
    auth::utils::{get_session_user, require_role},
    database::get_db_conn,
    models::{
        audit_logs::{AuditLog, NewAuditLog},
        users::ROLE_SUPER_ADMIN,
    },
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_audit);
}

crate::post_funcs! {
    (search_audit, "/search_audit", SearchAuditRequest, SearchAuditResponse),
}

/// Appends one security-relevant event on the caller's connection,
/// inside whatever transaction is open there.
pub fn record(
    conn: &diesel::MysqlConnection,
    username: &str,
    action: &str,
    entity: &str,
    entity_id: &str,
    detail: String,
) -> anyhow::Result<()> {
    use crate::schema::audit_logs;

    let data = NewAuditLog {
        username: username.to_string(),
        action: action.to_string(),
        entity: entity.to_string(),
        entity_id: entity_id.to_string(),
        detail,
        time: Utc::now().naive_utc(),
    };
    diesel::insert_into(audit_logs::table)
        .values(data)
        .execute(conn)
        .context("DB error")?;
    Ok(())
}

async fn search_audit_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchAuditRequest>,
) -> anyhow::Result<SearchAuditResponse> {
    use crate::schema::audit_logs;

    let info = info.into_inner();
    let user = get_session_user(info.login_token.clone(), &pool).await?;
    require_role(&user, &[ROLE_SUPER_ADMIN])?;

    let (start_time, end_time) =
        crate::utils::parse_time_pair_str_opt(info.start_time, info.end_time)?;
    let username_pattern = crate::utils::get_str_pattern_opt(info.username);
    let action_all = info.action.is_none();
    let action = info.action.unwrap_or_default();
    let entity_all = info.entity.is_none();
    let entity = info.entity.unwrap_or_default();
    let (first_index, limit) = info.page.clamp();

    let conn = get_db_conn(&pool)?;
    let logs = web::block(move || {
        audit_logs::table
            .filter(audit_logs::username.like(username_pattern))
            .filter(audit_logs::action.eq(action).or(action_all))
            .filter(audit_logs::entity.eq(entity).or(entity_all))
            .filter(audit_logs::time.between(start_time, end_time))
            .order(audit_logs::time.desc())
            .offset(first_index)
            .limit(limit)
            .get_results::<AuditLog>(&conn)
    })
    .await
    .context("DB error")?;

    let logs = logs
        .into_iter()
        .map(|data| SearchAuditItem {
            lid: data.lid,
            username: data.username,
            action: data.action,
            entity: data.entity,
            entity_id: data.entity_id,
            detail: data.detail,
            time: crate::utils::format_time_str(&data.time),
        })
        .collect();

    Ok(SearchAuditResponse {
        success: true,
        err: "".to_string(),
        logs,
    })
}

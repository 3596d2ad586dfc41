pub mod assert;

use crate::{
    models::users::{UserData, ROLE_SUPER_ADMIN},
    DbPool,
};
use actix_web::web;
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::Bigint>
);

pub fn get_db_conn(
    pool: &web::Data<DbPool>,
) -> anyhow::Result<PooledConnection<ConnectionManager<MysqlConnection>>> {
    pool.get().context("DB connection")
}

/// Creates the initial super-admin from the environment when the users
/// table has none yet.
pub fn seed_super_admin(pool: &DbPool) -> anyhow::Result<()> {
    use crate::schema::users;

    let conn = pool.get().context("DB connection")?;
    let existing = users::table
        .filter(users::role.eq(ROLE_SUPER_ADMIN))
        .count()
        .get_result::<i64>(&conn)
        .context("DB error")?;
    if existing > 0 {
        return Ok(());
    }

    let username = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    if password == "admin" {
        log::warn!("ADMIN_PASSWORD not set. Set it before exposing this server.");
    }

    let data = UserData {
        username: username.clone(),
        password: crate::utils::hash_password(&password),
        name: "Super Admin".to_string(),
        role: ROLE_SUPER_ADMIN.to_string(),
        telephone: "".to_string(),
        is_active: true,
        created_at: Utc::now().naive_utc(),
    };
    diesel::insert_into(users::table)
        .values(data)
        .execute(&conn)
        .context("DB error")?;
    log::info!("seeded super-admin account {}", username);

    Ok(())
}

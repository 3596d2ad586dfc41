use crate::schema::login_locks;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "login_locks"]
pub struct LoginLockData {
    pub username: String,
    pub failed_attempts: i32,
    pub lock_until: Option<NaiveDateTime>,
}

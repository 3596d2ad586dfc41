use crate::schema::sessions;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "sessions"]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub login_time: NaiveDateTime,
    pub last_active: NaiveDateTime,
}

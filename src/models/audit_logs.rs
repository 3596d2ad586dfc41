use crate::schema::audit_logs;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct AuditLog {
    pub lid: u64,
    pub username: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub detail: String,
    pub time: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "audit_logs"]
pub struct NewAuditLog {
    pub username: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub detail: String,
    pub time: NaiveDateTime,
}

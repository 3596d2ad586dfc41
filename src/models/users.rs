use crate::schema::users;
use chrono::NaiveDateTime;

pub const ROLE_SUPER_ADMIN: &str = "super-admin";
pub const ROLE_PHYSICIAN: &str = "physician";
pub const ROLE_RECEPTIONIST: &str = "receptionist";

pub fn is_known_role(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN || role == ROLE_PHYSICIAN || role == ROLE_RECEPTIONIST
}

#[derive(Queryable, Insertable, Identifiable)]
#[primary_key(username)]
#[table_name = "users"]
pub struct UserData {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub telephone: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "users"]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub telephone: Option<String>,
}

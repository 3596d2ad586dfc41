use crate::schema::patients;
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Queryable)]
pub struct PatientData {
    pub pid: u64,
    pub name: String,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
    pub telephone: String,
    pub address: String,
    pub last_visit: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "patients"]
pub struct NewPatient {
    pub name: String,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
    pub telephone: String,
    pub address: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "patients"]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

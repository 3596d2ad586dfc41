use crate::schema::consultations;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct Consultation {
    pub vid: u64,
    pub pid: u64,
    pub aid: Option<u64>,
    pub doctor: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub prescription: String,
    pub time: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "consultations"]
pub struct NewConsultation {
    pub pid: u64,
    pub aid: Option<u64>,
    pub doctor: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub prescription: String,
    pub time: NaiveDateTime,
}

use crate::schema::{clinic_hours, clinics};
use chrono::NaiveTime;

#[derive(Queryable)]
pub struct ClinicData {
    pub clinic_id: u64,
    pub clinic_name: String,
    pub address: String,
    pub telephone: String,
}

#[derive(Insertable)]
#[table_name = "clinics"]
pub struct NewClinic {
    pub clinic_name: String,
    pub address: String,
    pub telephone: String,
}

#[derive(AsChangeset, Default)]
#[table_name = "clinics"]
pub struct UpdateClinic {
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
}

// One row per weekday, 0 = Monday .. 6 = Sunday. A row with no
// open/close times means the clinic is closed that day.
#[derive(Queryable, Insertable, Clone)]
#[table_name = "clinic_hours"]
pub struct ClinicHourData {
    pub clinic_id: u64,
    pub weekday: i32,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

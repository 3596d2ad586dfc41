use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddClinicRequest {
    pub login_token: String,
    pub clinic_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub telephone: String,
}

#[derive(Deserialize)]
pub struct ModifyClinicRequest {
    pub login_token: String,
    pub clinic_id: u64,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewClinicRequest {
    pub login_token: String,
    pub clinic_id: u64,
}

#[derive(Deserialize)]
pub struct SearchClinicRequest {
    pub login_token: String,
    pub clinic_name: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Deserialize)]
pub struct HourEntry {
    pub weekday: i32,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Deserialize)]
pub struct SetHoursRequest {
    pub login_token: String,
    pub clinic_id: u64,
    pub hours: Vec<HourEntry>,
}

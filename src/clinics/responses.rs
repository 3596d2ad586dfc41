use serde::Serialize;

#[derive(Default, Serialize)]
pub struct HourItem {
    pub weekday: i32,
    pub open: String,
    pub close: String,
}

#[derive(Default, Serialize)]
pub struct ViewClinicResponse {
    pub success: bool,
    pub err: String,
    pub clinic_id: u64,
    pub clinic_name: String,
    pub address: String,
    pub telephone: String,
    pub hours: Vec<HourItem>,
}

#[derive(Default, Serialize)]
pub struct SearchClinicItem {
    pub clinic_id: u64,
    pub clinic_name: String,
    pub address: String,
    pub telephone: String,
}

#[derive(Default, Serialize)]
pub struct SearchClinicResponse {
    pub success: bool,
    pub err: String,
    pub clinics: Vec<SearchClinicItem>,
}

crate::impl_err_response! {
    ViewClinicResponse,
    SearchClinicResponse,
}

use serde::Serialize;

#[derive(Default, Serialize)]
pub struct SearchConsultationItem {
    pub vid: u64,
    pub pid: u64,
    pub patient_name: String,
    pub aid: Option<u64>,
    pub doctor: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub prescription: String,
    pub time: String,
}

#[derive(Default, Serialize)]
pub struct SearchConsultationResponse {
    pub success: bool,
    pub err: String,
    pub consultations: Vec<SearchConsultationItem>,
}

crate::impl_err_response! {
    SearchConsultationResponse,
}

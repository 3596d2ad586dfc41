use serde::Serialize;

#[derive(Default, Serialize)]
pub struct PatientConsultationItem {
    pub vid: u64,
    pub doctor: String,
    pub diagnosis: String,
    pub time: String,
}

#[derive(Default, Serialize)]
pub struct PatientAppointmentItem {
    pub aid: u64,
    pub doctor: String,
    pub clinic_name: String,
    pub start_time: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct ViewPatientResponse {
    pub success: bool,
    pub err: String,
    pub pid: u64,
    pub name: String,
    pub gender: String,
    pub birthday: String,
    pub telephone: String,
    pub address: String,
    pub last_visit: String,
    pub consultations: Vec<PatientConsultationItem>,
    pub upcoming: Vec<PatientAppointmentItem>,
}

#[derive(Default, Serialize)]
pub struct SearchPatientItem {
    pub pid: u64,
    pub name: String,
    pub gender: String,
    pub birthday: String,
    pub telephone: String,
    pub last_visit: String,
}

#[derive(Default, Serialize)]
pub struct SearchPatientResponse {
    pub success: bool,
    pub err: String,
    pub patients: Vec<SearchPatientItem>,
}

crate::impl_err_response! {
    ViewPatientResponse,
    SearchPatientResponse,
}

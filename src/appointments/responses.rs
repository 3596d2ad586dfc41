use serde::Serialize;

#[derive(Default, Serialize)]
pub struct SearchAppointItem {
    pub aid: u64,
    pub pid: u64,
    pub patient_name: String,
    pub doctor: String,
    pub clinic_id: u64,
    pub clinic_name: String,
    pub start_time: String,
    pub status: String,
    pub reminder_sent: bool,
    pub notes: String,
}

#[derive(Default, Serialize)]
pub struct SearchAppointResponse {
    pub success: bool,
    pub err: String,
    pub appointments: Vec<SearchAppointItem>,
}

#[derive(Default, Serialize)]
pub struct ReminderItem {
    pub aid: u64,
    pub patient_name: String,
    pub telephone: String,
    pub doctor: String,
    pub clinic_name: String,
    pub start_time: String,
}

#[derive(Default, Serialize)]
pub struct PendingRemindersResponse {
    pub success: bool,
    pub err: String,
    pub reminders: Vec<ReminderItem>,
}

crate::impl_err_response! {
    SearchAppointResponse,
    PendingRemindersResponse,
}

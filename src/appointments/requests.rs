use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub login_token: String,
    pub pid: u64,
    pub doctor: String,
    pub clinic_id: u64,
    pub start_time: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Deserialize)]
pub struct CancelAppointRequest {
    pub login_token: String,
    pub aid: u64,
}

#[derive(Deserialize)]
pub struct CompleteAppointRequest {
    pub login_token: String,
    pub aid: u64,
}

#[derive(Deserialize)]
pub struct SearchAppointRequest {
    pub login_token: String,
    pub pid: Option<u64>,
    pub doctor: Option<String>,
    pub clinic_id: Option<u64>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Deserialize)]
pub struct PendingRemindersRequest {
    pub login_token: String,
    pub hours_ahead: Option<i64>,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Deserialize)]
pub struct MarkRemindedRequest {
    pub login_token: String,
    pub aid: u64,
}

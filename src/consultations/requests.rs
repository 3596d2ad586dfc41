use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddConsultationRequest {
    pub login_token: String,
    pub pid: u64,
    pub aid: Option<u64>,
    pub symptoms: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub prescription: String,
}

#[derive(Deserialize)]
pub struct SearchConsultationRequest {
    pub login_token: String,
    pub pid: Option<u64>,
    pub doctor: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

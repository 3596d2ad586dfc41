use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddPatientRequest {
    pub login_token: String,
    pub name: String,
    pub gender: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Deserialize)]
pub struct ModifyPatientRequest {
    pub login_token: String,
    pub pid: u64,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewPatientRequest {
    pub login_token: String,
    pub pid: u64,
}

#[derive(Deserialize)]
pub struct SearchPatientRequest {
    pub login_token: String,
    pub name: Option<String>,
    pub telephone: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

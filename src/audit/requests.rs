use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchAuditRequest {
    pub login_token: String,
    pub username: Option<String>,
    pub action: Option<String>,
    pub entity: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

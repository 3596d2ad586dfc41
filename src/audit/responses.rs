use serde::Serialize;

#[derive(Default, Serialize)]
pub struct SearchAuditItem {
    pub lid: u64,
    pub username: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub detail: String,
    pub time: String,
}

#[derive(Default, Serialize)]
pub struct SearchAuditResponse {
    pub success: bool,
    pub err: String,
    pub logs: Vec<SearchAuditItem>,
}

crate::impl_err_response! {
    SearchAuditResponse,
}

use serde::Serialize;

#[derive(Default, Serialize)]
pub struct SettingItem {
    pub key: String,
    pub value: String,
}

#[derive(Default, Serialize)]
pub struct ViewSettingsResponse {
    pub success: bool,
    pub err: String,
    pub settings: Vec<SettingItem>,
}

crate::impl_err_response! {
    ViewSettingsResponse,
}

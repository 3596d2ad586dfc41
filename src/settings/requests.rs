use serde::Deserialize;

#[derive(Deserialize)]
pub struct ViewSettingsRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct UpdateSettingRequest {
    pub login_token: String,
    pub key: String,
    pub value: String,
}

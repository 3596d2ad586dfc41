use crate::protocol::PageParams;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddUserRequest {
    pub login_token: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub telephone: String,
}

#[derive(Deserialize)]
pub struct ModifyUserRequest {
    pub login_token: String,
    pub username: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub login_token: String,
    pub username: String,
    pub password_new: String,
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub login_token: String,
    pub username: String,
    pub active: bool,
}

#[derive(Deserialize)]
pub struct SearchUserRequest {
    pub login_token: String,
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Deserialize)]
pub struct ViewUserRequest {
    pub login_token: String,
    pub username: String,
}

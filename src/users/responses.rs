use serde::Serialize;

#[derive(Default, Serialize)]
pub struct ViewUserResponse {
    pub success: bool,
    pub err: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub telephone: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Default, Serialize)]
pub struct SearchUserItem {
    pub username: String,
    pub name: String,
    pub role: String,
    pub telephone: String,
    pub is_active: bool,
}

#[derive(Default, Serialize)]
pub struct SearchUserResponse {
    pub success: bool,
    pub err: String,
    pub users: Vec<SearchUserItem>,
}

crate::impl_err_response! {
    ViewUserResponse,
    SearchUserResponse,
}

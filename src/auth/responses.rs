use serde::Serialize;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
    pub role: String,
    pub retry_after_secs: i64,
}

crate::impl_err_response! {
    LoginResponse,
}

use serde::Deserialize;

#[derive(Deserialize)]
pub struct OverviewRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct PhysicianStatsRequest {
    pub login_token: String,
    pub doctor: String,
}

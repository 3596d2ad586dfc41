use serde::Serialize;

#[derive(Default, Serialize)]
pub struct StatItem {
    pub label: String,
    pub value: i64,
}

#[derive(Default, Serialize)]
pub struct UpcomingItem {
    pub aid: u64,
    pub patient_name: String,
    pub doctor: String,
    pub clinic_name: String,
    pub start_time: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct ActivityItem {
    pub username: String,
    pub action: String,
    pub entity: String,
    pub time: String,
}

#[derive(Default, Serialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub err: String,
    pub stats: Vec<StatItem>,
    pub upcoming: Vec<UpcomingItem>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Default, Serialize)]
pub struct PhysicianStatsResponse {
    pub success: bool,
    pub err: String,
    pub doctor: String,
    pub stats: Vec<StatItem>,
    pub recent: Vec<UpcomingItem>,
}

crate::impl_err_response! {
    OverviewResponse,
    PhysicianStatsResponse,
}

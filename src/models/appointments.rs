use crate::schema::appointments;
use chrono::NaiveDateTime;

// Stored columns hold only the completion/cancellation flags; the
// four user-visible statuses are derived at read time.
pub const APPOINT_STATUS_SCHEDULED: &str = "scheduled";
pub const APPOINT_STATUS_COMPLETED: &str = "completed";
pub const APPOINT_STATUS_CANCELLED: &str = "cancelled";
pub const APPOINT_STATUS_NO_SHOW: &str = "no-show";

#[derive(Queryable)]
pub struct Appointment {
    pub aid: u64,
    pub pid: u64,
    pub doctor: String,
    pub clinic_id: u64,
    pub start_time: NaiveDateTime,
    pub completed: bool,
    pub cancelled: bool,
    pub reminder_sent: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub pid: u64,
    pub doctor: String,
    pub clinic_id: u64,
    pub start_time: NaiveDateTime,
    pub completed: bool,
    pub cancelled: bool,
    pub reminder_sent: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

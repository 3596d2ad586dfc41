pub mod appointments;
pub mod audit_logs;
pub mod clinics;
pub mod config;
pub mod consultations;
pub mod patients;
pub mod users;

pub mod login_locks;
pub mod sessions;

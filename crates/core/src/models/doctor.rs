use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicResult;
use crate::models::time_format::hhmm;
use crate::schedule::Schedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub clinic_name: String,
    pub clinic_address: String,
    #[serde(with = "hhmm")]
    pub working_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub working_end: NaiveTime,
    pub slot_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    /// Builds the booking schedule from the stored working window.
    pub fn schedule(&self) -> ClinicResult<Schedule> {
        Schedule::new(
            self.working_start,
            self.working_end,
            Duration::minutes(i64::from(self.slot_minutes)),
        )
    }
}

/// A validated doctor profile ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub clinic_name: String,
    pub clinic_address: String,
    pub working_start: NaiveTime,
    pub working_end: NaiveTime,
    pub slot_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialization: Option<String>,
    #[serde(default)]
    pub clinic_name: String,
    #[serde(default)]
    pub clinic_address: String,
    pub working_start: String,
    pub working_end: String,
    pub slot_minutes: Option<i32>,
}

/// Partial edit of a doctor profile. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub working_start: Option<String>,
    pub working_end: Option<String>,
    pub slot_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProfileResponse {
    pub id: Uuid,
    pub appointments_removed: u64,
}

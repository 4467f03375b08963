use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicResult;
use crate::models::time_format::{self, hhmm, hhmm_list};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

/// A booking request after boundary parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAppointment {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Raw booking payload as received from a client. The patient is never taken
/// from the payload, it comes from the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: String,
    pub time: String,
}

impl BookAppointmentRequest {
    pub fn into_booking(self, patient_id: Uuid) -> ClinicResult<BookAppointment> {
        Ok(BookAppointment {
            doctor_id: self.doctor_id,
            patient_id,
            date: time_format::parse_date(&self.date)?,
            time: time_format::parse_time(&self.time)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub doctor: Uuid,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub doctor: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm_list")]
    pub available_slots: Vec<NaiveTime>,
}

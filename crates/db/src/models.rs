use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinic_core::models::{appointment::Appointment, doctor::Doctor, patient::Patient};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub clinic_name: String,
    pub clinic_address: String,
    pub working_start: NaiveTime,
    pub working_end: NaiveTime,
    pub slot_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            specialization: row.specialization,
            clinic_name: row.clinic_name,
            clinic_address: row.clinic_address,
            working_start: row.working_start,
            working_end: row.working_end,
            slot_minutes: row.slot_minutes,
            created_at: row.created_at,
        }
    }
}

impl From<DbPatient> for Patient {
    fn from(row: DbPatient) -> Self {
        Patient {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            date: row.appointment_date,
            time: row.appointment_time,
            created_at: row.created_at,
        }
    }
}

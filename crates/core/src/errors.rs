use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Outside working hours: {0}")]
    OutsideWorkingHours(String),

    #[error("Slot conflict: doctor {doctor_id} is already booked on {date} at {}", .time.format("%H:%M"))]
    SlotConflict {
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ClinicResult<T> = Result<T, ClinicError>;

pub mod actor;
pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod time_format;

//! # Clinic Core
//!
//! Domain types and the slot-booking engine for the clinic backend.
//!
//! - **schedule**: a doctor's working window and slot granularity
//! - **availability**: free slots for one doctor on one day
//! - **validator**: checks a requested booking against working hours and existing bookings
//! - **repository**: persistence traits implemented by `clinic-db`
//! - **services**: the appointment service consumed by the HTTP layer

pub mod availability;
pub mod errors;
pub mod models;
pub mod repository;
pub mod schedule;
pub mod services;
pub mod validator;

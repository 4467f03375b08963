//! Persistence boundary for the booking engine.
//!
//! The traits are implemented by `clinic-db` for PostgreSQL and for an
//! in-memory store. All list operations return appointments ordered by
//! `(date, time)` ascending, ties broken by id.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::errors::ClinicResult;
use crate::models::{
    appointment::{Appointment, BookAppointment},
    doctor::{Doctor, NewDoctor},
    patient::{NewPatient, Patient},
};

/// Doctor and patient profiles, including the cascading removals.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create_doctor(&self, doctor: NewDoctor) -> ClinicResult<Doctor>;

    async fn find_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>>;

    async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>>;

    /// Replaces every editable field of the doctor. Returns `None` if the
    /// doctor does not exist.
    async fn update_doctor(&self, id: Uuid, doctor: NewDoctor) -> ClinicResult<Option<Doctor>>;

    async fn create_patient(&self, patient: NewPatient) -> ClinicResult<Patient>;

    async fn find_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>>;

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>>;

    /// Deletes the doctor and every appointment with them in one transaction.
    /// Returns the number of appointments removed, or `None` if the doctor
    /// does not exist.
    async fn delete_doctor(&self, id: Uuid) -> ClinicResult<Option<u64>>;

    /// Deletes the patient and every appointment they hold in one transaction.
    async fn delete_patient(&self, id: Uuid) -> ClinicResult<Option<u64>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the appointment unless `(doctor, date, time)` is already taken.
    ///
    /// Must be atomic with respect to that key: among concurrent callers for
    /// the same slot exactly one succeeds and the rest get
    /// `ClinicError::SlotConflict`.
    async fn create_if_absent(&self, booking: BookAppointment) -> ClinicResult<Appointment>;

    async fn exists(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ClinicResult<bool>;

    async fn find(&self, id: Uuid) -> ClinicResult<Option<Appointment>>;

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
        date: Option<NaiveDate>,
    ) -> ClinicResult<Vec<Appointment>>;

    async fn list_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Appointment>>;

    async fn list_all(&self) -> ClinicResult<Vec<Appointment>>;

    /// Removes the appointment, returning it if it existed.
    async fn cancel(&self, id: Uuid) -> ClinicResult<Option<Appointment>>;
}

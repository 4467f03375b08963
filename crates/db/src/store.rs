//! PostgreSQL implementation of the booking engine's repository traits.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{Appointment, BookAppointment},
        doctor::{Doctor, NewDoctor},
        patient::{NewPatient, Patient},
    },
    repository::{BookingRepository, ProfileRepository},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// True when the report wraps a PostgreSQL foreign key violation, i.e. a
/// referenced doctor or patient was deleted concurrently.
fn is_foreign_key_violation(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|err| err.code())
        .is_some_and(|code| code == FOREIGN_KEY_VIOLATION)
}

#[derive(Clone)]
pub struct PgClinicStore {
    pool: DbPool,
}

impl PgClinicStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgClinicStore {
    async fn create_doctor(&self, doctor: NewDoctor) -> ClinicResult<Doctor> {
        let row = repositories::doctor::create_doctor(&self.pool, &doctor).await?;
        Ok(row.into())
    }

    async fn find_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>> {
        let row = repositories::doctor::get_doctor_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>> {
        let rows = repositories::doctor::list_doctors(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_doctor(&self, id: Uuid, doctor: NewDoctor) -> ClinicResult<Option<Doctor>> {
        let row = repositories::doctor::update_doctor(&self.pool, id, &doctor).await?;
        Ok(row.map(Into::into))
    }

    async fn create_patient(&self, patient: NewPatient) -> ClinicResult<Patient> {
        let row = repositories::patient::create_patient(&self.pool, &patient).await?;
        Ok(row.into())
    }

    async fn find_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>> {
        let row = repositories::patient::get_patient_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        let rows = repositories::patient::list_patients(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_doctor(&self, id: Uuid) -> ClinicResult<Option<u64>> {
        Ok(repositories::doctor::delete_doctor_cascade(&self.pool, id).await?)
    }

    async fn delete_patient(&self, id: Uuid) -> ClinicResult<Option<u64>> {
        Ok(repositories::patient::delete_patient_cascade(&self.pool, id).await?)
    }
}

#[async_trait]
impl BookingRepository for PgClinicStore {
    async fn create_if_absent(&self, booking: BookAppointment) -> ClinicResult<Appointment> {
        let row = repositories::appointment::create_appointment_if_absent(
            &self.pool,
            booking.doctor_id,
            booking.patient_id,
            booking.date,
            booking.time,
        )
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                ClinicError::NotFound(format!(
                    "Doctor {} or patient {} no longer exists",
                    booking.doctor_id, booking.patient_id
                ))
            } else {
                ClinicError::Database(err)
            }
        })?;

        row.map(Into::into).ok_or(ClinicError::SlotConflict {
            doctor_id: booking.doctor_id,
            date: booking.date,
            time: booking.time,
        })
    }

    async fn exists(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ClinicResult<bool> {
        Ok(repositories::appointment::appointment_exists(&self.pool, doctor_id, date, time).await?)
    }

    async fn find(&self, id: Uuid) -> ClinicResult<Option<Appointment>> {
        let row = repositories::appointment::get_appointment_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
        date: Option<NaiveDate>,
    ) -> ClinicResult<Vec<Appointment>> {
        let rows =
            repositories::appointment::get_appointments_by_doctor(&self.pool, doctor_id, date)
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Appointment>> {
        let rows =
            repositories::appointment::get_appointments_by_patient(&self.pool, patient_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> ClinicResult<Vec<Appointment>> {
        let rows = repositories::appointment::get_all_appointments(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn cancel(&self, id: Uuid) -> ClinicResult<Option<Appointment>> {
        let row = repositories::appointment::delete_appointment(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }
}

//! # Appointment Service
//!
//! Entry point of the booking engine. Loads the doctor's schedule, runs the
//! validator and hands the insert to the repository, surfacing their errors
//! unchanged. Conflicts are terminal: nothing here retries.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::availability;
use crate::errors::{ClinicError, ClinicResult};
use crate::models::{
    actor::Actor,
    appointment::{Appointment, BookAppointment, BookAppointmentRequest},
    doctor::{CreateDoctorRequest, Doctor, NewDoctor, UpdateDoctorRequest},
    patient::{NewPatient, Patient},
    time_format,
};
use crate::repository::{BookingRepository, ProfileRepository};
use crate::schedule::{DEFAULT_SLOT_MINUTES, Schedule};
use crate::validator;

#[derive(Clone)]
pub struct AppointmentService {
    profiles: Arc<dyn ProfileRepository>,
    bookings: Arc<dyn BookingRepository>,
    default_slot_minutes: i32,
}

impl AppointmentService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self {
            profiles,
            bookings,
            default_slot_minutes: DEFAULT_SLOT_MINUTES as i32,
        }
    }

    /// Slot length given to doctors registered without one.
    pub fn with_default_slot_minutes(mut self, minutes: i32) -> Self {
        self.default_slot_minutes = minutes;
        self
    }

    async fn load_doctor(&self, doctor_id: Uuid) -> ClinicResult<Doctor> {
        self.profiles
            .find_doctor(doctor_id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))
    }

    /// Books a slot for the patient named in `booking`.
    pub async fn book(&self, booking: BookAppointment) -> ClinicResult<Appointment> {
        let doctor = self.load_doctor(booking.doctor_id).await?;

        if self.profiles.find_patient(booking.patient_id).await?.is_none() {
            return Err(ClinicError::NotFound(format!(
                "Patient with ID {} not found",
                booking.patient_id
            )));
        }

        let schedule = doctor.schedule()?;
        validator::validate_booking(&schedule, &booking, self.bookings.as_ref()).await?;

        match self.bookings.create_if_absent(booking).await {
            Ok(appointment) => {
                info!(
                    "Appointment booked: id={}, doctor={}, patient={}, date={}, time={}",
                    appointment.id,
                    appointment.doctor_id,
                    appointment.patient_id,
                    appointment.date,
                    time_format::format_time(appointment.time)
                );
                Ok(appointment)
            }
            Err(err @ ClinicError::SlotConflict { .. }) => {
                warn!("Lost booking race: {}", err);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Books on behalf of an authenticated caller. Only patients book, and
    /// always for themselves.
    pub async fn book_as(
        &self,
        actor: &Actor,
        request: BookAppointmentRequest,
    ) -> ClinicResult<Appointment> {
        let Actor::Patient(patient_id) = *actor else {
            return Err(ClinicError::Authorization(
                "Only patients can book appointments".to_string(),
            ));
        };

        let booking = request.into_booking(patient_id)?;
        self.book(booking).await
    }

    pub async fn available_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<NaiveTime>> {
        let doctor = self.load_doctor(doctor_id).await?;
        let schedule = doctor.schedule()?;

        let booked = self
            .bookings
            .list_for_doctor(doctor_id, Some(date))
            .await?;

        Ok(availability::free_slots(
            &schedule,
            booked.into_iter().map(|appointment| appointment.time),
        ))
    }

    /// Admins see every appointment, doctors and patients their own.
    pub async fn list_appointments(&self, actor: &Actor) -> ClinicResult<Vec<Appointment>> {
        match *actor {
            Actor::Admin => self.bookings.list_all().await,
            Actor::Doctor(doctor_id) => self.bookings.list_for_doctor(doctor_id, None).await,
            Actor::Patient(patient_id) => self.bookings.list_for_patient(patient_id).await,
        }
    }

    /// Cancels an appointment, freeing its slot. Rescheduling is a cancel
    /// followed by a new booking.
    pub async fn cancel(&self, actor: &Actor, appointment_id: Uuid) -> ClinicResult<Appointment> {
        let appointment = self.bookings.find(appointment_id).await?.ok_or_else(|| {
            ClinicError::NotFound(format!("Appointment with ID {} not found", appointment_id))
        })?;

        let allowed = match *actor {
            Actor::Admin => true,
            Actor::Doctor(id) => appointment.doctor_id == id,
            Actor::Patient(id) => appointment.patient_id == id,
        };
        if !allowed {
            return Err(ClinicError::Authorization(
                "Appointment belongs to someone else".to_string(),
            ));
        }

        // Gone between find and cancel means someone else cancelled it
        let cancelled = self.bookings.cancel(appointment_id).await?.ok_or_else(|| {
            ClinicError::NotFound(format!("Appointment with ID {} not found", appointment_id))
        })?;

        info!(
            "Appointment cancelled: id={}, doctor={}, date={}, time={}",
            cancelled.id,
            cancelled.doctor_id,
            cancelled.date,
            time_format::format_time(cancelled.time)
        );
        Ok(cancelled)
    }

    pub async fn register_doctor(
        &self,
        actor: &Actor,
        request: CreateDoctorRequest,
    ) -> ClinicResult<Doctor> {
        require_admin(actor)?;

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ClinicError::Validation("Doctor name must not be empty".to_string()));
        }

        let working_start = time_format::parse_time(&request.working_start)?;
        let working_end = time_format::parse_time(&request.working_end)?;
        let slot_minutes = request.slot_minutes.unwrap_or(self.default_slot_minutes);

        Schedule::new(
            working_start,
            working_end,
            chrono::Duration::minutes(i64::from(slot_minutes)),
        )?;

        let doctor = self
            .profiles
            .create_doctor(NewDoctor {
                name,
                specialization: request
                    .specialization
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| "General".to_string()),
                clinic_name: request.clinic_name,
                clinic_address: request.clinic_address,
                working_start,
                working_end,
                slot_minutes,
            })
            .await?;

        info!("Doctor registered: id={}, name={}", doctor.id, doctor.name);
        Ok(doctor)
    }

    /// Full doctor profile. Admin only, everyone else uses the listing.
    pub async fn get_doctor(&self, actor: &Actor, doctor_id: Uuid) -> ClinicResult<Doctor> {
        require_admin(actor)?;
        self.load_doctor(doctor_id).await
    }

    /// Applies a partial edit. A changed working window or slot length is
    /// checked like a new registration; appointments already booked are kept.
    pub async fn update_doctor(
        &self,
        actor: &Actor,
        doctor_id: Uuid,
        patch: UpdateDoctorRequest,
    ) -> ClinicResult<Doctor> {
        require_admin(actor)?;
        let current = self.load_doctor(doctor_id).await?;

        let name = match patch.name {
            Some(name) => name.trim().to_string(),
            None => current.name,
        };
        if name.is_empty() {
            return Err(ClinicError::Validation("Doctor name must not be empty".to_string()));
        }

        let working_start = match patch.working_start {
            Some(raw) => time_format::parse_time(&raw)?,
            None => current.working_start,
        };
        let working_end = match patch.working_end {
            Some(raw) => time_format::parse_time(&raw)?,
            None => current.working_end,
        };
        let slot_minutes = patch.slot_minutes.unwrap_or(current.slot_minutes);

        Schedule::new(
            working_start,
            working_end,
            chrono::Duration::minutes(i64::from(slot_minutes)),
        )?;

        let updated = NewDoctor {
            name,
            specialization: patch
                .specialization
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(current.specialization),
            clinic_name: patch.clinic_name.unwrap_or(current.clinic_name),
            clinic_address: patch.clinic_address.unwrap_or(current.clinic_address),
            working_start,
            working_end,
            slot_minutes,
        };

        let doctor = self
            .profiles
            .update_doctor(doctor_id, updated)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))?;

        info!(
            "Doctor updated: id={}, hours={}-{}, slot_minutes={}",
            doctor.id,
            time_format::format_time(doctor.working_start),
            time_format::format_time(doctor.working_end),
            doctor.slot_minutes
        );
        Ok(doctor)
    }

    pub async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>> {
        self.profiles.list_doctors().await
    }

    pub async fn register_patient(&self, patient: NewPatient) -> ClinicResult<Patient> {
        if patient.first_name.trim().is_empty() || patient.last_name.trim().is_empty() {
            return Err(ClinicError::Validation(
                "Patient first and last name must not be empty".to_string(),
            ));
        }

        let patient = self.profiles.create_patient(patient).await?;
        info!("Patient registered: id={}", patient.id);
        Ok(patient)
    }

    pub async fn list_patients(&self, actor: &Actor) -> ClinicResult<Vec<Patient>> {
        require_admin(actor)?;
        self.profiles.list_patients().await
    }

    /// Removes a doctor and all their appointments. Returns how many
    /// appointments went with them.
    pub async fn remove_doctor(&self, actor: &Actor, doctor_id: Uuid) -> ClinicResult<u64> {
        require_admin(actor)?;

        let removed = self
            .profiles
            .delete_doctor(doctor_id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))?;

        info!(
            "Doctor removed: id={}, appointments_removed={}",
            doctor_id, removed
        );
        Ok(removed)
    }

    pub async fn remove_patient(&self, actor: &Actor, patient_id: Uuid) -> ClinicResult<u64> {
        require_admin(actor)?;

        let removed = self
            .profiles
            .delete_patient(patient_id)
            .await?
            .ok_or_else(|| {
                ClinicError::NotFound(format!("Patient with ID {} not found", patient_id))
            })?;

        info!(
            "Patient removed: id={}, appointments_removed={}",
            patient_id, removed
        );
        Ok(removed)
    }
}

fn require_admin(actor: &Actor) -> ClinicResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ClinicError::Authorization("Admin access required".to_string()))
    }
}

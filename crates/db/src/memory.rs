//! In-process implementation of the repository traits.
//!
//! Everything lives behind one mutex, so each operation is atomic and the
//! cascading removals are all-or-nothing. Appointments are keyed by
//! `(doctor, date, time)`, which is what makes `create_if_absent` race free.

use std::collections::{BTreeMap, HashMap, btree_map::Entry};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{Appointment, BookAppointment},
        doctor::{Doctor, NewDoctor},
        patient::{NewPatient, Patient},
    },
    repository::{BookingRepository, ProfileRepository},
};
use tokio::sync::Mutex;
use uuid::Uuid;

type SlotKey = (Uuid, NaiveDate, NaiveTime);

#[derive(Default)]
struct State {
    doctors: HashMap<Uuid, Doctor>,
    patients: HashMap<Uuid, Patient>,
    appointments: BTreeMap<SlotKey, Appointment>,
}

impl State {
    fn sorted<'a>(appointments: impl Iterator<Item = &'a Appointment>) -> Vec<Appointment> {
        let mut list: Vec<Appointment> = appointments.cloned().collect();
        list.sort_by(|a, b| (a.date, a.time, a.id).cmp(&(b.date, b.time, b.id)));
        list
    }

    fn remove_where(&mut self, keep: impl Fn(&Appointment) -> bool) -> u64 {
        let before = self.appointments.len();
        self.appointments.retain(|_, appointment| keep(appointment));
        (before - self.appointments.len()) as u64
    }
}

#[derive(Default)]
pub struct InMemoryClinicStore {
    state: Mutex<State>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryClinicStore {
    async fn create_doctor(&self, doctor: NewDoctor) -> ClinicResult<Doctor> {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: doctor.name,
            specialization: doctor.specialization,
            clinic_name: doctor.clinic_name,
            clinic_address: doctor.clinic_address,
            working_start: doctor.working_start,
            working_end: doctor.working_end,
            slot_minutes: doctor.slot_minutes,
            created_at: Utc::now(),
        };

        self.state
            .lock()
            .await
            .doctors
            .insert(doctor.id, doctor.clone());
        Ok(doctor)
    }

    async fn find_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>> {
        Ok(self.state.lock().await.doctors.get(&id).cloned())
    }

    async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>> {
        let state = self.state.lock().await;
        let mut doctors: Vec<Doctor> = state.doctors.values().cloned().collect();
        doctors.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(doctors)
    }

    async fn update_doctor(&self, id: Uuid, doctor: NewDoctor) -> ClinicResult<Option<Doctor>> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.doctors.get_mut(&id) else {
            return Ok(None);
        };

        stored.name = doctor.name;
        stored.specialization = doctor.specialization;
        stored.clinic_name = doctor.clinic_name;
        stored.clinic_address = doctor.clinic_address;
        stored.working_start = doctor.working_start;
        stored.working_end = doctor.working_end;
        stored.slot_minutes = doctor.slot_minutes;
        Ok(Some(stored.clone()))
    }

    async fn create_patient(&self, patient: NewPatient) -> ClinicResult<Patient> {
        let patient = Patient {
            id: Uuid::new_v4(),
            first_name: patient.first_name,
            last_name: patient.last_name,
            phone: patient.phone,
            created_at: Utc::now(),
        };

        self.state
            .lock()
            .await
            .patients
            .insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn find_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>> {
        Ok(self.state.lock().await.patients.get(&id).cloned())
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        let state = self.state.lock().await;
        let mut patients: Vec<Patient> = state.patients.values().cloned().collect();
        patients.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(patients)
    }

    async fn delete_doctor(&self, id: Uuid) -> ClinicResult<Option<u64>> {
        let mut state = self.state.lock().await;
        if state.doctors.remove(&id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.remove_where(|a| a.doctor_id != id)))
    }

    async fn delete_patient(&self, id: Uuid) -> ClinicResult<Option<u64>> {
        let mut state = self.state.lock().await;
        if state.patients.remove(&id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.remove_where(|a| a.patient_id != id)))
    }
}

#[async_trait]
impl BookingRepository for InMemoryClinicStore {
    async fn create_if_absent(&self, booking: BookAppointment) -> ClinicResult<Appointment> {
        let mut state = self.state.lock().await;

        if !state.doctors.contains_key(&booking.doctor_id) {
            return Err(ClinicError::NotFound(format!(
                "Doctor with ID {} not found",
                booking.doctor_id
            )));
        }
        if !state.patients.contains_key(&booking.patient_id) {
            return Err(ClinicError::NotFound(format!(
                "Patient with ID {} not found",
                booking.patient_id
            )));
        }

        match state
            .appointments
            .entry((booking.doctor_id, booking.date, booking.time))
        {
            Entry::Occupied(_) => Err(ClinicError::SlotConflict {
                doctor_id: booking.doctor_id,
                date: booking.date,
                time: booking.time,
            }),
            Entry::Vacant(slot) => {
                let appointment = Appointment {
                    id: Uuid::new_v4(),
                    doctor_id: booking.doctor_id,
                    patient_id: booking.patient_id,
                    date: booking.date,
                    time: booking.time,
                    created_at: Utc::now(),
                };
                Ok(slot.insert(appointment).clone())
            }
        }
    }

    async fn exists(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ClinicResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .appointments
            .contains_key(&(doctor_id, date, time)))
    }

    async fn find(&self, id: Uuid) -> ClinicResult<Option<Appointment>> {
        let state = self.state.lock().await;
        Ok(state.appointments.values().find(|a| a.id == id).cloned())
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
        date: Option<NaiveDate>,
    ) -> ClinicResult<Vec<Appointment>> {
        let state = self.state.lock().await;
        Ok(State::sorted(state.appointments.values().filter(|a| {
            a.doctor_id == doctor_id && date.is_none_or(|day| a.date == day)
        })))
    }

    async fn list_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Appointment>> {
        let state = self.state.lock().await;
        Ok(State::sorted(
            state
                .appointments
                .values()
                .filter(|a| a.patient_id == patient_id),
        ))
    }

    async fn list_all(&self) -> ClinicResult<Vec<Appointment>> {
        let state = self.state.lock().await;
        Ok(State::sorted(state.appointments.values()))
    }

    async fn cancel(&self, id: Uuid) -> ClinicResult<Option<Appointment>> {
        let mut state = self.state.lock().await;
        let key = state
            .appointments
            .iter()
            .find(|(_, a)| a.id == id)
            .map(|(key, _)| *key);

        Ok(key.and_then(|key| state.appointments.remove(&key)))
    }
}

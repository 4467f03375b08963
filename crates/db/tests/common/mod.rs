#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use clinic_core::{
    models::{
        doctor::{Doctor, NewDoctor},
        patient::{NewPatient, Patient},
    },
    repository::ProfileRepository,
    services::appointment::AppointmentService,
};
use clinic_db::memory::InMemoryClinicStore;
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn new_doctor(start: NaiveTime, end: NaiveTime) -> NewDoctor {
    NewDoctor {
        name: format!("Dr. {}", LastName().fake::<String>()),
        specialization: "General".to_string(),
        clinic_name: "Main Street Clinic".to_string(),
        clinic_address: "1 Main Street".to_string(),
        working_start: start,
        working_end: end,
        slot_minutes: 120,
    }
}

pub fn new_patient() -> NewPatient {
    NewPatient {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        phone: None,
    }
}

pub struct Fixture {
    pub store: Arc<InMemoryClinicStore>,
    pub service: AppointmentService,
    pub doctor: Doctor,
    pub patient: Patient,
}

/// A service over an in-memory store with one 09:00-17:00 doctor and one patient.
pub async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryClinicStore::new());
    let doctor = store.create_doctor(new_doctor(t(9, 0), t(17, 0))).await.unwrap();
    let patient = store.create_patient(new_patient()).await.unwrap();
    let service = AppointmentService::new(store.clone(), store.clone());

    Fixture {
        store,
        service,
        doctor,
        patient,
    }
}

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use clinic_core::{
    errors::ClinicResult,
    models::{
        appointment::{Appointment, BookAppointment},
        doctor::{Doctor, NewDoctor},
        patient::{NewPatient, Patient},
    },
    repository::{BookingRepository, ProfileRepository},
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub ProfileRepo {}

    #[async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn create_doctor(&self, doctor: NewDoctor) -> ClinicResult<Doctor>;
        async fn find_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>>;
        async fn list_doctors(&self) -> ClinicResult<Vec<Doctor>>;
        async fn update_doctor(&self, id: Uuid, doctor: NewDoctor) -> ClinicResult<Option<Doctor>>;
        async fn create_patient(&self, patient: NewPatient) -> ClinicResult<Patient>;
        async fn find_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>>;
        async fn list_patients(&self) -> ClinicResult<Vec<Patient>>;
        async fn delete_doctor(&self, id: Uuid) -> ClinicResult<Option<u64>>;
        async fn delete_patient(&self, id: Uuid) -> ClinicResult<Option<u64>>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
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
        async fn cancel(&self, id: Uuid) -> ClinicResult<Option<Appointment>>;
    }
}

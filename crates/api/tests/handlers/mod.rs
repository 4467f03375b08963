mod appointment_test;
mod doctor_test;
mod health_test;
mod middleware_test;
mod patient_test;

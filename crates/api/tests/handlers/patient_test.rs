use axum::http::StatusCode;
use clinic_core::models::{doctor::DeleteProfileResponse, patient::Patient};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{TestContext, as_admin, as_patient};

#[tokio::test]
async fn test_register_patient_without_identity() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/patients")
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+44 20 7946 0000",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let patient = response.json::<Patient>();
    assert_eq!(patient.first_name, "Ada");
    assert_eq!(patient.phone.as_deref(), Some("+44 20 7946 0000"));
}

#[tokio::test]
async fn test_register_patient_blank_name() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/patients")
        .json(&json!({ "first_name": "  ", "last_name": "Lovelace", "phone": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_patients_admin_only() {
    let ctx = TestContext::new().await;

    let response = as_patient(ctx.server.get("/api/patients"), ctx.patient.id).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let patients = as_admin(ctx.server.get("/api/patients"))
        .await
        .json::<Vec<Patient>>();
    assert_eq!(patients, vec![ctx.patient.clone()]);
}

#[tokio::test]
async fn test_delete_patient_frees_their_slots() {
    let ctx = TestContext::new().await;

    let response = as_patient(ctx.server.post("/api/appointments"), ctx.patient.id)
        .json(&json!({
            "doctor_id": ctx.doctor.id,
            "date": "2024-01-01",
            "time": "13:00",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body = as_admin(ctx.server.delete(&format!("/api/patients/{}", ctx.patient.id)))
        .await
        .json::<DeleteProfileResponse>();
    assert_eq!(body.appointments_removed, 1);

    let slots = ctx
        .service
        .available_slots(ctx.doctor.id, chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(slots.len(), 4);
}

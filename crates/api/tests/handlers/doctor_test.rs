use axum::http::StatusCode;
use clinic_core::models::doctor::{DeleteProfileResponse, Doctor};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, as_admin, as_doctor, as_patient};

#[tokio::test]
async fn test_create_doctor() {
    let ctx = TestContext::new().await;

    let response = as_admin(ctx.server.post("/api/doctors"))
        .json(&json!({
            "name": "Dr. Ortiz",
            "working_start": "08:30",
            "working_end": "12:30",
            "slot_minutes": 60,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["name"], json!("Dr. Ortiz"));
    assert_eq!(body["specialization"], json!("General"));
    assert_eq!(body["working_start"], json!("08:30"));
    assert_eq!(body["working_end"], json!("12:30"));
    assert_eq!(body["slot_minutes"], json!(60));
}

#[tokio::test]
async fn test_create_doctor_uses_default_slot_length() {
    let ctx = TestContext::new().await;

    let doctor = as_admin(ctx.server.post("/api/doctors"))
        .json(&json!({
            "name": "Dr. Okafor",
            "working_start": "09:00",
            "working_end": "17:00",
        }))
        .await
        .json::<Doctor>();

    assert_eq!(doctor.slot_minutes, 120);
}

#[tokio::test]
async fn test_create_doctor_invalid_schedule() {
    let ctx = TestContext::new().await;

    for (start, end, slot) in [("17:00", "09:00", 60), ("09:00", "09:00", 60), ("09:00", "17:00", 0)] {
        let response = as_admin(ctx.server.post("/api/doctors"))
            .json(&json!({
                "name": "Dr. Ortiz",
                "working_start": start,
                "working_end": end,
                "slot_minutes": slot,
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Invalid schedule"), "{}", error);
    }
}

#[tokio::test]
async fn test_create_doctor_admin_only() {
    let ctx = TestContext::new().await;

    let response = as_doctor(ctx.server.post("/api/doctors"), ctx.doctor.id)
        .json(&json!({
            "name": "Dr. Ortiz",
            "working_start": "09:00",
            "working_end": "17:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_and_list_doctors() {
    let ctx = TestContext::new().await;

    let doctor = as_admin(ctx.server.get(&format!("/api/doctors/{}", ctx.doctor.id)))
        .await
        .json::<Doctor>();
    assert_eq!(doctor, ctx.doctor);

    // Detail is admin only, the listing is open to every caller
    let response = as_patient(
        ctx.server.get(&format!("/api/doctors/{}", ctx.doctor.id)),
        ctx.patient.id,
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let doctors = as_patient(ctx.server.get("/api/doctors"), ctx.patient.id)
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(doctors, vec![ctx.doctor.clone()]);

    let response = as_admin(ctx.server.get(&format!("/api/doctors/{}", Uuid::new_v4()))).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_doctor_hours() {
    let ctx = TestContext::new().await;

    let response = as_admin(ctx.server.put(&format!("/api/doctors/{}", ctx.doctor.id)))
        .json(&json!({ "working_end": "13:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doctor = response.json::<Doctor>();
    assert_eq!(doctor.id, ctx.doctor.id);
    assert_eq!(doctor.name, ctx.doctor.name);
    assert_eq!(doctor.working_end.format("%H:%M").to_string(), "13:00");

    let slots = as_patient(
        ctx.server
            .get("/api/available-slots")
            .add_query_param("doctor", ctx.doctor.id)
            .add_query_param("date", "2024-01-01"),
        ctx.patient.id,
    )
    .await
    .json::<Value>();
    assert_eq!(slots["available_slots"], json!(["09:00", "11:00"]));
}

#[tokio::test]
async fn test_update_doctor_rejections() {
    let ctx = TestContext::new().await;
    let path = format!("/api/doctors/{}", ctx.doctor.id);

    let response = as_admin(ctx.server.put(&path))
        .json(&json!({ "working_start": "18:00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid schedule"), "{}", error);

    let response = as_doctor(ctx.server.put(&path), ctx.doctor.id)
        .json(&json!({ "working_end": "13:00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = as_admin(ctx.server.put(&format!("/api/doctors/{}", Uuid::new_v4())))
        .json(&json!({ "working_end": "13:00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_doctor_id_is_json_error() {
    let ctx = TestContext::new().await;

    let response = as_admin(ctx.server.get("/api/doctors/not-a-uuid")).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_delete_doctor_removes_appointments() {
    let ctx = TestContext::new().await;

    for time in ["09:00", "11:00"] {
        let response = as_patient(ctx.server.post("/api/appointments"), ctx.patient.id)
            .json(&json!({
                "doctor_id": ctx.doctor.id,
                "date": "2024-01-01",
                "time": time,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let forbidden = as_patient(
        ctx.server.delete(&format!("/api/doctors/{}", ctx.doctor.id)),
        ctx.patient.id,
    )
    .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let body = as_admin(ctx.server.delete(&format!("/api/doctors/{}", ctx.doctor.id)))
        .await
        .json::<DeleteProfileResponse>();
    assert_eq!(body.id, ctx.doctor.id);
    assert_eq!(body.appointments_removed, 2);

    let remaining = as_admin(ctx.server.get("/api/appointments"))
        .await
        .json::<Vec<Value>>();
    assert!(remaining.is_empty());

    let again = as_admin(ctx.server.delete(&format!("/api/doctors/{}", ctx.doctor.id))).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

use axum::http::StatusCode;
use clinic_core::{errors::ClinicError, models::appointment::Appointment};
use clinic_db::mock::repositories::{MockBookingRepo, MockProfileRepo};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, as_admin, as_doctor, as_patient, mock_server};

async fn book(ctx: &TestContext, patient: Uuid, time: &str) -> axum_test::TestResponse {
    as_patient(ctx.server.post("/api/appointments"), patient)
        .json(&json!({
            "doctor_id": ctx.doctor.id,
            "date": "2024-01-01",
            "time": time,
        }))
        .await
}

async fn free_slots(ctx: &TestContext, date: &str) -> Value {
    let response = as_patient(
        ctx.server
            .get("/api/available-slots")
            .add_query_param("doctor", ctx.doctor.id)
            .add_query_param("date", date),
        ctx.patient.id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()
}

#[tokio::test]
async fn test_book_appointment_created() {
    let ctx = TestContext::new().await;

    let response = book(&ctx, ctx.patient.id, "11:00").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["doctor_id"], json!(ctx.doctor.id));
    assert_eq!(body["patient_id"], json!(ctx.patient.id));
    assert_eq!(body["date"], json!("2024-01-01"));
    assert_eq!(body["time"], json!("11:00"));
}

#[tokio::test]
async fn test_book_taken_slot_conflicts() {
    let ctx = TestContext::new().await;
    let other = ctx.another_patient().await;

    assert_eq!(
        book(&ctx, ctx.patient.id, "11:00").await.status_code(),
        StatusCode::CREATED
    );

    let response = book(&ctx, other.id, "11:00").await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Slot conflict"), "{}", error);
}

#[tokio::test]
async fn test_book_outside_working_hours() {
    let ctx = TestContext::new().await;

    for time in ["08:00", "15:01", "17:00"] {
        let response = book(&ctx, ctx.patient.id, time).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", time);

        let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Outside working hours"), "{}", error);
    }

    // Last slot that still fits
    assert_eq!(
        book(&ctx, ctx.patient.id, "15:00").await.status_code(),
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_book_malformed_time() {
    let ctx = TestContext::new().await;

    let response = book(&ctx, ctx.patient.id, "25:00").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_unknown_doctor() {
    let ctx = TestContext::new().await;

    let response = as_patient(ctx.server.post("/api/appointments"), ctx.patient.id)
        .json(&json!({
            "doctor_id": Uuid::new_v4(),
            "date": "2024-01-01",
            "time": "11:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_requires_identity() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "doctor_id": ctx.doctor.id,
            "date": "2024-01-01",
            "time": "11:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_doctor_cannot_book() {
    let ctx = TestContext::new().await;

    let response = as_doctor(ctx.server.post("/api/appointments"), ctx.doctor.id)
        .json(&json!({
            "doctor_id": ctx.doctor.id,
            "date": "2024-01-01",
            "time": "11:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_available_slots_excludes_booked() {
    let ctx = TestContext::new().await;

    let body = free_slots(&ctx, "2024-01-01").await;
    assert_eq!(
        body,
        json!({
            "doctor": ctx.doctor.id,
            "date": "2024-01-01",
            "available_slots": ["09:00", "11:00", "13:00", "15:00"],
        })
    );

    book(&ctx, ctx.patient.id, "11:00").await;

    let body = free_slots(&ctx, "2024-01-01").await;
    assert_eq!(body["available_slots"], json!(["09:00", "13:00", "15:00"]));

    // Other days are untouched
    let body = free_slots(&ctx, "2024-01-02").await;
    assert_eq!(
        body["available_slots"],
        json!(["09:00", "11:00", "13:00", "15:00"])
    );
}

#[tokio::test]
async fn test_available_slots_bad_date() {
    let ctx = TestContext::new().await;

    let response = as_patient(
        ctx.server
            .get("/api/available-slots")
            .add_query_param("doctor", ctx.doctor.id)
            .add_query_param("date", "01/01/2024"),
        ctx.patient.id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_appointments_by_role() {
    let ctx = TestContext::new().await;
    let other = ctx.another_patient().await;

    book(&ctx, ctx.patient.id, "09:00").await;
    book(&ctx, other.id, "13:00").await;

    let mine = as_patient(ctx.server.get("/api/appointments"), ctx.patient.id)
        .await
        .json::<Vec<Appointment>>();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].patient_id, ctx.patient.id);

    let doctors = as_doctor(ctx.server.get("/api/appointments"), ctx.doctor.id)
        .await
        .json::<Vec<Appointment>>();
    assert_eq!(doctors.len(), 2);

    let all = as_admin(ctx.server.get("/api/appointments"))
        .await
        .json::<Vec<Appointment>>();
    assert_eq!(all, doctors);
}

#[tokio::test]
async fn test_cancel_frees_slot() {
    let ctx = TestContext::new().await;

    let appointment = book(&ctx, ctx.patient.id, "11:00").await.json::<Appointment>();

    let response = as_patient(
        ctx.server
            .delete(&format!("/api/appointments/{}", appointment.id)),
        ctx.patient.id,
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let body = free_slots(&ctx, "2024-01-01").await;
    assert_eq!(
        body["available_slots"],
        json!(["09:00", "11:00", "13:00", "15:00"])
    );

    // Already gone
    let response = as_admin(
        ctx.server
            .delete(&format!("/api/appointments/{}", appointment.id)),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_someone_elses_appointment() {
    let ctx = TestContext::new().await;
    let other = ctx.another_patient().await;

    let appointment = book(&ctx, ctx.patient.id, "11:00").await.json::<Appointment>();

    let response = as_patient(
        ctx.server
            .delete(&format!("/api/appointments/{}", appointment.id)),
        other.id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_database_failure_is_hidden() {
    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_find_doctor()
        .returning(|_| Err(ClinicError::Database(eyre::eyre!("connection reset by peer"))));
    let server = mock_server(profiles, MockBookingRepo::new());

    let response = as_admin(server
        .get("/api/available-slots")
        .add_query_param("doctor", Uuid::new_v4())
        .add_query_param("date", "2024-01-01"))
    .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_malformed_doctor_in_query_is_json_error() {
    let ctx = TestContext::new().await;

    let response = as_patient(
        ctx.server
            .get("/api/available-slots")
            .add_query_param("doctor", "not-a-uuid")
            .add_query_param("date", "2024-01-01"),
        ctx.patient.id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Validation error"), "{}", error);
}

#[tokio::test]
async fn test_malformed_booking_body_is_json_error() {
    let ctx = TestContext::new().await;

    let response = as_patient(ctx.server.post("/api/appointments"), ctx.patient.id)
        .json(&json!({ "doctor_id": ctx.doctor.id, "date": "2024-01-01" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Validation error"), "{}", error);
}

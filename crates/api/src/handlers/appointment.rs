//! # Appointment Handlers
//!
//! Booking, availability, listing and cancellation. Payloads are parsed into
//! the engine's typed requests here and every rule is enforced by
//! `AppointmentService`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinic_core::models::{
    appointment::{
        Appointment, AvailableSlotsQuery, AvailableSlotsResponse, BookAppointmentRequest,
    },
    time_format,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
};

/// Books a slot for the calling patient.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// {"doctor_id": "<uuid>", "date": "2024-01-01", "time": "11:00"}
/// ```
///
/// # Errors
///
/// * 400 - malformed date/time, or the slot is outside working hours
/// * 403 - the caller is not a patient
/// * 404 - unknown doctor or patient
/// * 409 - the slot is already booked
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppJson(payload): AppJson<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = state.service.book_as(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state.service.list_appointments(&actor).await?;
    Ok(Json(appointments))
}

/// Free slots of a doctor on one day.
///
/// # Endpoint
///
/// ```text
/// GET /api/available-slots?doctor=<uuid>&date=2024-01-01
/// ```
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    CurrentActor(_actor): CurrentActor,
    AppQuery(query): AppQuery<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let date = time_format::parse_date(&query.date)?;
    let available_slots = state.service.available_slots(query.doctor, date).await?;

    Ok(Json(AvailableSlotsResponse {
        doctor: query.doctor,
        date,
        available_slots,
    }))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.service.cancel(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

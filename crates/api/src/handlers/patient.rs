use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinic_core::models::{
    doctor::DeleteProfileResponse,
    patient::{NewPatient, Patient},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
};

/// Registration is open, so no caller identity is required.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = state.service.register_patient(payload).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<Patient>>, AppError> {
    Ok(Json(state.service.list_patients(&actor).await?))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteProfileResponse>, AppError> {
    let appointments_removed = state.service.remove_patient(&actor, id).await?;
    Ok(Json(DeleteProfileResponse {
        id,
        appointments_removed,
    }))
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinic_core::models::doctor::{
    CreateDoctorRequest, DeleteProfileResponse, Doctor, UpdateDoctorRequest,
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

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppJson(payload): AppJson<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Doctor>), AppError> {
    let doctor = state.service.register_doctor(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    CurrentActor(_actor): CurrentActor,
) -> Result<Json<Vec<Doctor>>, AppError> {
    Ok(Json(state.service.list_doctors().await?))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    Ok(Json(state.service.get_doctor(&actor, id).await?))
}

/// Partial edit, e.g. `{"working_end": "13:00"}`. Admin only.
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    Ok(Json(state.service.update_doctor(&actor, id, payload).await?))
}

/// Removes a doctor together with their appointments. Admin only.
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteProfileResponse>, AppError> {
    let appointments_removed = state.service.remove_doctor(&actor, id).await?;
    Ok(Json(DeleteProfileResponse {
        id,
        appointments_removed,
    }))
}

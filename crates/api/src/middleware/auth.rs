//! # Caller Identity
//!
//! Credentials are verified upstream. By the time a request reaches this
//! service the gateway has resolved the caller and forwards it in two headers:
//!
//! - `x-clinic-role`: `admin`, `doctor` or `patient`
//! - `x-clinic-user`: the doctor or patient profile id (not needed for admins)
//!
//! Handlers take a [`CurrentActor`] argument to require an identity.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::actor::Actor,
};
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

pub const ROLE_HEADER: &str = "x-clinic-role";
pub const USER_HEADER: &str = "x-clinic-user";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers)
            .map(CurrentActor)
            .map_err(AppError)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> ClinicResult<Option<&'a str>> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::trim)
                .map_err(|_| ClinicError::Authentication(format!("Header {} is not valid text", name)))
        })
        .transpose()
}

/// Resolves the caller from the identity headers.
pub fn actor_from_headers(headers: &HeaderMap) -> ClinicResult<Actor> {
    let role = header(headers, ROLE_HEADER)?
        .ok_or_else(|| ClinicError::Authentication(format!("Missing {} header", ROLE_HEADER)))?;

    let user_id = || -> ClinicResult<Uuid> {
        let raw = header(headers, USER_HEADER)?.ok_or_else(|| {
            ClinicError::Authentication(format!("Missing {} header", USER_HEADER))
        })?;
        Uuid::parse_str(raw).map_err(|_| {
            ClinicError::Authentication(format!("Header {} must be a UUID", USER_HEADER))
        })
    };

    match role.to_ascii_lowercase().as_str() {
        "admin" => Ok(Actor::Admin),
        "doctor" => Ok(Actor::Doctor(user_id()?)),
        "patient" => Ok(Actor::Patient(user_id()?)),
        other => Err(ClinicError::Authentication(format!("Unknown role '{}'", other))),
    }
}

//! Request extractors whose rejections use the JSON error body.
//!
//! axum's own `Json`, `Query` and `Path` reject with plain text. These wrap
//! them so a malformed payload, query string or path id comes back as a 400
//! `{"error": "..."}` like every other client error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::middleware::error_handling::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::book_appointment),
        )
        .route(
            "/api/available-slots",
            get(handlers::appointment::available_slots),
        )
        .route(
            "/api/appointments/:id",
            delete(handlers::appointment::cancel_appointment),
        )
}

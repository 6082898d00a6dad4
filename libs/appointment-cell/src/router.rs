use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/citas",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route(
            "/citas/{cita_id}",
            put(handlers::update_appointment).delete(handlers::delete_appointment),
        )
        .with_state(state)
}

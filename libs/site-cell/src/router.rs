use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

/// `{sede}` is the numeric id for updates and weekday lookups, and the
/// site name for slot counting.
pub fn site_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sedes", get(handlers::list_sites))
        .route("/sedes/{sede}", put(handlers::update_site))
        .route("/sedes/{sede}/dias-disponibles", get(handlers::available_days))
        .route("/sedes/{sede}/turnos-disponibles", get(handlers::slot_availability))
        .with_state(state)
}

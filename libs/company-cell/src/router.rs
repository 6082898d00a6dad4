use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn company_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/empresas", get(handlers::list_companies))
        .route("/empresas/{empresa}", put(handlers::update_company))
        .route("/empresas/{empresa}/turnos-disponibles", get(handlers::slot_availability))
        .with_state(state)
}

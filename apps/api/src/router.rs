use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use company_cell::router::company_routes;
use shared_database::AppState;
use site_cell::router::site_routes;

async fn root() -> Json<Value> {
    Json(json!({ "message": "API de Citas activa" }))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(auth_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(site_routes(state.clone()))
        .merge(company_routes(state))
}

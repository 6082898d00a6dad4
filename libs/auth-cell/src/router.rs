use std::sync::Arc;

use axum::{
    routing::{post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    let session_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register));

    let account_routes = Router::new()
        .route("/usuarios/{usr_id}/username", put(handlers::update_username))
        .route("/usuarios/{usr_id}/password", put(handlers::update_password));

    Router::new()
        .merge(session_routes)
        .merge(account_routes)
        .with_state(state)
}

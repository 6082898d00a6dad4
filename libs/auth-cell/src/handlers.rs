use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use shared_database::{run_blocking, AppState};
use shared_models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, UpdatePasswordRequest, UpdateUsernameRequest,
};
use shared_models::error::AppError;
use shared_models::extract::{ApiJson, ApiPath};
use shared_models::MessageResponse;

use crate::services::AccountService;

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    debug!("Login attempt for {}", request.usuario);

    let response = run_blocking(move || {
        let service = AccountService::new(&state);
        Ok(service.login(&request)?)
    })
    .await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = AccountService::new(&state);
        service.register(&request)?;
        Ok(())
    })
    .await?;

    Ok(Json(MessageResponse::new("Registro exitoso")))
}

#[axum::debug_handler]
pub async fn update_username(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateUsernameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = AccountService::new(&state);
        Ok(service.update_username(user_id, &request.username)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Nombre de usuario actualizado")))
}

#[axum::debug_handler]
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = AccountService::new(&state);
        Ok(service.update_password(user_id, &request.password)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Contraseña actualizada")))
}

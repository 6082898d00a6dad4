use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use shared_database::{run_blocking, AppState};
use shared_models::appointment::{
    AppointmentSummary, BookingReceipt, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use shared_models::error::AppError;
use shared_models::extract::{ApiJson, ApiPath};
use shared_models::MessageResponse;

use crate::services::{AppointmentService, BookingService};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> Result<Json<BookingReceipt>, AppError> {
    debug!("Booking request for site {}", request.sede);

    let receipt = run_blocking(move || {
        let service = BookingService::new(&state);
        Ok(service.book(&request)?)
    })
    .await?;

    Ok(Json(receipt))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AppointmentSummary>>, AppError> {
    let appointments = run_blocking(move || {
        let service = AppointmentService::new(&state);
        Ok(service.list()?)
    })
    .await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    ApiPath(cita_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateAppointmentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = AppointmentService::new(&state);
        Ok(service.update(cita_id, &request)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Cita actualizada")))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    ApiPath(cita_id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = AppointmentService::new(&state);
        Ok(service.delete(cita_id)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Cita eliminada")))
}

use std::sync::Arc;

use axum::{extract::State, Json};

use shared_database::{run_blocking, AppState};
use shared_models::availability::SlotAvailability;
use shared_models::error::AppError;
use shared_models::extract::{ApiJson, ApiPath, ApiQuery};
use shared_models::facility::{
    AvailabilityQuery, AvailableDaysQuery, AvailableDaysResponse, SiteResponse, UpdateSiteRequest,
};
use shared_models::MessageResponse;

use crate::services::SiteService;

#[axum::debug_handler]
pub async fn list_sites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let sites = run_blocking(move || Ok(SiteService::new(&state).list_sites()?)).await?;
    Ok(Json(sites))
}

#[axum::debug_handler]
pub async fn update_site(
    State(state): State<Arc<AppState>>,
    ApiPath(site_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateSiteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = SiteService::new(&state);
        Ok(service.update_site(site_id, &request)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Sede actualizada")))
}

#[axum::debug_handler]
pub async fn available_days(
    State(state): State<Arc<AppState>>,
    ApiPath(site_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<AvailableDaysQuery>,
) -> Result<Json<AvailableDaysResponse>, AppError> {
    let days = run_blocking(move || {
        let service = SiteService::new(&state);
        Ok(service.available_days(site_id, query.fecha.as_deref())?)
    })
    .await?;

    Ok(Json(days))
}

#[axum::debug_handler]
pub async fn slot_availability(
    State(state): State<Arc<AppState>>,
    ApiPath(site_name): ApiPath<String>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<SlotAvailability>, AppError> {
    let availability = run_blocking(move || {
        let service = SiteService::new(&state);
        Ok(service.slot_availability(&site_name, &query.fecha)?)
    })
    .await?;

    Ok(Json(availability))
}

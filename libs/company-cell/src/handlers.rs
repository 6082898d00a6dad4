use std::sync::Arc;

use axum::{extract::State, Json};

use shared_database::{run_blocking, AppState};
use shared_models::availability::SlotAvailability;
use shared_models::error::AppError;
use shared_models::extract::{ApiJson, ApiPath, ApiQuery};
use shared_models::facility::{AvailabilityQuery, CompanyResponse, UpdateCompanyRequest};
use shared_models::MessageResponse;

use crate::services::CompanyService;

#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let companies = run_blocking(move || Ok(CompanyService::new(&state).list_companies()?)).await?;
    Ok(Json(companies))
}

#[axum::debug_handler]
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    ApiPath(company_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    run_blocking(move || {
        let service = CompanyService::new(&state);
        Ok(service.update_company(company_id, &request)?)
    })
    .await?;

    Ok(Json(MessageResponse::new("Empresa actualizada")))
}

#[axum::debug_handler]
pub async fn slot_availability(
    State(state): State<Arc<AppState>>,
    ApiPath(company_name): ApiPath<String>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<SlotAvailability>, AppError> {
    let availability = run_blocking(move || {
        let service = CompanyService::new(&state);
        Ok(service.slot_availability(&company_name, &query.fecha)?)
    })
    .await?;

    Ok(Json(availability))
}

use std::sync::Arc;

use crate::dto::api_response::ApiResponse;
use crate::dto::fuel_entry_dto::{FuelEntryRequest, FuelEntryResponse};
use crate::services::FuelEntryService;
use crate::utils::errors::AppError;

pub struct FuelEntryController {
    service: Arc<FuelEntryService>,
}

impl FuelEntryController {
    pub fn new(service: Arc<FuelEntryService>) -> Self {
        Self { service }
    }

    pub async fn list(&self) -> ApiResponse<Vec<FuelEntryResponse>> {
        let entries = self.service.list_all().await;
        ApiResponse::success(entries.into_iter().map(FuelEntryResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ApiResponse<FuelEntryResponse>, AppError> {
        let entry = self.service.get(id).await?;
        Ok(ApiResponse::success(entry.into()))
    }

    pub async fn update(&self, id: i64, request: FuelEntryRequest) -> Result<ApiResponse<FuelEntryResponse>, AppError> {
        // La fecha del request se ignora: la carga conserva la suya
        let fill = request.into_fill()?;
        let entry = self.service.update(id, fill.liters, fill.price, fill.odometer).await?;
        Ok(ApiResponse::success_with_message(
            entry.into(),
            "Fuel entry updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        self.service.delete(id).await?;
        Ok(ApiResponse::message_only(format!(
            "Fuel entry with ID {} has been successfully deleted",
            id
        )))
    }
}

use std::sync::Arc;

use crate::dto::api_response::ApiResponse;
use crate::dto::fuel_entry_dto::{FuelEntryRequest, FuelEntryResponse, FuelStatsResponse};
use crate::dto::vehicle_dto::{VehicleRequest, VehicleResponse};
use crate::services::{FuelEntryService, VehicleService};
use crate::utils::errors::AppError;

pub struct VehicleController {
    vehicles: Arc<VehicleService>,
    fuel_entries: Arc<FuelEntryService>,
}

impl VehicleController {
    pub fn new(vehicles: Arc<VehicleService>, fuel_entries: Arc<FuelEntryService>) -> Self {
        Self { vehicles, fuel_entries }
    }

    pub async fn create(&self, request: VehicleRequest) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.vehicles.create(request.into_new_vehicle()?).await?;
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn list(&self) -> ApiResponse<Vec<VehicleResponse>> {
        let vehicles = self.vehicles.list().await;
        ApiResponse::success(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.vehicles.get(id).await?;
        Ok(ApiResponse::success(vehicle.into()))
    }

    pub async fn update(&self, id: i64, request: VehicleRequest) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.vehicles.update(id, request.into_new_vehicle()?).await?;
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        let removed_entries = self.vehicles.delete(id).await?;
        Ok(ApiResponse::message_only(format!(
            "Vehicle with ID {} has been successfully deleted ({} fuel entries removed)",
            id, removed_entries
        )))
    }

    pub async fn add_fuel(&self, id: i64, request: FuelEntryRequest) -> Result<ApiResponse<FuelEntryResponse>, AppError> {
        let entry = self.fuel_entries.create(id, request.into_fill()?).await?;
        Ok(ApiResponse::success_with_message(
            entry.into(),
            "Fuel entry created successfully".to_string(),
        ))
    }

    pub async fn fuel_entries(&self, id: i64) -> Result<ApiResponse<Vec<FuelEntryResponse>>, AppError> {
        let entries = self.fuel_entries.list_for_vehicle(id).await?;
        Ok(ApiResponse::success(entries.into_iter().map(FuelEntryResponse::from).collect()))
    }

    pub async fn fuel_stats(&self, id: i64) -> Result<ApiResponse<FuelStatsResponse>, AppError> {
        let stats = self.fuel_entries.compute_stats(id).await?;
        Ok(ApiResponse::success(stats.into()))
    }
}

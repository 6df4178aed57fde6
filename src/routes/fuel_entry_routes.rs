use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::fuel_entry_controller::FuelEntryController;
use crate::dto::api_response::ApiResponse;
use crate::dto::fuel_entry_dto::{FuelEntryRequest, FuelEntryResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiJson;
use crate::utils::validation::parse_id;

pub fn create_fuel_entry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fuel_entries))
        .route("/:id", get(get_fuel_entry).put(update_fuel_entry).delete(delete_fuel_entry))
}

async fn list_fuel_entries(State(state): State<AppState>) -> Json<ApiResponse<Vec<FuelEntryResponse>>> {
    let controller = FuelEntryController::new(state.fuel_entry_service.clone());
    Json(controller.list().await)
}

async fn get_fuel_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FuelEntryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let controller = FuelEntryController::new(state.fuel_entry_service.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_fuel_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<FuelEntryRequest>,
) -> Result<Json<ApiResponse<FuelEntryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let controller = FuelEntryController::new(state.fuel_entry_service.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_fuel_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "id")?;
    let controller = FuelEntryController::new(state.fuel_entry_service.clone());
    Ok(Json(controller.delete(id).await?))
}

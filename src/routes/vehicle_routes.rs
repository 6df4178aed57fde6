use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::fuel_entry_dto::{FuelEntryRequest, FuelEntryResponse, FuelStatsResponse};
use crate::dto::vehicle_dto::{VehicleRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiJson;
use crate::utils::validation::parse_id;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/fuel", get(list_vehicle_fuel).post(add_fuel))
        .route("/:id/fuel/stats", get(get_fuel_stats))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicle_service.clone(), state.fuel_entry_service.clone())
}

async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(State(state): State<AppState>) -> Json<ApiResponse<Vec<VehicleResponse>>> {
    Json(controller(&state).list().await)
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(controller(&state).delete(id).await?))
}

async fn add_fuel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<FuelEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FuelEntryResponse>>), AppError> {
    let id = parse_id(&id, "id")?;
    let response = controller(&state).add_fuel(id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicle_fuel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FuelEntryResponse>>>, AppError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(controller(&state).fuel_entries(id).await?))
}

async fn get_fuel_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FuelStatsResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(controller(&state).fuel_stats(id).await?))
}

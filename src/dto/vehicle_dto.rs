use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::ensure_not_blank;

// Request para crear o reemplazar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(required(message = "Brand is required"), length(max = 100, message = "Brand must be at most 100 characters"))]
    pub brand: Option<String>,

    #[validate(required(message = "Model is required"), length(max = 100, message = "Model must be at most 100 characters"))]
    pub model: Option<String>,

    #[validate(required(message = "Year is required"), range(min = 1886, message = "Year must be at least 1886"))]
    pub year: Option<i32>,
}

impl VehicleRequest {
    /// Valida el request y lo convierte al modelo
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        self.validate()?;

        let (Some(brand), Some(model), Some(year)) = (self.brand, self.model, self.year) else {
            return Err(validation_error("vehicle", "Brand, model and year are required"));
        };
        ensure_not_blank("brand", &brand, "Brand is required")?;
        ensure_not_blank("model", &model, "Model is required")?;

        Ok(NewVehicle {
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            year,
        })
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
        }
    }
}

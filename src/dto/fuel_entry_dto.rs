use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::fuel_entry::{FuelEntry, FuelStats};
use crate::services::FuelFill;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::ensure_positive;

// Request para registrar o corregir una carga
#[derive(Debug, Deserialize, Validate)]
pub struct FuelEntryRequest {
    #[validate(required(message = "Liters is required"))]
    pub liters: Option<f64>,

    #[validate(required(message = "Price is required"), range(min = 0.0, message = "Price must be zero or positive"))]
    pub price: Option<f64>,

    #[validate(required(message = "Odometer is required"))]
    pub odometer: Option<i64>,

    /// Solo se usa al crear; al corregir se conserva la fecha original
    pub timestamp: Option<DateTime<Utc>>,
}

impl FuelEntryRequest {
    /// Valida el request y lo convierte en una carga
    pub fn into_fill(self) -> AppResult<FuelFill> {
        self.validate()?;

        let (Some(liters), Some(price), Some(odometer)) = (self.liters, self.price, self.odometer) else {
            return Err(validation_error("fuel_entry", "Liters, price and odometer are required"));
        };
        ensure_positive("liters", liters, "Liters must be positive")?;
        if odometer <= 0 {
            return Err(validation_error("odometer", "Odometer must be positive"));
        }

        Ok(FuelFill {
            liters,
            price,
            odometer,
            timestamp: self.timestamp,
        })
    }
}

// Response de carga
#[derive(Debug, Serialize)]
pub struct FuelEntryResponse {
    pub id: i64,
    pub vehicle_id: i64,
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<FuelEntry> for FuelEntryResponse {
    fn from(entry: FuelEntry) -> Self {
        Self {
            id: entry.id,
            vehicle_id: entry.vehicle_id,
            liters: entry.liters,
            price: entry.price,
            odometer: entry.odometer,
            timestamp: entry.timestamp,
        }
    }
}

// Response de estadísticas
#[derive(Debug, Serialize)]
pub struct FuelStatsResponse {
    pub total_liters: f64,
    pub total_price: f64,
    pub avg_per_100km: f64,
}

impl From<FuelStats> for FuelStatsResponse {
    fn from(stats: FuelStats) -> Self {
        Self {
            total_liters: stats.total_liters,
            total_price: stats.total_price,
            avg_per_100km: stats.avg_per_100km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn request(liters: Option<f64>, price: Option<f64>, odometer: Option<i64>) -> FuelEntryRequest {
        FuelEntryRequest {
            liters,
            price,
            odometer,
            timestamp: None,
        }
    }

    #[test]
    fn valid_request_becomes_fill() {
        let fill = request(Some(40.0), Some(0.0), Some(500)).into_fill().unwrap();
        assert_eq!(fill.liters, 40.0);
        assert_eq!(fill.price, 0.0);
        assert_eq!(fill.odometer, 500);
        assert!(fill.timestamp.is_none());
    }

    #[test]
    fn invalid_quantities_fail_validation() {
        let cases = [
            request(None, Some(10.0), Some(100)),
            request(Some(0.0), Some(10.0), Some(100)),
            request(Some(10.0), Some(-1.0), Some(100)),
            request(Some(10.0), Some(10.0), Some(0)),
            request(Some(10.0), Some(10.0), None),
        ];
        for case in cases {
            assert!(matches!(case.into_fill(), Err(AppError::Validation(_))));
        }
    }
}

//! Modelo de FuelEntry
//! 
//! Una carga de combustible: litros, precio total pagado, lectura del
//! odómetro y momento de la carga. Referencia al vehículo solo por id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Carga de combustible registrada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelEntry {
    pub id: i64,
    pub vehicle_id: i64,
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
    pub timestamp: DateTime<Utc>,
}

/// Carga de combustible todavía sin id
#[derive(Debug, Clone, PartialEq)]
pub struct NewFuelEntry {
    pub vehicle_id: i64,
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
    pub timestamp: DateTime<Utc>,
}

impl NewFuelEntry {
    pub fn into_entry(self, id: i64) -> FuelEntry {
        FuelEntry {
            id,
            vehicle_id: self.vehicle_id,
            liters: self.liters,
            price: self.price,
            odometer: self.odometer,
            timestamp: self.timestamp,
        }
    }
}

/// Estadísticas agregadas del historial de un vehículo.
/// Siempre trae los tres campos, nunca es parcial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FuelStats {
    pub total_liters: f64,
    pub total_price: f64,
    pub avg_per_100km: f64,
}

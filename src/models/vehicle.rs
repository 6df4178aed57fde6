//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle tal como lo guarda el directorio
//! de vehículos. El id lo asigna el repositorio al crear.

use serde::{Deserialize, Serialize};

/// Vehículo registrado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

/// Datos de un vehículo todavía sin id
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            brand: self.brand,
            model: self.model,
            year: self.year,
        }
    }
}

use std::sync::Arc;

use tracing::info;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::repositories::{FuelLogStore, VehicleDirectory};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::ensure_year_not_in_future;

/// Reglas de negocio de vehículos
pub struct VehicleService {
    vehicles: Arc<dyn VehicleDirectory>,
    fuel_log: Arc<dyn FuelLogStore>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn VehicleDirectory>, fuel_log: Arc<dyn FuelLogStore>) -> Self {
        Self { vehicles, fuel_log }
    }

    pub async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        ensure_year_not_in_future(vehicle.year)?;
        let vehicle = self.vehicles.create(vehicle).await;
        info!("🚗 Vehículo {} creado: {} {} ({})", vehicle.id, vehicle.brand, vehicle.model, vehicle.year);
        Ok(vehicle)
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.vehicles.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Vehicle> {
        self.vehicles
            .get(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn ensure_exists(&self, id: i64) -> AppResult<()> {
        if self.vehicles.exists(id).await {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", id))
        }
    }

    /// Reemplaza marca, modelo y año
    pub async fn update(&self, id: i64, changes: NewVehicle) -> AppResult<Vehicle> {
        self.ensure_exists(id).await?;
        ensure_year_not_in_future(changes.year)?;

        let vehicle = self
            .vehicles
            .update(changes.into_vehicle(id))
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        info!("✏️ Vehículo {} actualizado", id);
        Ok(vehicle)
    }

    /// Borra el vehículo junto con sus cargas, para no dejar cargas huérfanas.
    /// Devuelve cuántas cargas se borraron.
    pub async fn delete(&self, id: i64) -> AppResult<usize> {
        self.ensure_exists(id).await?;
        let _guard = self.fuel_log.lock_vehicle(id).await;

        // Otro borrado pudo ganarnos el candado
        self.ensure_exists(id).await?;
        let removed_entries = self.fuel_log.delete_for_vehicle(id).await;
        self.vehicles.delete(id).await;

        info!("🗑️ Vehículo {} eliminado junto con {} cargas", id, removed_entries);
        Ok(removed_entries)
    }
}

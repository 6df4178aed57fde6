//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los repositorios y servicios se conectan
//! aquí de forma explícita, por constructor.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{FuelEntryRepository, FuelLogStore, VehicleDirectory, VehicleRepository};
use crate::services::{FuelEntryService, VehicleService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicle_service: Arc<VehicleService>,
    pub fuel_entry_service: Arc<FuelEntryService>,
}

impl AppState {
    /// Estado con repositorios en memoria vacíos
    pub fn new(config: EnvironmentConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(VehicleRepository::new()),
            Arc::new(FuelEntryRepository::new()),
        )
    }

    pub fn with_stores(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleDirectory>,
        fuel_log: Arc<dyn FuelLogStore>,
    ) -> Self {
        Self {
            config,
            vehicle_service: Arc::new(VehicleService::new(vehicles.clone(), fuel_log.clone())),
            fuel_entry_service: Arc::new(FuelEntryService::new(vehicles, fuel_log)),
        }
    }
}

//! Services module
//! 
//! Este módulo contiene la lógica de negocio de la aplicación: la
//! consistencia del odómetro, las estadísticas de consumo y los servicios
//! que las aplican sobre los repositorios.

pub mod fuel_entry_service;
pub mod fuel_stats;
pub mod odometer_validator;
pub mod vehicle_service;

pub use fuel_entry_service::{FuelEntryService, FuelFill};
pub use vehicle_service::VehicleService;

//! Repositorios en memoria
//! 
//! Cada repositorio implementa un trait estrecho (`VehicleDirectory`,
//! `FuelLogStore`) para que los servicios no dependan del almacenamiento.

pub mod fuel_entry_repository;
pub mod vehicle_repository;

pub use fuel_entry_repository::{FuelEntryRepository, FuelLogStore};
pub use vehicle_repository::{VehicleDirectory, VehicleRepository};

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::vehicle::{NewVehicle, Vehicle};

/// Directorio de vehículos: identidad y búsqueda por id
#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn exists(&self, id: i64) -> bool;

    async fn get(&self, id: i64) -> Option<Vehicle>;

    /// Asigna un id nuevo y guarda el vehículo
    async fn create(&self, vehicle: NewVehicle) -> Vehicle;

    /// Reemplaza un vehículo existente; `None` si el id no existe
    async fn update(&self, vehicle: Vehicle) -> Option<Vehicle>;

    async fn find_all(&self) -> Vec<Vehicle>;

    /// Devuelve `true` si el vehículo existía
    async fn delete(&self, id: i64) -> bool;
}

pub struct VehicleRepository {
    storage: RwLock<HashMap<i64, Vehicle>>,
    next_id: AtomicI64,
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for VehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleDirectory for VehicleRepository {
    async fn exists(&self, id: i64) -> bool {
        self.storage.read().await.contains_key(&id)
    }

    async fn get(&self, id: i64) -> Option<Vehicle> {
        self.storage.read().await.get(&id).cloned()
    }

    async fn create(&self, vehicle: NewVehicle) -> Vehicle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let vehicle = vehicle.into_vehicle(id);
        self.storage.write().await.insert(id, vehicle.clone());
        vehicle
    }

    async fn update(&self, vehicle: Vehicle) -> Option<Vehicle> {
        let mut storage = self.storage.write().await;
        let slot = storage.get_mut(&vehicle.id)?;
        *slot = vehicle.clone();
        Some(vehicle)
    }

    async fn find_all(&self) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self.storage.read().await.values().cloned().collect();
        vehicles.sort_by_key(|v| v.id);
        vehicles
    }

    async fn delete(&self, id: i64) -> bool {
        self.storage.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corolla() -> NewVehicle {
        NewVehicle {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2018,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially_from_one() {
        let repository = VehicleRepository::new();
        let first = repository.create(corolla()).await;
        let second = repository.create(corolla()).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(repository.exists(2).await);
        assert!(!repository.exists(3).await);
    }

    #[tokio::test]
    async fn update_replaces_only_existing_vehicles() {
        let repository = VehicleRepository::new();
        let mut vehicle = repository.create(corolla()).await;
        vehicle.model = "Yaris".to_string();

        let updated = repository.update(vehicle.clone()).await;
        assert_eq!(updated.as_ref().map(|v| v.model.as_str()), Some("Yaris"));
        assert_eq!(repository.get(vehicle.id).await, Some(vehicle.clone()));

        let ghost = Vehicle { id: 99, ..vehicle };
        assert!(repository.update(ghost).await.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_vehicle_existed() {
        let repository = VehicleRepository::new();
        let vehicle = repository.create(corolla()).await;
        assert!(repository.delete(vehicle.id).await);
        assert!(!repository.delete(vehicle.id).await);
        assert!(repository.find_all().await.is_empty());
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::fuel_entry::{FuelEntry, FuelStats, NewFuelEntry};
use crate::repositories::{FuelLogStore, VehicleDirectory};
use crate::services::{fuel_stats, odometer_validator};
use crate::utils::errors::{not_found_error, AppResult};

/// Datos de una carga tal como llegan del cliente
#[derive(Debug, Clone, PartialEq)]
pub struct FuelFill {
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
    /// Si falta se usa el momento de la creación
    pub timestamp: Option<DateTime<Utc>>,
}

/// Historial de cargas: alta, corrección, borrado y estadísticas.
///
/// Toda escritura toma el candado del vehículo antes de leer el historial,
/// así la validación y el guardado son atómicos frente a otros escritores
/// del mismo vehículo.
pub struct FuelEntryService {
    vehicles: Arc<dyn VehicleDirectory>,
    fuel_log: Arc<dyn FuelLogStore>,
}

impl FuelEntryService {
    pub fn new(vehicles: Arc<dyn VehicleDirectory>, fuel_log: Arc<dyn FuelLogStore>) -> Self {
        Self { vehicles, fuel_log }
    }

    async fn ensure_vehicle(&self, vehicle_id: i64) -> AppResult<()> {
        if self.vehicles.exists(vehicle_id).await {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", vehicle_id))
        }
    }

    pub async fn create(&self, vehicle_id: i64, fill: FuelFill) -> AppResult<FuelEntry> {
        // Ids inexistentes no llegan a crear candado
        self.ensure_vehicle(vehicle_id).await?;
        let _guard = self.fuel_log.lock_vehicle(vehicle_id).await;

        // Releer bajo el candado por si se borró mientras esperábamos
        self.ensure_vehicle(vehicle_id).await?;
        let timestamp = fill.timestamp.unwrap_or_else(Utc::now);
        self.validate_insert(vehicle_id, timestamp, fill.odometer).await?;

        let entry = self
            .fuel_log
            .create(NewFuelEntry {
                vehicle_id,
                liters: fill.liters,
                price: fill.price,
                odometer: fill.odometer,
                timestamp,
            })
            .await;

        info!(
            "⛽ Carga {} registrada para vehículo {}: {} L, odómetro {}",
            entry.id, vehicle_id, entry.liters, entry.odometer
        );
        Ok(entry)
    }

    pub async fn list_all(&self) -> Vec<FuelEntry> {
        self.fuel_log.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<FuelEntry> {
        self.fuel_log
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Fuel entry", id))
    }

    /// Cargas del vehículo ordenadas por fecha
    pub async fn list_for_vehicle(&self, vehicle_id: i64) -> AppResult<Vec<FuelEntry>> {
        self.ensure_vehicle(vehicle_id).await?;
        let mut entries = self.fuel_log.all_for_vehicle(vehicle_id).await;
        entries.sort_by_key(|e| (e.timestamp, e.id));
        Ok(entries)
    }

    /// Corrige litros, precio y odómetro. La fecha y el vehículo no cambian.
    pub async fn update(&self, id: i64, liters: f64, price: f64, odometer: i64) -> AppResult<FuelEntry> {
        let vehicle_id = self.get(id).await?.vehicle_id;
        let _guard = self.fuel_log.lock_vehicle(vehicle_id).await;

        // Releer bajo el candado por si se borró mientras esperábamos
        let existing = self.get(id).await?;
        self.validate_edit(vehicle_id, existing.id, existing.timestamp, odometer)
            .await?;

        let updated = FuelEntry {
            liters,
            price,
            odometer,
            ..existing
        };
        let updated = self
            .fuel_log
            .update(updated)
            .await
            .ok_or_else(|| not_found_error("Fuel entry", id))?;

        info!("✏️ Carga {} actualizada: odómetro {}", id, updated.odometer);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let vehicle_id = self.get(id).await?.vehicle_id;
        let _guard = self.fuel_log.lock_vehicle(vehicle_id).await;

        if !self.fuel_log.delete(id).await {
            return Err(not_found_error("Fuel entry", id));
        }
        info!("🗑️ Carga {} eliminada", id);
        Ok(())
    }

    pub async fn compute_stats(&self, vehicle_id: i64) -> AppResult<FuelStats> {
        self.ensure_vehicle(vehicle_id).await?;
        let entries = self.fuel_log.all_for_vehicle(vehicle_id).await;
        let stats = fuel_stats::compute_stats(&entries);
        debug!("📊 Estadísticas del vehículo {} sobre {} cargas: {:?}", vehicle_id, entries.len(), stats);
        Ok(stats)
    }

    /// Valida una carga nueva contra el historial actual del vehículo.
    /// Para que sea atómico con el guardado, hay que tener el candado del vehículo.
    pub async fn validate_insert(
        &self,
        vehicle_id: i64,
        timestamp: DateTime<Utc>,
        odometer: i64,
    ) -> AppResult<()> {
        let entries = self.fuel_log.all_for_vehicle(vehicle_id).await;
        odometer_validator::validate_insert(&entries, timestamp, odometer)?;
        Ok(())
    }

    /// Valida la corrección de una carga contra sus vecinas por fecha
    pub async fn validate_edit(
        &self,
        vehicle_id: i64,
        entry_id: i64,
        entry_timestamp: DateTime<Utc>,
        odometer: i64,
    ) -> AppResult<()> {
        let entries = self.fuel_log.all_for_vehicle(vehicle_id).await;
        odometer_validator::validate_edit(&entries, entry_id, entry_timestamp, odometer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::NewVehicle;
    use crate::repositories::{FuelEntryRepository, VehicleRepository};
    use crate::utils::errors::AppError;
    use chrono::{Duration, TimeZone};

    async fn setup() -> (Arc<FuelEntryService>, i64) {
        let vehicles = Arc::new(VehicleRepository::new());
        let vehicle = vehicles
            .create(NewVehicle {
                brand: "Renault".to_string(),
                model: "Clio".to_string(),
                year: 2019,
            })
            .await;
        let service = FuelEntryService::new(vehicles, Arc::new(FuelEntryRepository::new()));
        (Arc::new(service), vehicle.id)
    }

    fn at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + Duration::days(day)
    }

    fn fill(odometer: i64, liters: f64, day: i64) -> FuelFill {
        FuelFill {
            liters,
            price: liters * 1.5,
            odometer,
            timestamp: Some(at(day)),
        }
    }

    fn is_monotonic(entries: &[FuelEntry]) -> bool {
        entries.windows(2).all(|pair| pair[0].odometer <= pair[1].odometer)
    }

    #[tokio::test]
    async fn create_assigns_timestamp_when_missing() {
        let (service, vehicle_id) = setup().await;
        let before = Utc::now();
        let entry = service
            .create(
                vehicle_id,
                FuelFill {
                    liters: 40.0,
                    price: 60.0,
                    odometer: 500,
                    timestamp: None,
                },
            )
            .await
            .unwrap();
        assert!(entry.timestamp >= before);
        assert_eq!(entry.vehicle_id, vehicle_id);
    }

    #[tokio::test]
    async fn create_for_unknown_vehicle_is_not_found() {
        let (service, _) = setup().await;
        assert!(matches!(
            service.create(999, fill(100, 10.0, 0)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.compute_stats(999).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.list_for_vehicle(999).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_vehicle_does_not_create_a_lock() {
        let vehicles = Arc::new(VehicleRepository::new());
        let fuel_log = Arc::new(FuelEntryRepository::new());
        let service = FuelEntryService::new(vehicles, fuel_log.clone());

        for vehicle_id in 1..=500 {
            assert!(service.create(vehicle_id, fill(100, 10.0, 0)).await.is_err());
        }
        assert_eq!(fuel_log.tracked_locks().await, 0);
    }

    #[tokio::test]
    async fn insert_below_maximum_is_conflict() {
        let (service, vehicle_id) = setup().await;
        service.create(vehicle_id, fill(100, 10.0, 0)).await.unwrap();

        match service.create(vehicle_id, fill(5, 10.0, 1)).await {
            Err(AppError::Conflict(msg)) => {
                assert!(msg.contains("100"));
                assert!(msg.contains("5"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(service.list_for_vehicle(vehicle_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_dated_before_latest_is_conflict() {
        let (service, vehicle_id) = setup().await;
        service.create(vehicle_id, fill(100, 10.0, 10)).await.unwrap();
        service.create(vehicle_id, fill(200, 10.0, 20)).await.unwrap();

        // La lectura más alta, pero fechada antes que las dos existentes
        match service.create(vehicle_id, fill(300, 10.0, 5)).await {
            Err(AppError::Conflict(msg)) => {
                assert!(msg.starts_with("Fuel entry cannot be dated before the latest entry"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let entries = service.list_for_vehicle(vehicle_id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(is_monotonic(&entries));

        service.create(vehicle_id, fill(300, 10.0, 20)).await.unwrap();
        assert!(is_monotonic(&service.list_for_vehicle(vehicle_id).await.unwrap()));
    }

    #[tokio::test]
    async fn edit_respects_both_neighbours() {
        let (service, vehicle_id) = setup().await;
        service.create(vehicle_id, fill(100, 10.0, 1)).await.unwrap();
        let middle = service.create(vehicle_id, fill(200, 10.0, 2)).await.unwrap();
        service.create(vehicle_id, fill(300, 10.0, 3)).await.unwrap();

        assert!(matches!(
            service.update(middle.id, 10.0, 15.0, 50).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            service.update(middle.id, 10.0, 15.0, 350).await,
            Err(AppError::Conflict(_))
        ));

        let updated = service.update(middle.id, 12.0, 18.0, 250).await.unwrap();
        assert_eq!(updated.odometer, 250);
        assert_eq!(updated.liters, 12.0);
        assert_eq!(updated.timestamp, middle.timestamp);
        assert!(is_monotonic(&service.list_for_vehicle(vehicle_id).await.unwrap()));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_entry_are_not_found() {
        let (service, _) = setup().await;
        assert!(matches!(service.update(7, 1.0, 1.0, 1).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(7).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn stats_follow_the_fuel_log() {
        let (service, vehicle_id) = setup().await;
        assert_eq!(service.compute_stats(vehicle_id).await.unwrap(), FuelStats::default());

        service.create(vehicle_id, fill(100, 10.0, 1)).await.unwrap();
        service.create(vehicle_id, fill(300, 15.0, 2)).await.unwrap();
        let latest = service.create(vehicle_id, fill(500, 20.0, 3)).await.unwrap();

        let stats = service.compute_stats(vehicle_id).await.unwrap();
        assert_eq!(stats.total_liters, 45.0);
        assert_eq!(stats.avg_per_100km, 6.25);
        assert_eq!(service.compute_stats(vehicle_id).await.unwrap(), stats);

        service.delete(latest.id).await.unwrap();
        // (10) / (300 - 100) * 100
        assert_eq!(service.compute_stats(vehicle_id).await.unwrap().avg_per_100km, 5.0);
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_the_log_monotonic() {
        let (service, vehicle_id) = setup().await;
        service.create(vehicle_id, fill(1_000, 10.0, 0)).await.unwrap();

        // Sin fecha: cada alta es "ahora", así que el orden por fecha es el de llegada
        let attempts = (0..20).map(|i| {
            let service = service.clone();
            let odometer = if i % 2 == 0 { 2_000 - i * 10 } else { 1_000 + i * 10 };
            tokio::spawn(async move {
                service
                    .create(
                        vehicle_id,
                        FuelFill {
                            liters: 5.0,
                            price: 7.5,
                            odometer,
                            timestamp: None,
                        },
                    )
                    .await
            })
        });
        let results = futures::future::join_all(attempts).await;
        assert!(results.iter().all(|r| r.is_ok()));

        let entries = service.list_for_vehicle(vehicle_id).await.unwrap();
        assert!(is_monotonic(&entries));
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::models::fuel_entry::{FuelEntry, NewFuelEntry};

/// Historial de cargas: entradas por id, con búsqueda secundaria por vehículo
#[async_trait]
pub trait FuelLogStore: Send + Sync {
    /// Todas las cargas del vehículo, sin orden garantizado
    async fn all_for_vehicle(&self, vehicle_id: i64) -> Vec<FuelEntry>;

    async fn find_by_id(&self, id: i64) -> Option<FuelEntry>;

    async fn find_all(&self) -> Vec<FuelEntry>;

    /// Asigna un id nuevo y guarda la carga
    async fn create(&self, entry: NewFuelEntry) -> FuelEntry;

    /// Reemplaza una carga existente; `None` si el id no existe
    async fn update(&self, entry: FuelEntry) -> Option<FuelEntry>;

    async fn delete(&self, id: i64) -> bool;

    /// Borra todas las cargas del vehículo y devuelve cuántas había
    async fn delete_for_vehicle(&self, vehicle_id: i64) -> usize;

    /// Candado de escritura del historial de un vehículo.
    /// Quien lo tenga puede leer, validar y guardar sin que otro escritor
    /// del mismo vehículo se intercale. Los candados que nadie tiene ni
    /// espera se descartan, así que el mapa no crece con ids viejos.
    async fn lock_vehicle(&self, vehicle_id: i64) -> OwnedMutexGuard<()>;
}

pub struct FuelEntryRepository {
    storage: RwLock<HashMap<i64, FuelEntry>>,
    // vehicle_id -> ids de sus cargas
    by_vehicle: RwLock<HashMap<i64, Vec<i64>>>,
    vehicle_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
    next_id: AtomicI64,
}

impl FuelEntryRepository {
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
            by_vehicle: RwLock::new(HashMap::new()),
            vehicle_locks: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[cfg(test)]
impl FuelEntryRepository {
    /// Candados que siguen en el mapa
    pub(crate) async fn tracked_locks(&self) -> usize {
        self.vehicle_locks.lock().await.len()
    }
}

impl Default for FuelEntryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FuelLogStore for FuelEntryRepository {
    async fn all_for_vehicle(&self, vehicle_id: i64) -> Vec<FuelEntry> {
        // Mismo orden de candados que en las escrituras: primero storage
        let storage = self.storage.read().await;
        let by_vehicle = self.by_vehicle.read().await;
        by_vehicle
            .get(&vehicle_id)
            .map(|ids| ids.iter().filter_map(|id| storage.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    async fn find_by_id(&self, id: i64) -> Option<FuelEntry> {
        self.storage.read().await.get(&id).cloned()
    }

    async fn find_all(&self) -> Vec<FuelEntry> {
        let mut entries: Vec<FuelEntry> = self.storage.read().await.values().cloned().collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    async fn create(&self, entry: NewFuelEntry) -> FuelEntry {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = entry.into_entry(id);

        let mut storage = self.storage.write().await;
        let mut by_vehicle = self.by_vehicle.write().await;
        storage.insert(id, entry.clone());
        by_vehicle.entry(entry.vehicle_id).or_default().push(id);

        entry
    }

    async fn update(&self, entry: FuelEntry) -> Option<FuelEntry> {
        let mut storage = self.storage.write().await;
        let slot = storage.get_mut(&entry.id)?;
        // El vehículo dueño no cambia al editar
        if slot.vehicle_id != entry.vehicle_id {
            return None;
        }
        *slot = entry.clone();
        Some(entry)
    }

    async fn delete(&self, id: i64) -> bool {
        let mut storage = self.storage.write().await;
        let mut by_vehicle = self.by_vehicle.write().await;

        let Some(removed) = storage.remove(&id) else {
            return false;
        };
        if let Some(ids) = by_vehicle.get_mut(&removed.vehicle_id) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                by_vehicle.remove(&removed.vehicle_id);
            }
        }
        true
    }

    async fn delete_for_vehicle(&self, vehicle_id: i64) -> usize {
        let mut storage = self.storage.write().await;
        let mut by_vehicle = self.by_vehicle.write().await;

        let ids = by_vehicle.remove(&vehicle_id).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if storage.remove(&id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    async fn lock_vehicle(&self, vehicle_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.vehicle_locks.lock().await;
            // Solo el mapa lo referencia: nadie lo tiene ni lo espera
            locks.retain(|id, lock| *id == vehicle_id || Arc::strong_count(lock) > 1);
            locks
                .entry(vehicle_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

//! Estadísticas de consumo
//!
//! Fórmula: promedio (L/100km) = (combustible consumido / distancia recorrida) × 100
//!
//! La carga más reciente (por fecha) no cuenta como consumida: ese
//! combustible sigue en el tanque. Con una sola carga se asume que el
//! vehículo arrancó en 0 y que todo lo cargado se usó hasta esa lectura.

use crate::models::fuel_entry::{FuelEntry, FuelStats};

/// Calcula totales y promedio cada 100 unidades sobre el historial completo
/// de un vehículo. El orden de `entries` no importa.
pub fn compute_stats(entries: &[FuelEntry]) -> FuelStats {
    let total_liters: f64 = entries.iter().map(|e| e.liters).sum();
    let total_price: f64 = entries.iter().map(|e| e.price).sum();

    if entries.is_empty() {
        return FuelStats::default();
    }

    let distance = distance_driven(entries);
    let avg_per_100km = if distance <= 0 {
        0.0
    } else {
        round_half_up_2((fuel_consumed(entries) / distance as f64) * 100.0)
    };

    FuelStats {
        total_liters,
        total_price,
        avg_per_100km,
    }
}

/// Máximo menos mínimo del odómetro. Si coinciden (una sola carga, o todas
/// con la misma lectura) la distancia es la lectura misma, contando desde 0.
fn distance_driven(entries: &[FuelEntry]) -> i64 {
    let lo = entries.iter().map(|e| e.odometer).min().unwrap_or(0);
    let hi = entries.iter().map(|e| e.odometer).max().unwrap_or(0);

    if lo == hi {
        hi
    } else {
        hi - lo
    }
}

/// Litros consumidos: todo si hay una sola carga; si no, todo menos la carga
/// más reciente (desempate por id más alto).
fn fuel_consumed(entries: &[FuelEntry]) -> f64 {
    if let [only] = entries {
        return only.liters;
    }

    let most_recent = entries.iter().max_by_key(|e| (e.timestamp, e.id)).map(|e| e.id);

    entries
        .iter()
        .filter(|e| Some(e.id) != most_recent)
        .map(|e| e.liters)
        .sum()
}

/// Redondeo a 2 decimales, mitad hacia arriba (6.789 -> 6.79).
///
/// `f64::round` redondea la mitad alejándose de cero; coincide con "mitad
/// hacia arriba" solo porque el promedio nunca es negativo (litros > 0 y
/// distancia > 0).
fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

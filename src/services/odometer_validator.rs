//! Validación de consistencia del odómetro
//!
//! Para un vehículo, sus cargas ordenadas por fecha deben tener lecturas de
//! odómetro no decrecientes. Las funciones de este módulo deciden sobre una
//! foto completa del historial del vehículo y no tienen efectos.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::models::fuel_entry::FuelEntry;
use crate::utils::errors::AppError;

/// Lectura de odómetro que rompe la monotonía del historial
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OdometerViolation {
    #[error("Odometer cannot decrease. Maximum odometer for this vehicle: {maximum}, New: {candidate}")]
    BelowMaximum { maximum: i64, candidate: i64 },

    #[error("Odometer cannot be below previous entry. Previous odometer: {previous}, New: {candidate}")]
    BelowPrevious { previous: i64, candidate: i64 },

    #[error("Odometer cannot be above next entry. Next odometer: {next}, New: {candidate}")]
    AboveNext { next: i64, candidate: i64 },

    #[error("Fuel entry cannot be dated before the latest entry. Latest timestamp: {latest}, New: {candidate}")]
    BeforeLatest {
        latest: DateTime<Utc>,
        candidate: DateTime<Utc>,
    },
}

impl From<OdometerViolation> for AppError {
    fn from(violation: OdometerViolation) -> Self {
        AppError::Conflict(violation.to_string())
    }
}

/// Una carga nueva va al final del historial: su fecha no puede ser anterior
/// a la más reciente y su lectura no puede ser menor que el máximo ya
/// registrado. Empates aceptados en ambos casos (a igual fecha ordena el id).
pub fn validate_insert(
    entries: &[FuelEntry],
    timestamp: DateTime<Utc>,
    odometer: i64,
) -> Result<(), OdometerViolation> {
    let Some(latest) = entries.iter().map(|e| e.timestamp).max() else {
        return Ok(());
    };

    if timestamp < latest {
        return Err(OdometerViolation::BeforeLatest {
            latest,
            candidate: timestamp,
        });
    }

    let maximum = entries.iter().map(|e| e.odometer).max().unwrap_or(odometer);
    if odometer < maximum {
        return Err(OdometerViolation::BelowMaximum {
            maximum,
            candidate: odometer,
        });
    }
    Ok(())
}

/// Al corregir una carga pasada, la nueva lectura tiene que quedar entre la
/// de su vecina anterior y la de su vecina siguiente (por fecha).
///
/// Si `entry_id` no aparece en el historial no hay nada que comparar y se
/// acepta.
pub fn validate_edit(
    entries: &[FuelEntry],
    entry_id: i64,
    entry_timestamp: DateTime<Utc>,
    odometer: i64,
) -> Result<(), OdometerViolation> {
    let mut ordered: Vec<&FuelEntry> = entries.iter().collect();
    // Desempate por id para que fechas iguales den un orden estable
    ordered.sort_by_key(|e| (e.timestamp, e.id));

    let Some(index) = ordered.iter().position(|e| e.id == entry_id) else {
        debug!(
            "🔍 Carga {} ({}) no está en el historial de su vehículo, se omite la validación",
            entry_id, entry_timestamp
        );
        return Ok(());
    };

    if let Some(previous) = index.checked_sub(1).map(|i| ordered[i]) {
        if odometer < previous.odometer {
            return Err(OdometerViolation::BelowPrevious {
                previous: previous.odometer,
                candidate: odometer,
            });
        }
    }

    if let Some(next) = ordered.get(index + 1) {
        if odometer > next.odometer {
            return Err(OdometerViolation::AboveNext {
                next: next.odometer,
                candidate: odometer,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    fn entry(id: i64, odometer: i64, hours: i64) -> FuelEntry {
        FuelEntry {
            id,
            vehicle_id: 1,
            liters: 30.0,
            price: 45.0,
            odometer,
            timestamp: at(hours),
        }
    }

    fn three_fills() -> Vec<FuelEntry> {
        // Desordenadas a propósito
        vec![entry(3, 300, 3), entry(1, 100, 1), entry(2, 200, 2)]
    }

    #[test]
    fn insert_into_empty_log_is_accepted() {
        assert_eq!(validate_insert(&[], at(0), 1), Ok(()));
    }

    #[test]
    fn insert_below_maximum_cites_both_values() {
        let log = vec![entry(1, 40, 1), entry(2, 100, 2)];
        let violation = validate_insert(&log, at(3), 5).unwrap_err();
        assert_eq!(
            violation,
            OdometerViolation::BelowMaximum {
                maximum: 100,
                candidate: 5
            }
        );
        let message = violation.to_string();
        assert!(message.contains("100"));
        assert!(message.contains("5"));
    }

    #[test]
    fn insert_equal_to_maximum_is_accepted() {
        let log = vec![entry(1, 100, 1)];
        assert_eq!(validate_insert(&log, at(2), 100), Ok(()));
        assert_eq!(validate_insert(&log, at(2), 101), Ok(()));
    }

    #[test]
    fn insert_uses_maximum_not_latest() {
        // La lectura más alta no es la más reciente
        let log = vec![entry(1, 500, 1), entry(2, 300, 2)];
        assert!(validate_insert(&log, at(3), 400).is_err());
    }

    #[test]
    fn insert_dated_before_latest_is_rejected() {
        // Con la lectura más alta, pero fechada entre las existentes
        let log = vec![entry(1, 100, 10), entry(2, 200, 20)];
        let violation = validate_insert(&log, at(5), 300).unwrap_err();
        assert_eq!(
            violation,
            OdometerViolation::BeforeLatest {
                latest: at(20),
                candidate: at(5)
            }
        );
        assert!(violation.to_string().starts_with("Fuel entry cannot be dated before the latest entry"));
        assert!(validate_insert(&log, at(15), 300).is_err());
    }

    #[test]
    fn insert_on_latest_timestamp_is_accepted() {
        let log = vec![entry(1, 100, 10), entry(2, 200, 20)];
        assert_eq!(validate_insert(&log, at(20), 200), Ok(()));
        assert_eq!(validate_insert(&log, at(21), 250), Ok(()));
    }

    #[test]
    fn edit_below_previous_neighbour_is_rejected() {
        assert_eq!(
            validate_edit(&three_fills(), 2, at(2), 50),
            Err(OdometerViolation::BelowPrevious {
                previous: 100,
                candidate: 50
            })
        );
    }

    #[test]
    fn edit_above_next_neighbour_is_rejected() {
        assert_eq!(
            validate_edit(&three_fills(), 2, at(2), 350),
            Err(OdometerViolation::AboveNext {
                next: 300,
                candidate: 350
            })
        );
    }

    #[test]
    fn edit_between_neighbours_is_accepted() {
        assert_eq!(validate_edit(&three_fills(), 2, at(2), 250), Ok(()));
    }

    #[test]
    fn edit_equal_to_neighbours_is_accepted() {
        assert_eq!(validate_edit(&three_fills(), 2, at(2), 100), Ok(()));
        assert_eq!(validate_edit(&three_fills(), 2, at(2), 300), Ok(()));
    }

    #[test]
    fn edit_of_first_and_last_checks_one_side() {
        let log = three_fills();
        assert_eq!(validate_edit(&log, 1, at(1), 1), Ok(()));
        assert!(validate_edit(&log, 1, at(1), 201).is_err());
        assert_eq!(validate_edit(&log, 3, at(3), 10_000), Ok(()));
        assert!(validate_edit(&log, 3, at(3), 199).is_err());
    }

    #[test]
    fn single_entry_accepts_any_value() {
        let log = vec![entry(1, 500, 1)];
        assert_eq!(validate_edit(&log, 1, at(1), 1), Ok(()));
        assert_eq!(validate_edit(&log, 1, at(1), 999_999), Ok(()));
    }

    #[test]
    fn unknown_entry_is_a_no_op() {
        assert_eq!(validate_edit(&three_fills(), 42, at(2), 0), Ok(()));
    }

    #[test]
    fn violation_becomes_conflict() {
        let error: AppError = OdometerViolation::AboveNext {
            next: 300,
            candidate: 350,
        }
        .into();
        match error {
            AppError::Conflict(msg) => {
                assert_eq!(msg, "Odometer cannot be above next entry. Next odometer: 300, New: 350")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

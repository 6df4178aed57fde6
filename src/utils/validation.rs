//! Utilidades de validación
//! 
//! Reglas que los atributos de `validator` no cubren: textos en blanco,
//! valores estrictamente positivos, año del vehículo y ids de la ruta.

use chrono::{Datelike, Utc};

use crate::utils::errors::{bad_request_error, validation_error, AppError, AppResult};

/// Validar que un string no esté vacío ni sea solo espacios
pub fn ensure_not_blank(field: &'static str, value: &str, message: &'static str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(validation_error(field, message));
    }
    Ok(())
}

/// Validar que un número sea estrictamente positivo
pub fn ensure_positive(field: &'static str, value: f64, message: &'static str) -> AppResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(validation_error(field, message));
    }
    Ok(())
}

/// El año del modelo no puede superar el año calendario actual
pub fn ensure_year_not_in_future(year: i32) -> AppResult<()> {
    let current_year = Utc::now().year();
    if year > current_year {
        return Err(AppError::BadRequest(format!(
            "Year cannot exceed current year ({})",
            current_year
        )));
    }
    Ok(())
}

/// Convertir el id de la ruta a entero
pub fn parse_id(raw: &str, parameter: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        bad_request_error(&format!(
            "Invalid value '{}' for parameter '{}'. Expected an integer.",
            raw, parameter
        ))
    })
}

//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API, con el mismo sobre que las respuestas exitosas
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(message: String, code: &str) -> Self {
        Self {
            success: false,
            message,
            details: None,
            code: code.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                let mut response = ErrorResponse::new(
                    format!("Validation failed: {}", describe_validation_errors(&e)),
                    "VALIDATION_ERROR",
                );
                response.details = Some(json!(e));
                (StatusCode::BAD_REQUEST, response)
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg, "NOT_FOUND"))
            }

            AppError::Conflict(msg) => {
                warn!("⛔ Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(msg, "CONFLICT"))
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, "BAD_REQUEST"))
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                let mut response = ErrorResponse::new(
                    "An unexpected error occurred".to_string(),
                    "INTERNAL_ERROR",
                );
                response.details = Some(json!({ "internal_error": msg }));
                (StatusCode::INTERNAL_SERVER_ERROR, response)
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// "campo: mensaje" por cada error, ordenado por campo
fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with ID {} not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn conflict_maps_to_409_with_envelope() {
        let (status, body) = body_json(AppError::Conflict("odometer".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "odometer");
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn not_found_helper_names_entity_and_id() {
        let (status, body) = body_json(not_found_error("Vehicle", 7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Vehicle with ID 7 not found");
    }

    #[tokio::test]
    async fn validation_helper_lists_field_and_message() {
        let (status, body) = body_json(validation_error("liters", "Liters must be positive")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed: liters: Liters must be positive");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

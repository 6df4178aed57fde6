//! Extractores propios
//!
//! `ApiJson` envuelve a `axum::Json` para que un cuerpo ilegible (JSON mal
//! formado, tipos equivocados, sin `content-type`) responda con el mismo
//! sobre `{success:false, ...}` que el resto de errores.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::debug;

use crate::utils::errors::AppError;

/// Cuerpo JSON con rechazo convertido en `AppError::BadRequest`
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                debug!("📦 Cuerpo rechazado ({}): {}", rejection.status(), rejection.body_text());
                Err(AppError::BadRequest(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                )))
            }
        }
    }
}

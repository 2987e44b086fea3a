//! Handler errors and their JSON representation

use crate::response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use convenio::ConvenioError;
use thiserror::Error;
use tracing::warn;

/// Anything that can go wrong while serving a request
///
/// Every variant is answered with 500, validation failures included.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Convenio(#[from] ConvenioError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        warn!(error = %error, "agreement request failed");

        let body = ErrorResponse {
            success: false,
            message: format!("Error al generar convenio: {error}"),
            error,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
